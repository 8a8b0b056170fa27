//! Minimal ABI encoding for EVM function calls.
//!
//! This module provides just enough ABI encoding to build token transfer
//! calldata (ERC-20, ERC-721, ERC-1155) without pulling in a full ABI parser.

/// A single ABI-encoded parameter.
#[derive(Debug, Clone)]
pub enum AbiParam {
    /// A 20-byte Ethereum address, left-padded to 32 bytes.
    Address([u8; 20]),
    /// A 256-bit unsigned integer as a big-endian 32-byte array.
    Uint256([u8; 32]),
    /// Dynamic `bytes`. The head holds an offset into the tail, and the tail
    /// holds the length word followed by the data right-padded to 32 bytes.
    Bytes(Vec<u8>),
}

impl AbiParam {
    fn is_dynamic(&self) -> bool {
        matches!(self, AbiParam::Bytes(_))
    }
}

/// Encodes a function call with the given 4-byte selector and ABI parameters.
///
/// The output is `selector || head(params) || tail(params)`. Static params
/// occupy one 32-byte head word each; dynamic params put their offset (from
/// the start of the argument block) in the head and their payload in the tail.
///
/// # Parameters
///
/// - `selector`: The 4-byte function selector (e.g., `0xa9059cbb` for ERC-20
///   `transfer`).
/// - `params`: Slice of [`AbiParam`] values to encode after the selector.
pub fn encode_function_call(selector: [u8; 4], params: &[AbiParam]) -> Vec<u8> {
    let head_len = params.len() * 32;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for param in params {
        if param.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend_from_slice(&encode_tail(param));
        } else {
            head.extend_from_slice(&encode_static(param));
        }
    }

    let mut data = Vec::with_capacity(4 + head.len() + tail.len());
    data.extend_from_slice(&selector);
    data.extend_from_slice(&head);
    data.extend_from_slice(&tail);
    data
}

/// Encodes a static [`AbiParam`] as a 32-byte ABI word.
fn encode_static(param: &AbiParam) -> [u8; 32] {
    match param {
        AbiParam::Address(addr) => {
            // Left-pad: 12 zero bytes + 20 address bytes.
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(addr);
            word
        }
        AbiParam::Uint256(value) => *value,
        AbiParam::Bytes(_) => [0u8; 32],
    }
}

/// Encodes the tail section of a dynamic parameter.
fn encode_tail(param: &AbiParam) -> Vec<u8> {
    match param {
        AbiParam::Bytes(bytes) => {
            let padded_len = bytes.len().div_ceil(32) * 32;
            let mut out = Vec::with_capacity(32 + padded_len);
            out.extend_from_slice(&usize_word(bytes.len()));
            out.extend_from_slice(bytes);
            out.resize(32 + padded_len, 0);
            out
        }
        AbiParam::Address(_) | AbiParam::Uint256(_) => Vec::new(),
    }
}

fn usize_word(value: usize) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}
