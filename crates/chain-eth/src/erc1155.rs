use crate::abi::{encode_function_call, AbiParam};
use crate::address::parse_address;
use crate::error::EthError;

/// Function selector for
/// `safeTransferFrom(address,address,uint256,uint256,bytes)`: `0xf242432a`.
pub const SAFE_TRANSFER_FROM_SELECTOR: [u8; 4] = [0xf2, 0x42, 0x43, 0x2a];

/// Encodes an ERC-1155 `safeTransferFrom(address,address,uint256,uint256,bytes)` call.
///
/// `id` and `amount` are big-endian 32-byte uint256 values. `data` is passed
/// through to the receiver hook and encoded as dynamic bytes.
pub fn encode_safe_transfer_from(
    from: &str,
    to: &str,
    id: [u8; 32],
    amount: [u8; 32],
    data: &[u8],
) -> Result<Vec<u8>, EthError> {
    let params = [
        AbiParam::Address(parse_address(from)?),
        AbiParam::Address(parse_address(to)?),
        AbiParam::Uint256(id),
        AbiParam::Uint256(amount),
        AbiParam::Bytes(data.to_vec()),
    ];
    Ok(encode_function_call(SAFE_TRANSFER_FROM_SELECTOR, &params))
}
