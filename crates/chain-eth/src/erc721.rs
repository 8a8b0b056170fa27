use crate::abi::{encode_function_call, AbiParam};
use crate::address::parse_address;
use crate::error::EthError;

/// Function selector for `safeTransferFrom(address,address,uint256)`: `0x42842e0e`.
pub const SAFE_TRANSFER_FROM_SELECTOR: [u8; 4] = [0x42, 0x84, 0x2e, 0x0e];

/// Encodes an ERC-721 `safeTransferFrom(address,address,uint256)` call.
///
/// `token_id` is a big-endian 32-byte uint256.
pub fn encode_safe_transfer_from(
    from: &str,
    to: &str,
    token_id: [u8; 32],
) -> Result<Vec<u8>, EthError> {
    let params = [
        AbiParam::Address(parse_address(from)?),
        AbiParam::Address(parse_address(to)?),
        AbiParam::Uint256(token_id),
    ];
    Ok(encode_function_call(SAFE_TRANSFER_FROM_SELECTOR, &params))
}
