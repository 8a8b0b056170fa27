use crate::abi::{encode_function_call, AbiParam};
use crate::address::parse_address;
use crate::error::EthError;

/// Function selector for `transfer(address,uint256)`: `0xa9059cbb`.
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Encodes an ERC-20 `transfer(address,uint256)` call.
///
/// `amount` is in base units as a big-endian 32-byte word (see
/// [`to_word`](crate::units::to_word)). Returns the 68-byte calldata.
pub fn encode_transfer(to: &str, amount: [u8; 32]) -> Result<Vec<u8>, EthError> {
    let addr = parse_address(to)?;
    let params = [AbiParam::Address(addr), AbiParam::Uint256(amount)];
    Ok(encode_function_call(TRANSFER_SELECTOR, &params))
}
