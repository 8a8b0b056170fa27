use sha3::{Digest, Keccak256};

use crate::error::EthError;

/// The all-zero address, used when no sender can be determined.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Validates an Ethereum address string.
///
/// Returns `Ok(false)` for a well-formed address whose mixed-case EIP-55
/// checksum does not match. All-lowercase and all-uppercase addresses carry
/// no checksum and are accepted.
pub fn validate_address(address: &str) -> Result<bool, EthError> {
    let hex_part = address_hex(address)?;

    let has_lower = hex_part.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex_part.bytes().any(|b| b.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return Ok(true);
    }

    Ok(eip55(hex_part) == hex_part)
}

/// `true` for a well-formed address with a valid or absent checksum.
pub fn is_address(address: &str) -> bool {
    matches!(validate_address(address), Ok(true))
}

/// Checksums `address` if it is valid, otherwise returns it unchanged so
/// validation can report it verbatim.
pub fn normalize_address(address: &str) -> String {
    if is_address(address) {
        checksum_address(address).unwrap_or_else(|_| address.to_string())
    } else {
        address.to_string()
    }
}

/// EIP-55 checksum encoding. Any input casing is accepted.
pub fn checksum_address(address: &str) -> Result<String, EthError> {
    let hex_part = address_hex(address)?;
    Ok(format!("0x{}", eip55(hex_part)))
}

/// Parses a 0x-prefixed address into its 20 bytes. Casing is not checked.
pub fn parse_address(address: &str) -> Result<[u8; 20], EthError> {
    let mut addr = [0u8; 20];
    hex::decode_to_slice(address_hex(address)?, &mut addr)
        .map_err(|e| EthError::InvalidAddress(format!("invalid hex: {e}")))?;
    Ok(addr)
}

/// Returns the 40 hex digits after the `0x` prefix.
fn address_hex(address: &str) -> Result<&str, EthError> {
    let hex_part = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| EthError::InvalidAddress("address must start with 0x".into()))?;

    if hex_part.len() != 40 {
        return Err(EthError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_part.len()
        )));
    }
    if !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EthError::InvalidAddress(
            "address contains non-hex characters".into(),
        ));
    }
    Ok(hex_part)
}

/// Applies the EIP-55 casing to 40 hex digits: a letter is uppercased when
/// the matching nibble of keccak256(lowercase hex) is >= 8.
fn eip55(hex_part: &str) -> String {
    let lower = hex_part.to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());

    lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}
