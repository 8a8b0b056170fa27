//! Conversion between human-readable decimal amounts and integer base units.

use alloy_primitives::U256;

use crate::error::EthError;

/// Decimal precision of the native coin on every EVM chain.
pub const NATIVE_DECIMALS: u8 = 18;

/// Converts a decimal string (e.g. `"69.420"`) into base units at the given
/// precision.
///
/// Fraction digits beyond `decimals` are rounded half up on the first
/// dropped digit (`"0.129"` @ 2 → 13). Signs, exponents and thousands
/// separators are rejected.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, EthError> {
    let (int_part, frac_part) = split_decimal(amount)
        .ok_or_else(|| EthError::InvalidAmount(format!("not a decimal number: {amount:?}")))?;

    let decimals = decimals as usize;
    let (kept, dropped) = frac_part.split_at(frac_part.len().min(decimals));

    let mut digits = String::with_capacity(int_part.len() + decimals);
    digits.push_str(int_part);
    digits.push_str(kept);
    digits.extend(std::iter::repeat_n('0', decimals - kept.len()));

    let overflow = || EthError::InvalidAmount(format!("{amount} does not fit in uint256"));
    let digits = digits.trim_start_matches('0');
    let value = if digits.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(digits, 10).map_err(|_| overflow())?
    };

    if dropped.as_bytes().first().is_some_and(|&digit| digit >= b'5') {
        value.checked_add(U256::from(1u8)).ok_or_else(overflow)
    } else {
        Ok(value)
    }
}

/// Renders base units as a decimal string at the given precision, with
/// trailing fraction zeros trimmed (`111000000000000000` @ 18 → `"0.111"`).
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{digits}", "0".repeat(decimals + 1 - digits.len()))
    } else {
        digits
    };

    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

/// Parses a non-negative base-10 integer (token ids, ERC-1155 amounts).
///
/// A minus sign is accepted only in front of zero (`"-0"`).
pub fn parse_uint(value: &str) -> Result<U256, EthError> {
    let digits = match value.strip_prefix('-') {
        Some(rest) if !rest.is_empty() && rest.bytes().all(|b| b == b'0') => rest,
        _ => value,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EthError::InvalidAmount(format!("not an unsigned integer: {value:?}")));
    }
    U256::from_str_radix(digits, 10)
        .map_err(|e| EthError::InvalidAmount(format!("{value} does not fit in uint256: {e}")))
}

/// Returns `true` if `amount` is a well-formed decimal strictly greater than zero.
pub fn is_positive_decimal(amount: &str) -> bool {
    match split_decimal(amount) {
        Some((int_part, frac_part)) => int_part
            .bytes()
            .chain(frac_part.bytes())
            .any(|b| b != b'0'),
        None => false,
    }
}

/// Splits `"12.34"` into `("12", "34")`. Requires at least one digit overall.
fn split_decimal(amount: &str) -> Option<(&str, &str)> {
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (amount, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    Some((int_part, frac_part))
}

/// Big-endian 32-byte word for ABI encoding.
pub fn to_word(value: U256) -> [u8; 32] {
    value.to_be_bytes::<32>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whole_native_amount() {
        let wei = parse_units("1", NATIVE_DECIMALS).unwrap();
        assert_eq!(wei.to_string(), "1000000000000000000");
    }

    #[test]
    fn parse_fractional_amounts() {
        assert_eq!(parse_units("0.0000001", 18).unwrap().to_string(), "100000000000");
        assert_eq!(
            parse_units("123456.000000789", 18).unwrap().to_string(),
            "123456000000789000000000"
        );
        assert_eq!(parse_units(".5", 1).unwrap().to_string(), "5");
    }

    #[test]
    fn parse_rounds_excess_precision_half_up() {
        assert_eq!(parse_units("1.000000789", 0).unwrap(), U256::from(1u64));
        assert_eq!(parse_units("0.129", 2).unwrap(), U256::from(13u64));
        assert_eq!(parse_units("0.125", 2).unwrap(), U256::from(13u64));
        assert_eq!(parse_units("0.1249", 2).unwrap(), U256::from(12u64));
        assert_eq!(parse_units("0.999", 2).unwrap(), U256::from(100u64));
        assert_eq!(parse_units("0.0000001", 6).unwrap(), U256::ZERO);
        assert_eq!(parse_units("0.0000005", 6).unwrap(), U256::from(1u64));
    }

    #[test]
    fn parse_rounding_cannot_overflow() {
        let max = format_units(U256::MAX, 0);
        assert!(parse_units(&format!("{max}.9"), 0).is_err());
        assert_eq!(parse_units(&format!("{max}.4"), 0).unwrap(), U256::MAX);
    }

    #[test]
    fn parse_rejects_malformed_amounts() {
        for bad in ["", ".", "-1", "1e18", "1,000", "abc", "1.2.3", " 1"] {
            assert!(parse_units(bad, 18).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn parse_rejects_overflow() {
        let huge = "1".repeat(80);
        assert!(parse_units(&huge, 0).is_err());
    }

    #[test]
    fn parse_max_uint256() {
        let max = U256::MAX;
        let amount = format_units(max, 18);
        assert_eq!(parse_units(&amount, 18).unwrap(), max);
    }

    #[test]
    fn format_trims_trailing_zeros() {
        assert_eq!(format_units(U256::from(111_000_000_000_000_000u64), 18), "0.111");
        assert_eq!(format_units(U256::from(6_000_000_000_000_000_000u128), 18), "6");
        assert_eq!(format_units(U256::from(10_000u64), 6), "0.01");
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(42u64), 0), "42");
    }

    #[test]
    fn parse_uint_accepts_digits_only() {
        assert_eq!(parse_uint("420").unwrap(), U256::from(420u64));
        assert!(parse_uint("").is_err());
        assert!(parse_uint("-20").is_err());
        assert_eq!(parse_uint("-0").unwrap(), U256::ZERO);
        assert_eq!(parse_uint("-000").unwrap(), U256::ZERO);
        assert!(parse_uint("-").is_err());
        assert!(parse_uint("69.420").is_err());
    }

    #[test]
    fn positive_decimal_detection() {
        assert!(is_positive_decimal("1"));
        assert!(is_positive_decimal("0.001"));
        assert!(!is_positive_decimal("0"));
        assert!(!is_positive_decimal("0.000"));
        assert!(!is_positive_decimal("-1"));
        assert!(!is_positive_decimal(""));
        assert!(!is_positive_decimal("one"));
    }

    #[test]
    fn word_is_big_endian() {
        let word = to_word(U256::from(0x45u64));
        assert_eq!(word[31], 0x45);
        assert_eq!(&word[..31], &[0u8; 31]);
    }
}
