//! Per-row validation rules.
//!
//! Each rule yields a user-facing message. A row is accepted only when no
//! rule fires. Messages are produced in a fixed order so the output is
//! stable across runs.

use chain_eth::address::is_address;
use chain_eth::units::{is_positive_decimal, parse_uint, parse_units};

use crate::types::{AssetTransfer, CollectibleTransfer, CollectibleType, Transfer};

pub fn validate_transfer(transfer: &Transfer) -> Vec<String> {
    match transfer {
        Transfer::Asset(asset) => validate_asset(asset),
        Transfer::Collectible(collectible) => validate_collectible(collectible),
    }
}

pub fn validate_asset(transfer: &AssetTransfer) -> Vec<String> {
    let mut messages = address_messages(transfer.token_address.as_deref(), &transfer.receiver);

    if !is_positive_decimal(&transfer.amount) {
        messages.push(format!(
            "Only positive amounts/values possible: {}",
            transfer.amount
        ));
    } else if let Some(decimals) = transfer.decimals() {
        match parse_units(&transfer.amount, decimals) {
            Ok(units) if units.is_zero() => messages.push(format!(
                "Amount is below the smallest unit of the token: {}",
                transfer.amount
            )),
            Ok(_) => {}
            Err(_) => messages.push(format!(
                "Amount exceeds the uint256 range: {}",
                transfer.amount
            )),
        }
    }

    if let (Some(token_address), None) = (&transfer.token_address, &transfer.token_info) {
        messages.push(format!("No token contract was found at {token_address}"));
    }

    messages
}

pub fn validate_collectible(transfer: &CollectibleTransfer) -> Vec<String> {
    let mut messages = address_messages(Some(&transfer.token_address), &transfer.receiver);
    let token_id = &transfer.token_id;

    if !is_integer(token_id) {
        messages.push(format!("Token IDs must be integer numbers: '{token_id}'"));
    }
    if !is_non_negative_number(token_id) {
        messages.push(format!("Only positive Token IDs possible: '{token_id}'"));
    } else if is_integer(token_id) && parse_uint(token_id).is_err() {
        messages.push(format!("Token ID exceeds the uint256 range: '{token_id}'"));
    }

    match transfer.token_type {
        None => messages.push(format!(
            "No token contract was found at {}",
            transfer.token_address
        )),
        Some(CollectibleType::Erc1155) => {
            if let Some(message) = erc1155_amount_message(transfer.amount.as_deref()) {
                messages.push(message);
            }
        }
        Some(CollectibleType::Erc721) => {}
    }

    messages
}

fn address_messages(token_address: Option<&str>, receiver: &str) -> Vec<String> {
    let mut messages = Vec::new();
    if let Some(token_address) = token_address {
        if !is_address(token_address) {
            messages.push(format!("Invalid Token Address: {token_address}"));
        }
    }
    if receiver.contains(':') {
        messages.push(format!(
            "The chain prefix must match the current network: {receiver}"
        ));
    } else if !is_address(receiver) {
        messages.push(format!("Invalid Receiver Address: {receiver}"));
    }
    messages
}

fn erc1155_amount_message(amount: Option<&str>) -> Option<String> {
    let Some(amount) = amount else {
        return Some("ERC1155 Tokens need a defined value > 0: ".to_string());
    };
    if !is_integer(amount) {
        return Some(format!("Value / amount of ERC1155 must be an integer: {amount}"));
    }
    if !amount.bytes().any(|b| (b'1'..=b'9').contains(&b)) || amount.starts_with('-') {
        return Some(format!("ERC1155 Tokens need a defined value > 0: {amount}"));
    }
    if parse_uint(amount).is_err() {
        return Some(format!("Value / amount of ERC1155 exceeds the uint256 range: {amount}"));
    }
    None
}

/// An optional minus sign followed by at least one digit.
fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_non_negative_number(value: &str) -> bool {
    matches!(value.parse::<f64>(), Ok(number) if number >= 0.0)
}
