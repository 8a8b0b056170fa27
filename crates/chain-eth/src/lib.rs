//! Ethereum/EVM primitives for batch token transfers.
//!
//! This crate provides:
//! - Address validation and EIP-55 checksum normalisation
//! - Minimal ABI encoding utilities (static words and dynamic bytes)
//! - ERC-20, ERC-721 and ERC-1155 transfer calldata encoding
//! - Decimal amount ↔ base unit conversion

pub mod abi;
pub mod address;
pub mod erc1155;
pub mod erc20;
pub mod erc721;
pub mod error;
pub mod units;

pub use alloy_primitives::U256;
