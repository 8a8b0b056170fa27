//! Batch token transfers from CSV.
//!
//! Pipeline stages:
//! - [`parse`]: line limit, header check and row reading
//! - [`transform`]: raw rows to typed transfers via the [`provider`] traits
//! - [`validate`] and [`warnings`]: per-row findings with line numbers
//! - [`summary`] and [`balance`]: per-token totals checked against wallet balances
//! - [`transaction`]: calldata for the accepted transfers
//!
//! [`names`] adds optional display data (reverse ENS names, collectible
//! previews) to accepted transfers.

pub mod balance;
pub mod config;
pub mod error;
pub mod names;
pub mod parse;
pub mod provider;
pub mod summary;
pub mod transaction;
pub mod transform;
pub mod types;
pub mod validate;
pub mod warnings;

pub use balance::{check_all_balances, InsufficientBalanceInfo};
pub use config::ParseConfig;
pub use error::TransferError;
pub use parse::{parse_csv, parse_csv_with_config};
pub use provider::Providers;
pub use transaction::build_transactions;
pub use types::{CodeWarning, ParsedBatch, Severity, Transfer};
