//! Checks a batch against the sending wallet's balances.
//!
//! Balance entries mirror the Safe transaction service JSON.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::summary::{summarize_assets, summarize_collectibles, AssetSummaryEntry};
use crate::types::{CollectibleType, TokenType, Transfer};

/// Label used for the native coin when no balance entry names it.
const DEFAULT_NATIVE_SYMBOL: &str = "ETH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceToken {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub decimals: Option<u8>,
}

/// Fungible balance. `token_address` is `None` for the native coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalanceEntry {
    pub token_address: Option<String>,
    #[serde(default)]
    pub token: Option<BalanceToken>,
    /// Balance in base units, as a decimal string.
    pub balance: String,
}

/// One owned collectible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftBalanceEntry {
    pub address: String,
    pub token_name: String,
    pub token_symbol: String,
    pub id: String,
    #[serde(default)]
    pub image_uri: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsufficientBalanceInfo {
    /// Symbol, name or address of the token.
    pub token: String,
    #[serde(rename = "token_type")]
    pub token_type: TokenType,
    /// Requested total, for fungible tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_amount: Option<String>,
    /// Set when the same collectible is transferred more than once.
    pub is_duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Returns every token the batch needs more of than the wallet holds.
///
/// Missing balance lists are treated as empty. Fungible tokens are reported
/// in the order they first appear in the batch, followed by ERC-721 tokens.
/// ERC-1155 transfers are not checked.
pub fn check_all_balances(
    asset_balance: Option<&[AssetBalanceEntry]>,
    collectible_balance: Option<&[NftBalanceEntry]>,
    transfers: &[Transfer],
) -> Vec<InsufficientBalanceInfo> {
    let asset_balance = asset_balance.unwrap_or_default();
    let collectible_balance = collectible_balance.unwrap_or_default();

    let assets = summarize_assets(transfers.iter().filter_map(|transfer| match transfer {
        Transfer::Asset(asset) => Some(asset),
        Transfer::Collectible(_) => None,
    }));
    let collectibles =
        summarize_collectibles(transfers.iter().filter_map(|transfer| match transfer {
            Transfer::Collectible(collectible)
                if collectible.token_type == Some(CollectibleType::Erc721) =>
            {
                Some(collectible)
            }
            _ => None,
        }));

    let mut insufficient = Vec::new();

    for entry in assets.iter() {
        if let Some(info) = check_asset(entry, asset_balance) {
            insufficient.push(info);
        }
    }

    for entry in collectibles.iter() {
        let same_contract = |balance: &&NftBalanceEntry| {
            balance.address.eq_ignore_ascii_case(&entry.token_address)
        };
        let owned = collectible_balance
            .iter()
            .filter(same_contract)
            .find(|balance| balance.id == entry.id);
        if owned.is_some() && entry.count <= 1 {
            continue;
        }

        let token = entry
            .name
            .clone()
            .or_else(|| owned.map(|balance| balance.token_name.clone()))
            .or_else(|| {
                collectible_balance
                    .iter()
                    .find(same_contract)
                    .map(|balance| balance.token_name.clone())
            })
            .unwrap_or_else(|| entry.token_address.clone());
        insufficient.push(InsufficientBalanceInfo {
            token,
            token_type: TokenType::Erc721,
            transfer_amount: None,
            is_duplicate: entry.count > 1,
            id: Some(entry.id.clone()),
        });
    }

    insufficient
}

fn check_asset(
    entry: &AssetSummaryEntry,
    balances: &[AssetBalanceEntry],
) -> Option<InsufficientBalanceInfo> {
    let (balance, token, token_type) = match &entry.token_address {
        None => {
            let balance = balances.iter().find(|balance| balance.token_address.is_none());
            let token = balance
                .and_then(|balance| balance.token.as_ref())
                .map(|token| token.symbol.clone())
                .filter(|symbol| !symbol.is_empty())
                .or_else(|| entry.symbol.clone())
                .unwrap_or_else(|| DEFAULT_NATIVE_SYMBOL.to_string());
            (balance, token, TokenType::Native)
        }
        Some(token_address) => {
            let balance = balances.iter().find(|balance| {
                balance
                    .token_address
                    .as_deref()
                    .is_some_and(|address| address.eq_ignore_ascii_case(token_address))
            });
            let token = entry
                .symbol
                .clone()
                .filter(|symbol| !symbol.is_empty())
                .unwrap_or_else(|| token_address.clone());
            (balance, token, TokenType::Erc20)
        }
    };

    if balance.is_some_and(|balance| is_sufficient(&balance.balance, entry.base_units())) {
        return None;
    }
    Some(InsufficientBalanceInfo {
        token,
        token_type,
        transfer_amount: Some(entry.amount.clone()),
        is_duplicate: false,
        id: None,
    })
}

fn is_sufficient(balance: &str, required: U256) -> bool {
    match U256::from_str_radix(balance, 10) {
        Ok(balance) => balance >= required,
        Err(err) => {
            warn!(%balance, %err, "unparseable balance, treating it as insufficient");
            false
        }
    }
}
