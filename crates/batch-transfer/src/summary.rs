//! Per-token totals of a batch.
//!
//! Totals are accumulated exactly in base units and keep the order in
//! which tokens first appear in the batch.

use std::collections::HashMap;

use alloy_primitives::U256;
use chain_eth::units::{format_units, parse_units};
use serde::Serialize;
use tracing::warn;

use crate::types::{AssetTransfer, CollectibleTransfer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummaryEntry {
    /// `None` for the native coin.
    pub token_address: Option<String>,
    /// Total as a decimal string at `decimals` precision.
    pub amount: String,
    pub decimals: u8,
    pub symbol: Option<String>,
    #[serde(skip)]
    base_units: U256,
}

impl AssetSummaryEntry {
    pub fn base_units(&self) -> U256 {
        self.base_units
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetSummary {
    entries: Vec<AssetSummaryEntry>,
    index: HashMap<Option<String>, usize>,
}

impl AssetSummary {
    pub fn get(&self, token_address: Option<&str>) -> Option<&AssetSummaryEntry> {
        self.index
            .get(&token_address.map(str::to_string))
            .map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetSummaryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectibleSummaryEntry {
    pub token_address: String,
    pub id: String,
    /// Number of transfers of this exact token.
    pub count: usize,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CollectibleSummary {
    entries: Vec<CollectibleSummaryEntry>,
    index: HashMap<(String, String), usize>,
}

impl CollectibleSummary {
    pub fn get(&self, token_address: &str, id: &str) -> Option<&CollectibleSummaryEntry> {
        self.index
            .get(&(token_address.to_string(), id.to_string()))
            .map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectibleSummaryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sums asset transfers per token address.
///
/// Transfers without token metadata or with an unparseable amount cannot
/// be summed and are skipped.
pub fn summarize_assets<'a>(
    transfers: impl IntoIterator<Item = &'a AssetTransfer>,
) -> AssetSummary {
    let mut summary = AssetSummary::default();

    for transfer in transfers {
        let Some(decimals) = transfer.decimals() else {
            warn!(token = ?transfer.token_address, "skipping transfer without token metadata");
            continue;
        };
        let amount = match parse_units(&transfer.amount, decimals) {
            Ok(amount) => amount,
            Err(err) => {
                warn!(amount = %transfer.amount, %err, "skipping transfer with unparseable amount");
                continue;
            }
        };

        let key = transfer.token_address.clone();
        match summary.index.get(&key) {
            Some(&i) => {
                let entry = &mut summary.entries[i];
                entry.base_units = entry.base_units.saturating_add(amount);
                entry.amount = format_units(entry.base_units, entry.decimals);
            }
            None => {
                summary.index.insert(key.clone(), summary.entries.len());
                summary.entries.push(AssetSummaryEntry {
                    token_address: key,
                    amount: format_units(amount, decimals),
                    decimals,
                    symbol: transfer.symbol().map(str::to_string),
                    base_units: amount,
                });
            }
        }
    }

    summary
}

/// Counts collectible transfers per `(token_address, id)`.
pub fn summarize_collectibles<'a>(
    transfers: impl IntoIterator<Item = &'a CollectibleTransfer>,
) -> CollectibleSummary {
    let mut summary = CollectibleSummary::default();

    for transfer in transfers {
        let key = (transfer.token_address.clone(), transfer.token_id.clone());
        match summary.index.get(&key) {
            Some(&i) => summary.entries[i].count += 1,
            None => {
                summary.index.insert(key.clone(), summary.entries.len());
                summary.entries.push(CollectibleSummaryEntry {
                    token_address: key.0,
                    id: key.1,
                    count: 1,
                    name: transfer.token_name.clone(),
                });
            }
        }
    }

    summary
}
