use serde::{Deserialize, Serialize};

/// One raw data row. A field is `Some` whenever its column is present in the
/// header, even if the cell is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    pub token_type: Option<String>,
    pub token_address: Option<String>,
    pub receiver: Option<String>,
    pub value: Option<String>,
    pub amount: Option<String>,
    pub id: Option<String>,
}

/// Token standard of a transfer as reported to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Native,
    Erc20,
    Erc721,
    Erc1155,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Native => "native",
            TokenType::Erc20 => "erc20",
            TokenType::Erc721 => "erc721",
            TokenType::Erc1155 => "erc1155",
        }
    }
}

/// Fungible transfer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Native,
    Erc20,
}

/// Collectible contract standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectibleType {
    Erc721,
    Erc1155,
}

/// Fungible token metadata as reported by a
/// [`TokenInfoProvider`](crate::provider::TokenInfoProvider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub decimals: u8,
    pub symbol: Option<String>,
}

/// Display metadata for a collectible. Never used for validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectibleMetaInfo {
    pub image_uri: Option<String>,
    pub name: Option<String>,
}

/// A native coin or ERC-20 transfer.
///
/// `token_address` is `None` exactly when `token_type` is `Native`.
/// `token_info` is `None` when no token contract answered at `token_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfer {
    #[serde(rename = "token_type")]
    pub token_type: AssetType,
    pub receiver: String,
    /// Human-readable decimal amount, as written in the CSV.
    pub amount: String,
    pub token_address: Option<String>,
    pub token_info: Option<TokenInfo>,
    pub receiver_ens_name: Option<String>,
}

impl AssetTransfer {
    pub fn decimals(&self) -> Option<u8> {
        self.token_info.as_ref().map(|info| info.decimals)
    }

    pub fn symbol(&self) -> Option<&str> {
        self.token_info.as_ref().and_then(|info| info.symbol.as_deref())
    }
}

/// An ERC-721 or ERC-1155 transfer.
///
/// `token_type` is `None` when the contract could not be classified; such a
/// record reports itself as ERC-721 and never passes validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectibleTransfer {
    #[serde(rename = "token_type")]
    pub token_type: Option<CollectibleType>,
    pub from: String,
    pub receiver: String,
    pub token_address: String,
    /// Decimal token id, as written in the CSV.
    pub token_id: String,
    pub token_name: Option<String>,
    /// Only set for ERC-1155.
    pub amount: Option<String>,
    pub receiver_ens_name: Option<String>,
}

/// A transformed CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Transfer {
    Asset(AssetTransfer),
    Collectible(CollectibleTransfer),
}

impl Transfer {
    pub fn token_type(&self) -> TokenType {
        match self {
            Transfer::Asset(asset) => match asset.token_type {
                AssetType::Native => TokenType::Native,
                AssetType::Erc20 => TokenType::Erc20,
            },
            Transfer::Collectible(collectible) => match collectible.token_type {
                Some(CollectibleType::Erc1155) => TokenType::Erc1155,
                Some(CollectibleType::Erc721) | None => TokenType::Erc721,
            },
        }
    }

    pub fn receiver(&self) -> &str {
        match self {
            Transfer::Asset(asset) => &asset.receiver,
            Transfer::Collectible(collectible) => &collectible.receiver,
        }
    }

    pub fn token_address(&self) -> Option<&str> {
        match self {
            Transfer::Asset(asset) => asset.token_address.as_deref(),
            Transfer::Collectible(collectible) => Some(&collectible.token_address),
        }
    }

    pub fn receiver_ens_name(&self) -> Option<&str> {
        match self {
            Transfer::Asset(asset) => asset.receiver_ens_name.as_deref(),
            Transfer::Collectible(collectible) => collectible.receiver_ens_name.as_deref(),
        }
    }

    pub(crate) fn with_receiver_ens_name(mut self, name: Option<String>) -> Self {
        match &mut self {
            Transfer::Asset(asset) => asset.receiver_ens_name = name,
            Transfer::Collectible(collectible) => collectible.receiver_ens_name = name,
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A problem tied to a CSV line. Line 0 refers to the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeWarning {
    pub message: String,
    pub severity: Severity,
    pub line_num: usize,
}

/// Result of parsing one CSV batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedBatch {
    /// Rows that passed validation, in line order.
    pub transfers: Vec<Transfer>,
    /// Header errors, syntax errors and validation warnings, in line order.
    pub warnings: Vec<CodeWarning>,
}

/// A contract call ready to be bundled into a multi-send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTransaction {
    pub to: String,
    /// Native value in wei, as a decimal string.
    pub value: String,
    /// 0x-prefixed calldata.
    pub data: String,
}
