//! Lookup services the pipeline depends on.
//!
//! All lookups are fallible. The pipeline never aborts on a provider error;
//! it logs the failure and treats the answer as "not found".

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{CollectibleMetaInfo, CollectibleType, TokenInfo};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Lookup failed: {0}")]
    LookupFailed(String),
}

/// Fungible token metadata and network identity.
#[async_trait]
pub trait TokenInfoProvider: Send + Sync {
    /// Metadata of the ERC-20 contract at `token_address`, `None` if there
    /// is no such token.
    async fn token_info(&self, token_address: &str) -> Result<Option<TokenInfo>, ProviderError>;

    fn native_token_symbol(&self) -> String;

    /// Chain-prefix shortname of the selected network (e.g. `"rin"`).
    async fn selected_network_shortname(&self) -> Result<Option<String>, ProviderError>;
}

/// Collectible contract classification and display metadata.
#[async_trait]
pub trait CollectibleInfoProvider: Send + Sync {
    /// The standard implemented by the contract at `token_address`, `None`
    /// if it implements neither.
    async fn token_info(
        &self,
        token_address: &str,
        token_id: &str,
    ) -> Result<Option<CollectibleType>, ProviderError>;

    async fn fetch_meta_info(
        &self,
        token_address: &str,
        token_id: &str,
        token_type: CollectibleType,
    ) -> Result<CollectibleMetaInfo, ProviderError>;

    /// Address of the sending wallet.
    fn from_address(&self) -> Result<String, ProviderError>;
}

/// Forward and reverse name resolution (ENS).
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn is_enabled(&self) -> bool;

    async fn resolve_name(&self, name: &str) -> Result<Option<String>, ProviderError>;

    async fn lookup_address(&self, address: &str) -> Result<Option<String>, ProviderError>;
}

/// The three providers a parse run needs, borrowed for its duration.
#[derive(Clone, Copy)]
pub struct Providers<'a> {
    pub tokens: &'a dyn TokenInfoProvider,
    pub collectibles: &'a dyn CollectibleInfoProvider,
    pub names: &'a dyn NameResolver,
}

impl<'a> Providers<'a> {
    pub fn new(
        tokens: &'a dyn TokenInfoProvider,
        collectibles: &'a dyn CollectibleInfoProvider,
        names: &'a dyn NameResolver,
    ) -> Self {
        Self {
            tokens,
            collectibles,
            names,
        }
    }
}
