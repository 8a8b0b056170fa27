//! Providers backed by fixed in-memory tables.
//!
//! Addresses are matched case-insensitively. Useful for offline runs,
//! pre-fetched token lists, and tests.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{CollectibleInfoProvider, NameResolver, ProviderError, TokenInfoProvider};
use crate::types::{CollectibleMetaInfo, CollectibleType, TokenInfo};

/// Token metadata from a known token list.
#[derive(Debug, Clone, Default)]
pub struct TokenListProvider {
    tokens: HashMap<String, TokenInfo>,
    native_symbol: String,
    shortname: Option<String>,
}

impl TokenListProvider {
    pub fn new(native_symbol: impl Into<String>) -> Self {
        Self {
            tokens: HashMap::new(),
            native_symbol: native_symbol.into(),
            shortname: None,
        }
    }

    pub fn with_shortname(mut self, shortname: impl Into<String>) -> Self {
        self.shortname = Some(shortname.into());
        self
    }

    pub fn with_token(mut self, address: &str, decimals: u8, symbol: Option<&str>) -> Self {
        self.tokens.insert(
            address.to_lowercase(),
            TokenInfo {
                decimals,
                symbol: symbol.map(str::to_string),
            },
        );
        self
    }
}

#[async_trait]
impl TokenInfoProvider for TokenListProvider {
    async fn token_info(&self, token_address: &str) -> Result<Option<TokenInfo>, ProviderError> {
        Ok(self.tokens.get(&token_address.to_lowercase()).cloned())
    }

    fn native_token_symbol(&self) -> String {
        self.native_symbol.clone()
    }

    async fn selected_network_shortname(&self) -> Result<Option<String>, ProviderError> {
        Ok(self.shortname.clone())
    }
}

/// Collectible contracts with a known standard.
#[derive(Debug, Clone, Default)]
pub struct StaticCollectibleProvider {
    contracts: HashMap<String, CollectibleType>,
    meta: HashMap<(String, String), CollectibleMetaInfo>,
    from_address: Option<String>,
}

impl StaticCollectibleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from_address(mut self, address: impl Into<String>) -> Self {
        self.from_address = Some(address.into());
        self
    }

    pub fn with_contract(mut self, address: &str, token_type: CollectibleType) -> Self {
        self.contracts.insert(address.to_lowercase(), token_type);
        self
    }

    pub fn with_meta_info(
        mut self,
        address: &str,
        token_id: &str,
        meta: CollectibleMetaInfo,
    ) -> Self {
        self.meta.insert((address.to_lowercase(), token_id.to_string()), meta);
        self
    }
}

#[async_trait]
impl CollectibleInfoProvider for StaticCollectibleProvider {
    async fn token_info(
        &self,
        token_address: &str,
        _token_id: &str,
    ) -> Result<Option<CollectibleType>, ProviderError> {
        Ok(self.contracts.get(&token_address.to_lowercase()).copied())
    }

    async fn fetch_meta_info(
        &self,
        token_address: &str,
        token_id: &str,
        _token_type: CollectibleType,
    ) -> Result<CollectibleMetaInfo, ProviderError> {
        Ok(self
            .meta
            .get(&(token_address.to_lowercase(), token_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn from_address(&self) -> Result<String, ProviderError> {
        self.from_address
            .clone()
            .ok_or_else(|| ProviderError::Unavailable("no sending wallet configured".into()))
    }
}

/// Name resolution from a fixed name table.
#[derive(Debug, Clone)]
pub struct StaticNameResolver {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
}

impl StaticNameResolver {
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    /// Registers `name` for `address` in both directions.
    pub fn with_name(mut self, name: &str, address: &str) -> Self {
        self.forward.insert(name.to_string(), address.to_string());
        self.reverse.insert(address.to_lowercase(), name.to_string());
        self
    }
}

impl Default for StaticNameResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameResolver for StaticNameResolver {
    async fn is_enabled(&self) -> bool {
        true
    }

    async fn resolve_name(&self, name: &str) -> Result<Option<String>, ProviderError> {
        Ok(self.forward.get(name).cloned())
    }

    async fn lookup_address(&self, address: &str) -> Result<Option<String>, ProviderError> {
        Ok(self.reverse.get(&address.to_lowercase()).cloned())
    }
}

/// For networks without a name service.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNameResolver;

#[async_trait]
impl NameResolver for DisabledNameResolver {
    async fn is_enabled(&self) -> bool {
        false
    }

    async fn resolve_name(&self, _name: &str) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }

    async fn lookup_address(&self, _address: &str) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }
}
