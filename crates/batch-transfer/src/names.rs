//! Optional enrichment of accepted transfers for display.

use chain_eth::address::is_address;
use futures::future::join_all;
use serde::Serialize;
use tracing::warn;

use crate::provider::{CollectibleInfoProvider, NameResolver};
use crate::types::{CollectibleMetaInfo, Transfer};

/// Fills in `receiver_ens_name` by reverse lookup for receivers that were
/// given as plain addresses. Lookups run concurrently; failures leave the
/// name unset.
pub async fn lookup_receiver_names(
    transfers: Vec<Transfer>,
    names: &dyn NameResolver,
) -> Vec<Transfer> {
    if !names.is_enabled().await {
        return transfers;
    }

    join_all(transfers.into_iter().map(|transfer| async move {
        if transfer.receiver_ens_name().is_some() || !is_address(transfer.receiver()) {
            return transfer;
        }
        match names.lookup_address(transfer.receiver()).await {
            Ok(Some(name)) => transfer.with_receiver_ens_name(Some(name)),
            Ok(None) => transfer,
            Err(err) => {
                warn!(receiver = %transfer.receiver(), %err, "reverse name lookup failed");
                transfer
            }
        }
    }))
    .await
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectiblePreview {
    pub token_address: String,
    pub token_id: String,
    pub meta: CollectibleMetaInfo,
}

/// Fetches display metadata for every classified collectible transfer.
pub async fn fetch_collectible_previews(
    transfers: &[Transfer],
    collectibles: &dyn CollectibleInfoProvider,
) -> Vec<CollectiblePreview> {
    let pending = transfers.iter().filter_map(|transfer| match transfer {
        Transfer::Collectible(collectible) => collectible
            .token_type
            .map(|token_type| (collectible, token_type)),
        Transfer::Asset(_) => None,
    });

    join_all(pending.map(|(collectible, token_type)| async move {
        let meta = collectibles
            .fetch_meta_info(&collectible.token_address, &collectible.token_id, token_type)
            .await
            .unwrap_or_else(|err| {
                warn!(
                    token = %collectible.token_address,
                    id = %collectible.token_id,
                    %err,
                    "metadata fetch failed"
                );
                CollectibleMetaInfo::default()
            });
        CollectiblePreview {
            token_address: collectible.token_address.clone(),
            token_id: collectible.token_id.clone(),
            meta,
        }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::memory::{
        DisabledNameResolver, StaticCollectibleProvider, StaticNameResolver,
    };
    use crate::types::{AssetTransfer, AssetType, CollectibleTransfer, CollectibleType, TokenInfo};

    const RECEIVER_1: &str = "0x1000000000000000000000000000000000000000";
    const RECEIVER_2: &str = "0x2000000000000000000000000000000000000000";
    const ERC721: &str = "0x5500000000000000000000000000000000000000";

    fn native(receiver: &str, alias: Option<&str>) -> Transfer {
        Transfer::Asset(AssetTransfer {
            token_type: AssetType::Native,
            receiver: receiver.into(),
            amount: "1".into(),
            token_address: None,
            token_info: Some(TokenInfo {
                decimals: 18,
                symbol: Some("ETH".into()),
            }),
            receiver_ens_name: alias.map(str::to_string),
        })
    }

    fn nft(token_type: Option<CollectibleType>, id: &str) -> Transfer {
        Transfer::Collectible(CollectibleTransfer {
            token_type,
            from: RECEIVER_1.into(),
            receiver: RECEIVER_2.into(),
            token_address: ERC721.into(),
            token_id: id.into(),
            token_name: None,
            amount: None,
            receiver_ens_name: None,
        })
    }

    #[tokio::test]
    async fn fills_missing_names_only() {
        let names = StaticNameResolver::new()
            .with_name("receiver1.eth", RECEIVER_1)
            .with_name("receiver2.eth", RECEIVER_2);
        let transfers = vec![
            native(RECEIVER_1, None),
            native(RECEIVER_2, Some("alias.eth")),
            native("0x3000000000000000000000000000000000000000", None),
        ];

        let named = lookup_receiver_names(transfers, &names).await;
        let aliases: Vec<_> = named.iter().map(Transfer::receiver_ens_name).collect();
        assert_eq!(aliases, vec![Some("receiver1.eth"), Some("alias.eth"), None]);
    }

    #[tokio::test]
    async fn disabled_resolver_changes_nothing() {
        let transfers = vec![native(RECEIVER_1, None)];
        let named = lookup_receiver_names(transfers.clone(), &DisabledNameResolver).await;
        assert_eq!(named, transfers);
    }

    #[tokio::test]
    async fn previews_skip_unclassified_collectibles() {
        let collectibles = StaticCollectibleProvider::new().with_meta_info(
            ERC721,
            "69",
            CollectibleMetaInfo {
                image_uri: Some("ipfs://69".into()),
                name: Some("Nice".into()),
            },
        );
        let transfers = [
            nft(Some(CollectibleType::Erc721), "69"),
            nft(None, "1"),
            native(RECEIVER_1, None),
            nft(Some(CollectibleType::Erc721), "70"),
        ];

        let previews = fetch_collectible_previews(&transfers, &collectibles).await;
        assert_eq!(previews.len(), 2);
        assert_eq!(previews[0].meta.name.as_deref(), Some("Nice"));
        assert_eq!(previews[1].token_id, "70");
        assert_eq!(previews[1].meta, CollectibleMetaInfo::default());
    }
}
