//! Turns raw CSV rows into typed transfer records.
//!
//! Transformation never fails. Lookups that fail leave the record in a
//! state the validator will reject with a readable message.

use chain_eth::address::{is_address, normalize_address, ZERO_ADDRESS};
use chain_eth::units::NATIVE_DECIMALS;
use tracing::{debug, warn};

use crate::provider::{CollectibleInfoProvider, NameResolver, Providers, TokenInfoProvider};
use crate::types::{
    AssetTransfer, AssetType, CollectibleTransfer, CollectibleType, CsvRow, TokenInfo, Transfer,
};

/// Transforms one row, dispatching on its `token_type` column.
///
/// `nft`, `erc721` and `erc1155` take the collectible path. Everything
/// else, including a missing or unknown type, is treated as a fungible
/// asset.
pub async fn transform_row(row: &CsvRow, providers: Providers<'_>) -> Transfer {
    let shortname = network_shortname(providers.tokens).await;
    let receiver =
        strip_network_prefix(row.receiver.as_deref().unwrap_or(""), shortname.as_deref());

    let token_type = row.token_type.as_deref().map(str::to_ascii_lowercase);
    match token_type.as_deref() {
        Some("nft" | "erc721" | "erc1155") => {
            Transfer::Collectible(transform_collectible(row, receiver, providers).await)
        }
        _ => Transfer::Asset(transform_asset(row, receiver, providers).await),
    }
}

async fn transform_asset(row: &CsvRow, receiver: &str, providers: Providers<'_>) -> AssetTransfer {
    let amount = row
        .amount
        .as_ref()
        .or(row.value.as_ref())
        .cloned()
        .unwrap_or_default();
    let (receiver, receiver_ens_name) =
        resolve_receiver(normalize_address(receiver), providers.names).await;

    let token_address = match row.token_address.as_deref() {
        None | Some("") => {
            return AssetTransfer {
                token_type: AssetType::Native,
                receiver,
                amount,
                token_address: None,
                token_info: Some(TokenInfo {
                    decimals: NATIVE_DECIMALS,
                    symbol: Some(providers.tokens.native_token_symbol()),
                }),
                receiver_ens_name,
            };
        }
        Some(address) => normalize_address(address),
    };

    let resolved = if is_address(&token_address) {
        Some(token_address.clone())
    } else {
        resolve_name(&token_address, providers.names)
            .await
            .map(|address| normalize_address(&address))
    };

    let (token_address, token_info) = match resolved {
        Some(address) => match lookup_token(&address, providers.tokens).await {
            Some(info) => (address, Some(info)),
            None => (token_address, None),
        },
        None => (token_address, None),
    };

    AssetTransfer {
        token_type: AssetType::Erc20,
        receiver,
        amount,
        token_address: Some(token_address),
        token_info,
        receiver_ens_name,
    }
}

async fn transform_collectible(
    row: &CsvRow,
    receiver: &str,
    providers: Providers<'_>,
) -> CollectibleTransfer {
    let amount = row
        .amount
        .as_ref()
        .or(row.value.as_ref())
        .filter(|amount| !amount.is_empty())
        .cloned()
        .unwrap_or_else(|| "1".to_string());
    let token_address = normalize_address(row.token_address.as_deref().unwrap_or(""));
    let token_id = row.id.clone().unwrap_or_default();

    let from = match providers.collectibles.from_address() {
        Ok(address) => address,
        Err(err) => {
            debug!(%err, "no sending wallet, using the zero address");
            ZERO_ADDRESS.to_string()
        }
    };

    let (receiver, receiver_ens_name) =
        resolve_receiver(normalize_address(receiver), providers.names).await;
    let token_type = classify_collectible(&token_address, &token_id, providers.collectibles).await;

    CollectibleTransfer {
        token_type,
        from,
        receiver,
        token_address,
        token_id,
        token_name: None,
        amount: match token_type {
            Some(CollectibleType::Erc1155) => Some(amount),
            Some(CollectibleType::Erc721) | None => None,
        },
        receiver_ens_name,
    }
}

/// Strips a leading `"<shortname>:"` when it names the selected network.
/// Any other prefix is kept so validation can report it. An empty
/// shortname matches nothing.
fn strip_network_prefix<'a>(receiver: &'a str, shortname: Option<&str>) -> &'a str {
    let Some(shortname) = shortname.filter(|shortname| !shortname.is_empty()) else {
        return receiver;
    };
    receiver
        .trim()
        .strip_prefix(shortname)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(receiver)
}

/// Returns the receiver address and, when it was resolved from a name, the
/// name it was written as.
async fn resolve_receiver(receiver: String, names: &dyn NameResolver) -> (String, Option<String>) {
    if is_address(&receiver) {
        return (receiver, None);
    }
    match resolve_name(&receiver, names).await {
        Some(address) => (normalize_address(&address), Some(receiver)),
        None => (receiver, None),
    }
}

async fn resolve_name(name: &str, names: &dyn NameResolver) -> Option<String> {
    if !names.is_enabled().await {
        return None;
    }
    match names.resolve_name(name).await {
        Ok(address) => address,
        Err(err) => {
            warn!(%name, %err, "name resolution failed");
            None
        }
    }
}

async fn network_shortname(tokens: &dyn TokenInfoProvider) -> Option<String> {
    match tokens.selected_network_shortname().await {
        Ok(shortname) => shortname,
        Err(err) => {
            warn!(%err, "could not determine the selected network");
            None
        }
    }
}

async fn lookup_token(address: &str, tokens: &dyn TokenInfoProvider) -> Option<TokenInfo> {
    match tokens.token_info(address).await {
        Ok(info) => info,
        Err(err) => {
            warn!(%address, %err, "token lookup failed");
            None
        }
    }
}

async fn classify_collectible(
    address: &str,
    token_id: &str,
    collectibles: &dyn CollectibleInfoProvider,
) -> Option<CollectibleType> {
    match collectibles.token_info(address, token_id).await {
        Ok(token_type) => token_type,
        Err(err) => {
            warn!(%address, %token_id, %err, "collectible lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::memory::{
        StaticCollectibleProvider, StaticNameResolver, TokenListProvider,
    };
    use crate::provider::ProviderError;
    use async_trait::async_trait;

    const RECEIVER: &str = "0x1000000000000000000000000000000000000000";
    const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
    const ERC721: &str = "0x5500000000000000000000000000000000000000";
    const ERC1155: &str = "0x88b48f654c30e99bc2e4a1559b4dcf1ad93fa656";
    const SAFE: &str = "0x0000000000000000000000000000000000005AFE";

    struct FailingNames;

    #[async_trait]
    impl NameResolver for FailingNames {
        async fn is_enabled(&self) -> bool {
            true
        }

        async fn resolve_name(&self, name: &str) -> Result<Option<String>, ProviderError> {
            Err(ProviderError::LookupFailed(format!("cannot resolve {name}")))
        }

        async fn lookup_address(&self, _address: &str) -> Result<Option<String>, ProviderError> {
            Ok(None)
        }
    }

    fn tokens() -> TokenListProvider {
        TokenListProvider::new("ETH")
            .with_shortname("rin")
            .with_token(DAI, 18, Some("DAI"))
    }

    fn collectibles() -> StaticCollectibleProvider {
        StaticCollectibleProvider::new()
            .with_from_address(SAFE)
            .with_contract(ERC721, CollectibleType::Erc721)
            .with_contract(ERC1155, CollectibleType::Erc1155)
    }

    fn names() -> StaticNameResolver {
        StaticNameResolver::new()
            .with_name("receiver1.eth", RECEIVER)
            .with_name("token.eth", DAI)
    }

    fn row(
        token_type: &str,
        token_address: &str,
        receiver: &str,
        amount: &str,
        id: &str,
    ) -> CsvRow {
        let cell = |value: &str| Some(value.to_string());
        CsvRow {
            token_type: cell(token_type),
            token_address: cell(token_address),
            receiver: cell(receiver),
            value: None,
            amount: cell(amount),
            id: cell(id),
        }
    }

    async fn run(row: &CsvRow) -> Transfer {
        let (tokens, collectibles, names) = (tokens(), collectibles(), names());
        transform_row(row, Providers::new(&tokens, &collectibles, &names)).await
    }

    fn asset(transfer: Transfer) -> AssetTransfer {
        match transfer {
            Transfer::Asset(asset) => asset,
            other => panic!("expected an asset transfer, got {other:?}"),
        }
    }

    fn collectible(transfer: Transfer) -> CollectibleTransfer {
        match transfer {
            Transfer::Collectible(collectible) => collectible,
            other => panic!("expected a collectible transfer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_token_address_is_native() {
        let transfer = asset(run(&row("erc20", "", RECEIVER, "1", "")).await);
        assert_eq!(transfer.token_type, AssetType::Native);
        assert_eq!(transfer.token_address, None);
        assert_eq!(transfer.decimals(), Some(18));
        assert_eq!(transfer.symbol(), Some("ETH"));
        assert_eq!(transfer.receiver_ens_name, None);
    }

    #[tokio::test]
    async fn native_with_token_address_becomes_erc20() {
        let transfer = asset(run(&row("native", &DAI.to_lowercase(), RECEIVER, "1", "")).await);
        assert_eq!(transfer.token_type, AssetType::Erc20);
        assert_eq!(transfer.token_address.as_deref(), Some(DAI));
        assert_eq!(transfer.symbol(), Some("DAI"));
    }

    #[tokio::test]
    async fn unknown_type_falls_back_to_erc20() {
        let transfer = asset(run(&row("shitcoin", DAI, RECEIVER, "1", "")).await);
        assert_eq!(transfer.token_type, AssetType::Erc20);
        assert_eq!(transfer.decimals(), Some(18));
    }

    #[tokio::test]
    async fn blank_or_missing_type_is_the_same_as_erc20() {
        let erc20 = run(&row("erc20", DAI, RECEIVER, "1", "")).await;
        assert_eq!(run(&row("", DAI, RECEIVER, "1", "")).await, erc20);

        let mut untyped = row("", DAI, RECEIVER, "1", "");
        untyped.token_type = None;
        assert_eq!(run(&untyped).await, erc20);
    }

    #[tokio::test]
    async fn unlisted_token_keeps_address_without_metadata() {
        let transfer = asset(run(&row("erc20", ERC721, RECEIVER, "1", "")).await);
        assert_eq!(transfer.token_address.as_deref(), Some(ERC721));
        assert_eq!(transfer.token_info, None);
    }

    #[tokio::test]
    async fn token_name_is_resolved() {
        let transfer = asset(run(&row("erc20", "token.eth", RECEIVER, "1", "")).await);
        assert_eq!(transfer.token_address.as_deref(), Some(DAI));
        assert_eq!(transfer.symbol(), Some("DAI"));
    }

    #[tokio::test]
    async fn receiver_name_is_resolved_and_kept_as_alias() {
        let transfer = asset(run(&row("native", "", "receiver1.eth", "1", "")).await);
        assert_eq!(transfer.receiver, RECEIVER);
        assert_eq!(transfer.receiver_ens_name.as_deref(), Some("receiver1.eth"));
    }

    #[tokio::test]
    async fn unresolvable_receiver_is_kept_verbatim() {
        let transfer = asset(run(&row("native", "", "unknown.eth", "1", "")).await);
        assert_eq!(transfer.receiver, "unknown.eth");
        assert_eq!(transfer.receiver_ens_name, None);
    }

    #[tokio::test]
    async fn failing_resolver_is_treated_as_unresolved() {
        let (tokens, collectibles) = (tokens(), collectibles());
        let providers = Providers::new(&tokens, &collectibles, &FailingNames);
        let input = row("native", "", "error.eth", "1", "");
        let transfer = asset(transform_row(&input, providers).await);
        assert_eq!(transfer.receiver, "error.eth");
        assert_eq!(transfer.receiver_ens_name, None);
    }

    #[tokio::test]
    async fn matching_chain_prefix_is_stripped() {
        let prefixed = format!("rin:{RECEIVER}");
        let transfer = asset(run(&row("native", "", &prefixed, "1", "")).await);
        assert_eq!(transfer.receiver, RECEIVER);

        let foreign = format!("eth:{RECEIVER}");
        let transfer = asset(run(&row("native", "", &foreign, "1", "")).await);
        assert_eq!(transfer.receiver, foreign);
    }

    #[tokio::test]
    async fn value_column_is_used_when_amount_is_absent() {
        let mut input = row("native", "", RECEIVER, "", "");
        input.amount = None;
        input.value = Some("2.5".into());
        assert_eq!(asset(run(&input).await).amount, "2.5");
    }

    #[tokio::test]
    async fn erc721_drops_amount() {
        let transfer = collectible(run(&row("nft", ERC721, RECEIVER, "5", "69")).await);
        assert_eq!(transfer.token_type, Some(CollectibleType::Erc721));
        assert_eq!(transfer.from, SAFE);
        assert_eq!(transfer.token_id, "69");
        assert_eq!(transfer.amount, None);
    }

    #[tokio::test]
    async fn erc1155_amount_defaults_to_one() {
        let transfer = collectible(run(&row("erc1155", ERC1155, RECEIVER, "", "420")).await);
        assert_eq!(transfer.token_type, Some(CollectibleType::Erc1155));
        assert_eq!(transfer.amount.as_deref(), Some("1"));
        assert_eq!(
            transfer.token_address,
            normalize_address(ERC1155),
            "contract addresses are checksummed"
        );
    }

    #[tokio::test]
    async fn unknown_collectible_contract_is_unresolved() {
        let transfer = collectible(run(&row("nft", DAI, RECEIVER, "", "1")).await);
        assert_eq!(transfer.token_type, None);
        assert_eq!(Transfer::Collectible(transfer).token_type(), crate::types::TokenType::Erc721);
    }

    #[tokio::test]
    async fn missing_wallet_sends_from_zero_address() {
        let tokens = tokens();
        let collectibles =
            StaticCollectibleProvider::new().with_contract(ERC721, CollectibleType::Erc721);
        let names = names();
        let providers = Providers::new(&tokens, &collectibles, &names);
        let input = row("erc721", ERC721, RECEIVER, "", "1");
        let transfer = collectible(transform_row(&input, providers).await);
        assert_eq!(transfer.from, ZERO_ADDRESS);
    }

    #[test]
    fn strip_prefix_requires_exact_shortname() {
        assert_eq!(strip_network_prefix("rin:0xabc", Some("rin")), "0xabc");
        assert_eq!(strip_network_prefix(" rin:0xabc", Some("rin")), "0xabc");
        assert_eq!(strip_network_prefix("rinkeby:0xabc", Some("rin")), "rinkeby:0xabc");
        assert_eq!(strip_network_prefix("rin:0xabc", None), "rin:0xabc");
    }

    #[test]
    fn empty_shortname_strips_nothing() {
        assert_eq!(strip_network_prefix(":0xabc", Some("")), ":0xabc");
        assert_eq!(strip_network_prefix("rin:0xabc", Some("")), "rin:0xabc");
    }

    #[tokio::test]
    async fn empty_shortname_leaves_colon_for_validation() {
        let tokens = TokenListProvider::new("ETH").with_shortname("");
        let (collectibles, names) = (collectibles(), names());
        let providers = Providers::new(&tokens, &collectibles, &names);
        let input = row("native", "", &format!(":{RECEIVER}"), "1", "");
        let transfer = asset(transform_row(&input, providers).await);
        assert_eq!(transfer.receiver, format!(":{RECEIVER}"));
    }
}
