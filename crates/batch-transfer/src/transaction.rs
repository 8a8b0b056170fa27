//! Encodes accepted transfers into multi-send sub-transactions.

use chain_eth::units::{parse_uint, parse_units, to_word, NATIVE_DECIMALS};
use chain_eth::{erc1155, erc20, erc721};

use crate::error::TransferError;
use crate::types::{AssetTransfer, BaseTransaction, CollectibleTransfer, CollectibleType, Transfer};

/// `data` argument passed to ERC-1155 `safeTransferFrom`.
const ERC1155_TRANSFER_DATA: [u8; 1] = [0x00];

/// Encodes all transfers, in order. Fails on the first transfer that
/// cannot be encoded.
pub fn build_transactions(
    transfers: &[Transfer],
) -> Result<Vec<BaseTransaction>, TransferError> {
    transfers.iter().map(build_transaction).collect()
}

pub fn build_transaction(transfer: &Transfer) -> Result<BaseTransaction, TransferError> {
    match transfer {
        Transfer::Asset(asset) => build_asset_transfer(asset),
        Transfer::Collectible(collectible) => build_collectible_transfer(collectible),
    }
}

/// Native transfers carry the value directly; ERC-20 transfers call
/// `transfer(address,uint256)` on the token contract.
pub fn build_asset_transfer(transfer: &AssetTransfer) -> Result<BaseTransaction, TransferError> {
    let Some(token_address) = &transfer.token_address else {
        let value = parse_units(&transfer.amount, NATIVE_DECIMALS)?;
        return Ok(BaseTransaction {
            to: transfer.receiver.clone(),
            value: value.to_string(),
            data: "0x".to_string(),
        });
    };

    let decimals = transfer.decimals().ok_or_else(|| {
        TransferError::UnresolvedToken(format!("no token contract at {token_address}"))
    })?;
    let amount = parse_units(&transfer.amount, decimals)?;
    let data = erc20::encode_transfer(&transfer.receiver, to_word(amount))?;

    Ok(BaseTransaction {
        to: token_address.clone(),
        value: "0".to_string(),
        data: hex_data(&data),
    })
}

pub fn build_collectible_transfer(
    transfer: &CollectibleTransfer,
) -> Result<BaseTransaction, TransferError> {
    let token_id = to_word(parse_uint(&transfer.token_id)?);

    let data = match transfer.token_type {
        Some(CollectibleType::Erc721) => {
            erc721::encode_safe_transfer_from(&transfer.from, &transfer.receiver, token_id)?
        }
        Some(CollectibleType::Erc1155) => {
            let amount = to_word(parse_uint(transfer.amount.as_deref().unwrap_or("0"))?);
            erc1155::encode_safe_transfer_from(
                &transfer.from,
                &transfer.receiver,
                token_id,
                amount,
                &ERC1155_TRANSFER_DATA,
            )?
        }
        None => {
            return Err(TransferError::UnresolvedToken(format!(
                "no collectible standard detected at {}",
                transfer.token_address
            )));
        }
    };

    Ok(BaseTransaction {
        to: transfer.token_address.clone(),
        value: "0".to_string(),
        data: hex_data(&data),
    })
}

fn hex_data(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}
