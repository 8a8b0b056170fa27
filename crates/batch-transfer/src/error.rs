use thiserror::Error;

/// Fatal errors of the transfer pipeline. Everything a user can fix by
/// editing a row is reported as a [`CodeWarning`](crate::types::CodeWarning)
/// instead.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error(
        "Max number of lines exceeded. Due to the block gas limit transactions are limited to {limit} lines."
    )]
    LineLimitExceeded { limit: usize },

    #[error("Unresolved token: {0}")]
    UnresolvedToken(String),

    #[error("Transaction build failed: {0}")]
    TransactionFailed(String),
}

impl From<chain_eth::error::EthError> for TransferError {
    fn from(e: chain_eth::error::EthError) -> Self {
        TransferError::TransactionFailed(format!("ETH: {e}"))
    }
}
