use alloy::{
    contract,
    primitives::B256,
    providers::{MulticallError, PendingTransactionError},
    transports::TransportError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Provider-level failures. `Unavailable` is the one fatal condition in the
/// whole client; everything else is retryable.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no wallet account configured: set PRIVATE_KEY or pass --account")]
    Unavailable,

    #[error("wallet rejected the request")]
    UserRejected,
}

/// Client-side pre-validation. Nothing here ever reaches the network; the
/// on-chain checks remain authoritative.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("enter an ETH amount")]
    AmountMissing,

    #[error("not a valid ETH amount: {0}")]
    AmountInvalid(String),

    #[error("ETH amount must be greater than zero")]
    AmountNotPositive,

    #[error("sale is not active")]
    SaleInactive,

    #[error("a purchase is already in flight")]
    PurchaseInFlight,

    #[error("wallet not connected")]
    NotConnected,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to fetch state: {0}")]
    Transport(#[from] TransportError),

    #[error("contract call failed: {0}")]
    Contract(#[from] contract::Error),

    #[error("multicall failed: {0}")]
    Multicall(#[from] MulticallError),
}

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("transaction failed: {0}")]
    Contract(#[from] contract::Error),

    #[error("pending transaction error: {0}")]
    Pending(#[from] PendingTransactionError),

    #[error("transaction receipt missing body")]
    MissingReceipt,

    #[error("TokensPurchased event not found in receipt logs")]
    MissingPurchaseEvent,

    #[error("transaction reverted: {tx_hash:?}")]
    Reverted { tx_hash: B256 },
}
