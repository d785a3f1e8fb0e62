use std::time::Instant;

use alloy::primitives::B256;

use super::primitives::{EthAmount, TokenAmount};

/// In-flight purchase, accepted into the pending pool but not yet mined.
/// At most one exists per session; the controller holds it for the full
/// duration of `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseTicket {
    pub tx_hash: B256,
    pub eth_amount: EthAmount,
    pub submitted_at: Instant,
}

/// Outcome of a mined purchase, decoded from the `TokensPurchased` log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub tokens_bought: TokenAmount,
    pub eth_spent: EthAmount,
    pub tx_hash: B256,
}
