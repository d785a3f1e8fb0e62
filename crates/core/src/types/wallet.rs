use alloy::primitives::Address;

use super::primitives::{EthAmount, TokenAmount};

/// Signer context established by a successful `connect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub address: Address,
    pub chain_id: u64,
}

/// Per-account balances and purchase history. Written only after a
/// successful gateway read and replaced wholesale on account or chain
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletState {
    pub address: Address,
    pub chain_id: u64,
    pub eth_balance: EthAmount,
    pub token_balance: TokenAmount,
    pub purchased: TokenAmount,
}
