use alloy::primitives::utils::parse_ether;

use crate::{
    error::ValidationError,
    types::{primitives::EthAmount, snapshot::SaleSnapshot},
};

/// Parse the user-entered ETH amount. Missing, unparsable, and
/// non-positive inputs are all rejected before anything touches the
/// network.
pub fn parse_eth_input(input: &str) -> Result<EthAmount, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::AmountMissing);
    }

    let wei = parse_ether(trimmed)
        .map_err(|_| ValidationError::AmountInvalid(trimmed.to_string()))?;
    if wei.is_zero() {
        return Err(ValidationError::AmountNotPositive);
    }

    Ok(EthAmount::new(wei))
}

/// Pre-flight purchase checks against the last-known snapshot. The
/// on-chain contract remains authoritative and may still revert.
pub fn validate_purchase(
    amount: EthAmount,
    snapshot: &SaleSnapshot,
) -> Result<(), ValidationError> {
    if amount.is_zero() {
        return Err(ValidationError::AmountNotPositive);
    }

    if !snapshot.active {
        return Err(ValidationError::SaleInactive);
    }

    Ok(())
}
