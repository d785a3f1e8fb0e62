use alloy::primitives::U256;

use super::primitives::{EthAmount, TokenAmount, WAD};

/// Point-in-time read of the sale contract's aggregate parameters.
///
/// Always replaced wholesale from a fresh read, never field-patched. The
/// underlying accessors are read in one multicall but may still straddle a
/// block boundary, so derived values tolerate small cross-field skew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleSnapshot {
    /// ETH price (wei) per whole token.
    pub token_price: EthAmount,
    pub tokens_available: TokenAmount,
    pub tokens_sold: TokenAmount,
    pub total_raised: EthAmount,
    pub min_purchase: TokenAmount,
    pub max_purchase: TokenAmount,
    pub sale_start: u64,
    pub sale_end: u64,
    pub active: bool,
}

impl SaleSnapshot {
    /// Sold-out percentage, clamped to `[0, 100]`.
    ///
    /// Defined as 0 when nothing is available, and clamped above because a
    /// skewed read can momentarily report sold > available; the next refresh
    /// self-corrects.
    pub fn progress_percent(&self) -> f64 {
        if self.tokens_available.is_zero() {
            return 0.0;
        }
        let sold = wad_to_f64(self.tokens_sold.as_u256());
        let available = wad_to_f64(self.tokens_available.as_u256());
        (sold / available * 100.0).clamp(0.0, 100.0)
    }

    /// Local mirror of the contract's `calculateTokenAmount`, used for
    /// display fallback when the remote quote is unreachable.
    pub fn quote_tokens(&self, eth: EthAmount) -> TokenAmount {
        if self.token_price.is_zero() {
            return TokenAmount::ZERO;
        }
        TokenAmount::new(eth.as_u256() * WAD / self.token_price.as_u256())
    }

    /// Local mirror of the contract's `calculateEthAmount`.
    pub fn quote_eth(&self, tokens: TokenAmount) -> EthAmount {
        EthAmount::new(tokens.as_u256() * self.token_price.as_u256() / WAD)
    }
}

fn wad_to_f64(value: U256) -> f64 {
    // Display-precision conversion. Counters are chain-supplied, so an
    // oversized value saturates rather than panics; the caller's clamp
    // absorbs the rest.
    u128::try_from(value).unwrap_or(u128::MAX) as f64 / 1e18
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    fn snapshot(available: U256, sold: U256) -> SaleSnapshot {
        SaleSnapshot {
            token_price: EthAmount::new(parse_ether("0.000066").unwrap()),
            tokens_available: TokenAmount::new(available),
            tokens_sold: TokenAmount::new(sold),
            total_raised: EthAmount::ZERO,
            min_purchase: TokenAmount::new(parse_ether("100").unwrap()),
            max_purchase: TokenAmount::new(parse_ether("10000").unwrap()),
            sale_start: 0,
            sale_end: 0,
            active: true,
        }
    }

    #[test]
    fn progress_is_zero_when_nothing_available() {
        let snap = snapshot(U256::ZERO, parse_ether("50").unwrap());
        assert_eq!(snap.progress_percent(), 0.0);
    }

    #[test]
    fn progress_is_clamped_on_skewed_reads() {
        let snap = snapshot(parse_ether("100").unwrap(), parse_ether("150").unwrap());
        assert_eq!(snap.progress_percent(), 100.0);
    }

    #[test]
    fn progress_within_bounds() {
        let snap = snapshot(parse_ether("100000").unwrap(), parse_ether("25000").unwrap());
        let progress = snap.progress_percent();
        assert!((25.0 - progress).abs() < 1e-9);
    }

    #[test]
    fn progress_saturates_on_oversized_counters() {
        // Chain-supplied counters beyond u128 must clamp, not panic.
        let snap = snapshot(parse_ether("100000").unwrap(), U256::MAX);
        assert_eq!(snap.progress_percent(), 100.0);

        let snap = snapshot(U256::MAX, parse_ether("1").unwrap());
        let progress = snap.progress_percent();
        assert!((0.0..=100.0).contains(&progress));
    }

    #[test]
    fn quote_matches_contract_math() {
        let snap = snapshot(parse_ether("100000").unwrap(), U256::ZERO);
        let tokens = snap.quote_tokens(EthAmount::new(parse_ether("1").unwrap()));
        // 1 / 0.000066 ≈ 15151.5151… tokens
        let expected = parse_ether("1").unwrap() * WAD / parse_ether("0.000066").unwrap();
        assert_eq!(tokens.as_u256(), expected);

        let hundred = snap.quote_tokens(EthAmount::new(parse_ether("0.0066").unwrap()));
        assert_eq!(hundred.as_u256(), parse_ether("100").unwrap());
    }

    #[test]
    fn quote_round_trip_within_one_wei() {
        let snap = snapshot(parse_ether("100000").unwrap(), U256::ZERO);
        let eth = EthAmount::new(parse_ether("1").unwrap());
        let tokens = snap.quote_tokens(eth);
        let back = snap.quote_eth(tokens);
        assert!(eth.as_u256() - back.as_u256() <= U256::from(1u64));
    }

    #[test]
    fn quote_is_zero_when_price_is_zero() {
        let mut snap = snapshot(parse_ether("100000").unwrap(), U256::ZERO);
        snap.token_price = EthAmount::ZERO;
        let tokens = snap.quote_tokens(EthAmount::new(parse_ether("1").unwrap()));
        assert!(tokens.is_zero());
    }
}
