use alloy::primitives::{Address, U256, utils::format_ether};
use rust_decimal::Decimal;

use nlg_core::{
    types::{primitives::TokenAmount, snapshot::SaleSnapshot, wallet::WalletState},
    view::{PurchaseControl, SaleView, StatusKind, StatusMessage},
};

/// Truncate an 18-decimal wei value to `dp` decimal places for display.
pub fn format_fixed(value: U256, dp: u32) -> String {
    let Ok(wei) = u128::try_from(value) else {
        return format_ether(value);
    };
    let Ok(wei) = i128::try_from(wei) else {
        return format_ether(value);
    };
    match Decimal::try_from_i128_with_scale(wei, 18) {
        Ok(decimal) => decimal.trunc_with_scale(dp).to_string(),
        Err(_) => format_ether(value),
    }
}

pub fn format_eth(value: U256) -> String {
    format_fixed(value, 4)
}

pub fn format_tokens(value: U256) -> String {
    format_fixed(value, 2)
}

/// `0x1234…abcd`, the storefront's shortened address form.
pub fn short_address(address: Address) -> String {
    let hex = format!("{address:#x}");
    format!("{}…{}", &hex[..6], &hex[hex.len() - 4..])
}

/// Console rendering of the storefront's output fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleView;

impl SaleView for ConsoleView {
    fn sale_updated(&self, snapshot: &SaleSnapshot) {
        println!("── Sale ─────────────────────────────");
        println!("  price       {} ETH", format_ether(snapshot.token_price.as_u256()));
        println!(
            "  available   {} NLG",
            format_tokens(snapshot.tokens_available.as_u256())
        );
        println!(
            "  sold        {} NLG",
            format_tokens(snapshot.tokens_sold.as_u256())
        );
        println!(
            "  raised      {} ETH",
            format_eth(snapshot.total_raised.as_u256())
        );
        println!("  progress    {:.1}%", snapshot.progress_percent());
        println!(
            "  bounds      {} – {} NLG",
            format_tokens(snapshot.min_purchase.as_u256()),
            format_tokens(snapshot.max_purchase.as_u256())
        );
        println!(
            "  status      {}",
            if snapshot.active { "Active" } else { "Inactive" }
        );
    }

    fn wallet_updated(&self, wallet: &WalletState) {
        println!("── Wallet {} ──────────", short_address(wallet.address));
        println!("  ETH balance {}", format_eth(wallet.eth_balance.as_u256()));
        println!(
            "  NLG balance {}",
            format_tokens(wallet.token_balance.as_u256())
        );
        println!(
            "  purchased   {} NLG",
            format_tokens(wallet.purchased.as_u256())
        );
    }

    fn quote_updated(&self, tokens: TokenAmount) {
        println!("  ≈ {} NLG", format_tokens(tokens.as_u256()));
    }

    fn purchase_control(&self, control: PurchaseControl) {
        println!("  [{}]", control.label());
    }

    fn status(&self, message: StatusMessage) {
        match message.kind {
            StatusKind::Error => eprintln!("✗ {}", message.text),
            StatusKind::Success => println!("✓ {}", message.text),
            StatusKind::Info => println!("ℹ {}", message.text),
        }
    }
}
