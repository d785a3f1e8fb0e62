use std::time::Duration;

use crate::types::{
    primitives::TokenAmount,
    snapshot::SaleSnapshot,
    wallet::WalletState,
};

/// Named output surface the controller renders into. Default methods are
/// no-ops so a view only implements the fields it displays.
#[allow(unused_variables)]
pub trait SaleView: Send + Sync {
    fn sale_updated(&self, snapshot: &SaleSnapshot) {}

    fn wallet_updated(&self, wallet: &WalletState) {}

    /// Derived token estimate for the currently entered ETH amount.
    fn quote_updated(&self, tokens: TokenAmount) {}

    fn purchase_control(&self, control: PurchaseControl) {}

    fn status(&self, message: StatusMessage) {}
}

/// View that renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl SaleView for NullView {}

/// State of the single purchase action control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseControl {
    Enabled,
    /// Disabled for the duration of an in-flight purchase.
    Busy,
    /// Disabled because the last snapshot reported the sale inactive.
    SaleInactive,
}

impl PurchaseControl {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Enabled => "Buy Tokens",
            Self::Busy => "Processing…",
            Self::SaleInactive => "Sale Inactive",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    /// Success and info messages self-clear; errors persist until replaced.
    pub fn auto_clear_after(&self) -> Option<Duration> {
        match self {
            Self::Info | Self::Success => Some(Duration::from_secs(5)),
            Self::Error => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}
