use std::time::Duration;

use alloy::{primitives::Address, providers::Provider};
use futures::{Stream, StreamExt, stream, stream::BoxStream};

use crate::types::wallet::Connection;

/// Provider-level notifications that invalidate the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
}

/// Input to the controller's event loop: a background refresh tick or a
/// wallet-level invalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Refresh,
    Wallet(WalletEvent),
}

pub trait SessionEvents: Stream<Item = SessionEvent> + Send + Unpin {}

impl<T> SessionEvents for T where T: Stream<Item = SessionEvent> + Send + Unpin {}

pub type BoxWalletEventStream = BoxStream<'static, WalletEvent>;

/// Polls the provider for account and chain changes against a session
/// baseline. There is no push channel on a plain RPC endpoint, so this is
/// the subscription interface: created once at startup, dropped on
/// teardown.
pub struct WalletWatcher<P>
where
    P: Provider + Clone,
{
    provider: P,
    baseline: Connection,
    interval: Duration,
}

impl<P> WalletWatcher<P>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    pub fn new(provider: P, baseline: Connection, interval: Duration) -> Self {
        Self {
            provider,
            baseline,
            interval,
        }
    }

    pub fn into_stream(self) -> BoxWalletEventStream {
        stream::unfold(self, |mut watcher| async move {
            loop {
                tokio::time::sleep(watcher.interval).await;
                if let Some(event) = watcher.poll_once().await {
                    return Some((event, watcher));
                }
            }
        })
        .boxed()
    }

    /// One poll cycle. Transport hiccups skip the cycle rather than ending
    /// the stream.
    async fn poll_once(&mut self) -> Option<WalletEvent> {
        let chain_id = match self.provider.get_chain_id().await {
            Ok(id) => id,
            Err(error) => {
                tracing::debug!(%error, "chain id poll failed, skipping cycle");
                return None;
            }
        };

        if chain_id != self.baseline.chain_id {
            self.baseline.chain_id = chain_id;
            return Some(WalletEvent::ChainChanged(chain_id));
        }

        let accounts = match self.provider.get_accounts().await {
            Ok(accounts) => accounts,
            Err(error) => {
                tracing::debug!(%error, "accounts poll failed, skipping cycle");
                return None;
            }
        };

        // Locally-managed signers never show up in eth_accounts; only a
        // node that reports accounts can signal a switch.
        if !accounts.is_empty() && accounts.first() != Some(&self.baseline.address) {
            return Some(WalletEvent::AccountsChanged(accounts));
        }

        None
    }
}
