use std::time::Duration;

use alloy::primitives::Address;
use eyre::Result;
use futures::{StreamExt, stream};

use nlg_core::controller::{SaleController, SessionEnd};
use nlg_core::events::{SessionEvent, WalletWatcher};
use nlg_core::gateway::RpcGateway;

use crate::{config::IdoConfig, display::ConsoleView, provider};

const WALLET_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Live session: periodic refresh of sale and wallet state until the
/// wallet account or chain changes.
pub async fn watch(
    rpc_url: &str,
    config: &IdoConfig,
    key: Option<&str>,
    account: Option<Address>,
) -> Result<()> {
    let (provider, account) = match (key, account) {
        (Some(key), _) => {
            let (provider, signer_account) = provider::with_signer(rpc_url, key).await?;
            (provider, Some(signer_account))
        }
        (None, observed) => (provider::read_only(rpc_url).await?, observed),
    };

    let token: Address = config.contracts.token.parse()?;
    let sale: Address = config.contracts.sale.parse()?;

    let gateway = RpcGateway::new(provider.clone(), token, sale, account);
    let mut controller = SaleController::new(gateway, ConsoleView);

    controller.connect().await?;
    let connection = controller
        .connection()
        .ok_or_else(|| eyre::eyre!("connected session has no wallet context"))?;

    let refresh_interval = Duration::from_secs(config.refresh.interval_secs);
    let ticker = stream::unfold(refresh_interval, |interval| async move {
        tokio::time::sleep(interval).await;
        Some((SessionEvent::Refresh, interval))
    })
    .boxed();

    let wallet_events = WalletWatcher::new(provider, connection, WALLET_POLL_INTERVAL)
        .into_stream()
        .map(SessionEvent::Wallet)
        .boxed();

    match controller.run(stream::select(ticker, wallet_events)).await {
        SessionEnd::WalletChanged => {
            println!("Wallet account or network changed; restart `watch` to reconnect.");
        }
        SessionEnd::EventsClosed => {}
    }

    Ok(())
}
