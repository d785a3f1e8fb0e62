use alloy::primitives::Address;
use eyre::Result;

use nlg_core::gateway::{RpcGateway, SaleGateway};
use nlg_core::view::SaleView;

use crate::{config::IdoConfig, display::ConsoleView, provider};

/// One-shot read of the sale statistics, plus the wallet section when an
/// account address is supplied.
pub async fn status(rpc_url: &str, config: &IdoConfig, account: Option<Address>) -> Result<()> {
    let provider = provider::read_only(rpc_url).await?;
    let token: Address = config.contracts.token.parse()?;
    let sale: Address = config.contracts.sale.parse()?;

    let gateway = RpcGateway::new(provider, token, sale, account);
    let view = ConsoleView;

    let snapshot = gateway.read_sale_snapshot().await?;
    view.sale_updated(&snapshot);

    if account.is_some() {
        let connection = gateway.connect().await?;
        let wallet = gateway.read_wallet_state(connection).await?;
        view.wallet_updated(&wallet);
    }

    Ok(())
}
