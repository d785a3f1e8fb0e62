use alloy::primitives::Address;
use eyre::Result;

use nlg_core::controller::SaleController;
use nlg_core::gateway::RpcGateway;

use crate::{
    config::IdoConfig,
    display::{ConsoleView, format_tokens},
    provider,
};

/// Full purchase cycle: connect, validate, submit, await confirmation,
/// then re-read sale and wallet state.
pub async fn buy(rpc_url: &str, config: &IdoConfig, key: &str, eth: &str) -> Result<()> {
    let (provider, account) = provider::with_signer(rpc_url, key).await?;
    let token: Address = config.contracts.token.parse()?;
    let sale: Address = config.contracts.sale.parse()?;

    let gateway = RpcGateway::new(provider, token, sale, Some(account));
    let mut controller = SaleController::new(gateway, ConsoleView);

    controller.connect().await?;

    match controller.purchase(eth).await? {
        Some(receipt) => {
            println!(
                "Bought {} NLG for {} ETH (tx {})",
                format_tokens(receipt.tokens_bought.as_u256()),
                alloy::primitives::utils::format_ether(receipt.eth_spent.as_u256()),
                receipt.tx_hash
            );
        }
        None => {
            println!("Session was invalidated before confirmation; check the transaction manually.");
        }
    }

    Ok(())
}
