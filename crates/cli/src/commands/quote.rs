use alloy::primitives::Address;
use eyre::Result;

use nlg_core::gateway::{RpcGateway, SaleGateway};
use nlg_core::validation::parse_eth_input;

use crate::{config::IdoConfig, display::format_tokens, provider};

/// Remote pricing quote: how many NLG the given ETH amount buys.
pub async fn quote(rpc_url: &str, config: &IdoConfig, eth: &str) -> Result<()> {
    let amount = parse_eth_input(eth)?;

    let provider = provider::read_only(rpc_url).await?;
    let token: Address = config.contracts.token.parse()?;
    let sale: Address = config.contracts.sale.parse()?;

    let gateway = RpcGateway::new(provider, token, sale, None);
    let tokens = gateway.quote_tokens_for_eth(amount).await?;

    println!("{eth} ETH ≈ {} NLG", format_tokens(tokens.as_u256()));
    Ok(())
}
