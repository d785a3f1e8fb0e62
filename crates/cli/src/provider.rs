use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};

/// Read-only provider for view calls.
pub async fn read_only(rpc_url: &str) -> eyre::Result<DynProvider> {
    let provider = ProviderBuilder::new().connect(rpc_url).await?;
    Ok(provider.erased())
}

/// Provider with a local signer attached, for value-bearing calls.
/// Returns the signer address alongside so the gateway knows its account.
pub async fn with_signer(rpc_url: &str, key: &str) -> eyre::Result<(DynProvider, Address)> {
    let signer: PrivateKeySigner = key.trim().parse()?;
    let address = signer.address();
    let wallet = EthereumWallet::from(signer);
    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect(rpc_url)
        .await?;
    Ok((provider.erased(), address))
}
