use std::time::Instant;

use alloy::providers::{PendingTransactionBuilder, Provider};
use alloy::{consensus::TxReceipt, primitives::Address};
use async_trait::async_trait;
use nlg_abi::{INaijaLoyal, INaijaLoyalIDO};

use crate::{
    error::{Error, StateError, TransactionError, ValidationError, WalletError},
    types::{
        primitives::{EthAmount, TokenAmount},
        purchase::{PurchaseReceipt, PurchaseTicket},
        snapshot::SaleSnapshot,
        wallet::{Connection, WalletState},
    },
};

/// Single point of truth for "am I connected, to what account, on what
/// chain", and the translation of domain requests into remote calls.
///
/// The trait is the seam the controller is tested against; `RpcGateway` is
/// the alloy-backed implementation.
#[async_trait]
pub trait SaleGateway: Send + Sync {
    /// Establish the signer context. Fails with `WalletError::Unavailable`
    /// when no account is configured.
    async fn connect(&self) -> Result<Connection, Error>;

    /// Atomic multicall of the sale-info and purchase-bound accessors.
    /// All-or-nothing: any leg failing fails the whole read.
    async fn read_sale_snapshot(&self) -> Result<SaleSnapshot, Error>;

    /// Per-account balances. Individual legs fall back to zero on failure
    /// rather than aborting the read.
    async fn read_wallet_state(&self, connection: Connection) -> Result<WalletState, Error>;

    async fn quote_tokens_for_eth(&self, eth: EthAmount) -> Result<TokenAmount, Error>;

    async fn quote_eth_for_tokens(&self, tokens: TokenAmount) -> Result<EthAmount, Error>;

    /// Send the value-bearing purchase. Resolves once the transaction is
    /// accepted into the pending pool, not once mined.
    async fn submit_purchase(&self, eth: EthAmount) -> Result<PurchaseTicket, Error>;

    /// Wait for the ticket's transaction to be mined and decode the result.
    async fn await_confirmation(&self, ticket: &PurchaseTicket)
    -> Result<PurchaseReceipt, Error>;
}

pub struct RpcGateway<P>
where
    P: Provider + Clone,
{
    provider: P,
    token: Address,
    sale: Address,
    account: Option<Address>,
}

impl<P> RpcGateway<P>
where
    P: Provider + Clone,
{
    pub fn new(provider: P, token: Address, sale: Address, account: Option<Address>) -> Self {
        Self {
            provider,
            token,
            sale,
            account,
        }
    }

    pub fn sale_address(&self) -> Address {
        self.sale
    }

    pub fn token_address(&self) -> Address {
        self.token
    }
}

#[async_trait]
impl<P> SaleGateway for RpcGateway<P>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    async fn connect(&self) -> Result<Connection, Error> {
        let address = self.account.ok_or(WalletError::Unavailable)?;
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(StateError::from)?;
        Ok(Connection { address, chain_id })
    }

    async fn read_sale_snapshot(&self) -> Result<SaleSnapshot, Error> {
        let ido = INaijaLoyalIDO::new(self.sale, &self.provider);

        let (info, min_purchase, max_purchase) = self
            .provider
            .multicall()
            .add(ido.getSaleInfo())
            .add(ido.minPurchase())
            .add(ido.maxPurchase())
            .aggregate()
            .await
            .map_err(StateError::from)?;

        Ok(SaleSnapshot {
            token_price: EthAmount::new(info.tokenPrice),
            tokens_available: TokenAmount::new(info.tokensAvailable),
            tokens_sold: TokenAmount::new(info.tokensSold),
            total_raised: EthAmount::new(info.totalRaised),
            min_purchase: TokenAmount::new(min_purchase),
            max_purchase: TokenAmount::new(max_purchase),
            sale_start: info.saleStart.to::<u64>(),
            sale_end: info.saleEnd.to::<u64>(),
            active: info.active,
        })
    }

    async fn read_wallet_state(&self, connection: Connection) -> Result<WalletState, Error> {
        let token = INaijaLoyal::new(self.token, &self.provider);
        let ido = INaijaLoyalIDO::new(self.sale, &self.provider);
        let address = connection.address;

        // Each leg degrades to zero independently so a single flaky read
        // does not blank the whole panel.
        let eth_balance = match self.provider.get_balance(address).await {
            Ok(value) => EthAmount::new(value),
            Err(error) => {
                tracing::warn!(%address, %error, "eth balance read failed, showing zero");
                EthAmount::ZERO
            }
        };

        let token_balance = match token.balanceOf(address).call().await {
            Ok(value) => TokenAmount::new(value),
            Err(error) => {
                tracing::warn!(%address, %error, "token balance read failed, showing zero");
                TokenAmount::ZERO
            }
        };

        let purchased = match ido.getUserPurchase(address).call().await {
            Ok(value) => TokenAmount::new(value),
            Err(error) => {
                tracing::warn!(%address, %error, "purchase lookup failed, showing zero");
                TokenAmount::ZERO
            }
        };

        Ok(WalletState {
            address,
            chain_id: connection.chain_id,
            eth_balance,
            token_balance,
            purchased,
        })
    }

    async fn quote_tokens_for_eth(&self, eth: EthAmount) -> Result<TokenAmount, Error> {
        if eth.is_zero() {
            return Err(ValidationError::AmountNotPositive.into());
        }
        let ido = INaijaLoyalIDO::new(self.sale, &self.provider);
        let tokens = ido
            .calculateTokenAmount(eth.as_u256())
            .call()
            .await
            .map_err(StateError::from)?;
        Ok(TokenAmount::new(tokens))
    }

    async fn quote_eth_for_tokens(&self, tokens: TokenAmount) -> Result<EthAmount, Error> {
        if tokens.is_zero() {
            return Err(ValidationError::AmountNotPositive.into());
        }
        let ido = INaijaLoyalIDO::new(self.sale, &self.provider);
        let eth = ido
            .calculateEthAmount(tokens.as_u256())
            .call()
            .await
            .map_err(StateError::from)?;
        Ok(EthAmount::new(eth))
    }

    async fn submit_purchase(&self, eth: EthAmount) -> Result<PurchaseTicket, Error> {
        if eth.is_zero() {
            return Err(ValidationError::AmountNotPositive.into());
        }

        let ido = INaijaLoyalIDO::new(self.sale, &self.provider);
        let pending = ido
            .buyTokens()
            .value(eth.as_u256())
            .send()
            .await
            .map_err(map_send_error)?;

        Ok(PurchaseTicket {
            tx_hash: *pending.tx_hash(),
            eth_amount: eth,
            submitted_at: Instant::now(),
        })
    }

    async fn await_confirmation(
        &self,
        ticket: &PurchaseTicket,
    ) -> Result<PurchaseReceipt, Error> {
        let pending =
            PendingTransactionBuilder::new(self.provider.root().clone(), ticket.tx_hash);
        let receipt = pending
            .with_required_confirmations(1)
            .get_receipt()
            .await
            .map_err(TransactionError::from)?;

        let receipt_body = receipt
            .inner
            .as_receipt()
            .ok_or(TransactionError::MissingReceipt)?;

        if !receipt_body.status() {
            return Err(TransactionError::Reverted {
                tx_hash: receipt.transaction_hash,
            }
            .into());
        }

        let purchased = receipt_body
            .logs()
            .iter()
            .find_map(|log| log.log_decode::<INaijaLoyalIDO::TokensPurchased>().ok())
            .ok_or(TransactionError::MissingPurchaseEvent)?;

        let data = purchased.inner.data;

        Ok(PurchaseReceipt {
            tokens_bought: TokenAmount::new(data.amount),
            eth_spent: EthAmount::new(data.cost),
            tx_hash: receipt.transaction_hash,
        })
    }
}

/// EIP-1193 "user rejected request", the code wallet providers return
/// when the user declines a prompt.
const USER_REJECTED_CODE: i64 = 4001;

/// Signer denials surface as `UserRejected`; everything else stays a
/// transaction error. Matched on the JSON-RPC error code, not the
/// message, so revert reasons mentioning rejection stay transaction
/// errors.
fn map_send_error(error: alloy::contract::Error) -> Error {
    if let alloy::contract::Error::TransportError(transport) = &error {
        if let Some(payload) = transport.as_error_resp() {
            if payload.code == USER_REJECTED_CODE {
                return WalletError::UserRejected.into();
            }
        }
    }
    TransactionError::Contract(error).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        primitives::{Bytes, U256},
        providers::{ProviderBuilder, mock::Asserter},
        rpc::json_rpc::ErrorPayload,
        sol_types::SolValue,
        transports::RpcError,
    };

    fn test_gateway(
        asserter: Asserter,
    ) -> RpcGateway<impl Provider + Clone + Send + Sync + 'static> {
        let provider = ProviderBuilder::new().connect_mocked_client(asserter);
        RpcGateway::new(
            provider,
            Address::repeat_byte(0x01),
            Address::repeat_byte(0x02),
            Some(Address::repeat_byte(0x03)),
        )
    }

    #[tokio::test]
    async fn wallet_state_degrades_failing_leg_to_zero() {
        let asserter = Asserter::new();
        let gateway = test_gateway(asserter.clone());

        // Legs resolve in order: eth balance, token balance, purchase
        // lookup. The middle one fails; its neighbors must survive.
        asserter.push_success(&U256::from(10u64));
        asserter.push_failure_msg("execution reverted");
        asserter.push_success(&Bytes::from(U256::from(7u64).abi_encode()));

        let connection = Connection {
            address: Address::repeat_byte(0x03),
            chain_id: 11155111,
        };
        let wallet = gateway
            .read_wallet_state(connection)
            .await
            .expect("partial failure must not abort the read");

        assert_eq!(wallet.eth_balance.as_u256(), U256::from(10u64));
        assert!(wallet.token_balance.is_zero());
        assert_eq!(wallet.purchased.as_u256(), U256::from(7u64));
    }

    #[tokio::test]
    async fn wallet_state_survives_all_legs_failing() {
        let asserter = Asserter::new();
        let gateway = test_gateway(asserter.clone());

        asserter.push_failure_msg("rpc down");
        asserter.push_failure_msg("rpc down");
        asserter.push_failure_msg("rpc down");

        let connection = Connection {
            address: Address::repeat_byte(0x03),
            chain_id: 11155111,
        };
        let wallet = gateway.read_wallet_state(connection).await.unwrap();

        assert!(wallet.eth_balance.is_zero());
        assert!(wallet.token_balance.is_zero());
        assert!(wallet.purchased.is_zero());
    }

    #[test]
    fn user_rejection_matched_on_code_not_message() {
        let denial = alloy::contract::Error::TransportError(RpcError::ErrorResp(ErrorPayload {
            code: USER_REJECTED_CODE,
            message: "User rejected the request.".into(),
            data: None,
        }));
        assert!(matches!(
            map_send_error(denial),
            Error::Wallet(WalletError::UserRejected)
        ));

        // A revert reason mentioning rejection is still a transaction error.
        let revert = alloy::contract::Error::TransportError(RpcError::ErrorResp(ErrorPayload {
            code: 3,
            message: "execution reverted: rejected by allowlist".into(),
            data: None,
        }));
        assert!(matches!(
            map_send_error(revert),
            Error::Transaction(TransactionError::Contract(_))
        ));
    }
}
