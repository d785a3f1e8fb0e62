use futures::StreamExt;

use crate::{
    error::{Error, ValidationError},
    events::{SessionEvent, SessionEvents, WalletEvent},
    gateway::SaleGateway,
    types::{
        primitives::TokenAmount,
        purchase::{PurchaseReceipt, PurchaseTicket},
        snapshot::SaleSnapshot,
        wallet::{Connection, WalletState},
    },
    validation,
    view::{PurchaseControl, SaleView, StatusMessage},
};

/// Session lifecycle. `Disconnected` is re-entered on any account or chain
/// change; no cached state survives the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    Ready,
    Submitting,
}

/// Why the event loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Account or chain changed; the host should rebuild the session.
    WalletChanged,
    EventsClosed,
}

/// Keeps the displayed sale statistics and purchase form synchronized with
/// on-chain truth, and mediates the single purchase action.
pub struct SaleController<G, V>
where
    G: SaleGateway,
    V: SaleView,
{
    gateway: G,
    view: V,
    phase: Phase,
    connection: Option<Connection>,
    snapshot: Option<SaleSnapshot>,
    wallet: Option<WalletState>,
    pending: Option<PurchaseTicket>,
}

impl<G, V> SaleController<G, V>
where
    G: SaleGateway,
    V: SaleView,
{
    pub fn new(gateway: G, view: V) -> Self {
        Self {
            gateway,
            view,
            phase: Phase::Disconnected,
            connection: None,
            snapshot: None,
            wallet: None,
            pending: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn connection(&self) -> Option<Connection> {
        self.connection
    }

    pub fn snapshot(&self) -> Option<&SaleSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn wallet(&self) -> Option<&WalletState> {
        self.wallet.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Disconnected → Connecting → Ready. Any failure drops back to
    /// Disconnected with the error surfaced, leaving retry to the user.
    pub async fn connect(&mut self) -> Result<(), Error> {
        if self.phase != Phase::Disconnected {
            return Ok(());
        }

        self.phase = Phase::Connecting;

        let connection = match self.gateway.connect().await {
            Ok(connection) => connection,
            Err(error) => {
                self.phase = Phase::Disconnected;
                self.view.status(StatusMessage::error(error.to_string()));
                return Err(error);
            }
        };
        self.connection = Some(connection);

        if let Err(error) = self.refresh_all().await {
            self.phase = Phase::Disconnected;
            self.connection = None;
            self.view.status(StatusMessage::error(error.to_string()));
            return Err(error);
        }

        self.phase = Phase::Ready;
        self.render_purchase_control();
        Ok(())
    }

    /// Background refresh. Only runs in Ready; skipped entirely while a
    /// purchase is in flight so the display never races the transaction's
    /// eventual effect. Read failures leave the last-rendered state stale
    /// rather than blanking it.
    pub async fn refresh(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }

        match self.gateway.read_sale_snapshot().await {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.view.sale_updated(&snapshot);
                self.render_purchase_control();
            }
            Err(error) => {
                tracing::warn!(%error, "snapshot refresh failed, keeping stale display");
                self.view.status(StatusMessage::error(format!(
                    "Error fetching sale information: {error}"
                )));
            }
        }

        let Some(connection) = self.connection else {
            return;
        };
        match self.gateway.read_wallet_state(connection).await {
            Ok(wallet) => {
                self.wallet = Some(wallet);
                self.view.wallet_updated(&wallet);
            }
            Err(error) => {
                tracing::warn!(%error, "wallet refresh failed, keeping stale display");
            }
        }
    }

    /// Refresh the derived token estimate for the entered ETH amount.
    /// Empty or non-numeric input is a defined zero-quote, not an error,
    /// and the machine state never changes. Only a Ready session quotes;
    /// anything else yields zero without touching the gateway.
    pub async fn quote(&mut self, input: &str) -> TokenAmount {
        if self.phase != Phase::Ready {
            self.view.quote_updated(TokenAmount::ZERO);
            return TokenAmount::ZERO;
        }

        let Ok(amount) = validation::parse_eth_input(input) else {
            self.view.quote_updated(TokenAmount::ZERO);
            return TokenAmount::ZERO;
        };

        match self.gateway.quote_tokens_for_eth(amount).await {
            Ok(tokens) => {
                self.view.quote_updated(tokens);
                tokens
            }
            Err(error) => {
                tracing::warn!(%error, "remote quote failed");
                let fallback = self
                    .snapshot
                    .map(|snapshot| snapshot.quote_tokens(amount))
                    .unwrap_or(TokenAmount::ZERO);
                self.view.quote_updated(fallback);
                fallback
            }
        }
    }

    /// Guarded Ready → Submitting transition. A rejection is a no-op with
    /// a user-visible message; the session stays where it was.
    pub async fn submit(&mut self, input: &str) -> Result<PurchaseTicket, Error> {
        if self.phase == Phase::Submitting {
            return Err(self.reject(ValidationError::PurchaseInFlight));
        }
        if self.phase != Phase::Ready {
            return Err(self.reject(ValidationError::NotConnected));
        }

        let amount = match validation::parse_eth_input(input) {
            Ok(amount) => amount,
            Err(error) => return Err(self.reject(error)),
        };

        let Some(snapshot) = self.snapshot else {
            return Err(self.reject(ValidationError::NotConnected));
        };
        if let Err(error) = validation::validate_purchase(amount, &snapshot) {
            return Err(self.reject(error));
        }

        // The mutual-exclusion window opens before the send so a re-entrant
        // submit during the await is rejected.
        self.phase = Phase::Submitting;
        self.view.purchase_control(PurchaseControl::Busy);
        self.view
            .status(StatusMessage::info("Processing transaction…"));

        match self.gateway.submit_purchase(amount).await {
            Ok(ticket) => {
                self.pending = Some(ticket);
                Ok(ticket)
            }
            Err(error) => {
                self.phase = Phase::Ready;
                self.render_purchase_control();
                self.view.status(StatusMessage::error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Await the in-flight purchase. On success the snapshot and wallet are
    /// re-read exactly once, unconditionally; the pre-transaction cache is
    /// never trusted. If the session was reset mid-flight the outcome is
    /// discarded entirely.
    pub async fn finish(
        &mut self,
        ticket: PurchaseTicket,
    ) -> Result<Option<PurchaseReceipt>, Error> {
        let outcome = self.gateway.await_confirmation(&ticket).await;

        if self.phase != Phase::Submitting {
            // Account or chain change invalidated the session while the
            // transaction was pending; nothing here may be rendered.
            return Ok(None);
        }

        self.pending = None;

        match outcome {
            Ok(receipt) => {
                self.phase = Phase::Ready;
                self.view.status(StatusMessage::success("Purchase successful!"));
                if let Err(error) = self.refresh_all().await {
                    tracing::warn!(%error, "post-purchase refresh failed");
                }
                self.render_purchase_control();
                Ok(Some(receipt))
            }
            Err(error) => {
                // Nothing changed on-chain; no refresh needed.
                self.phase = Phase::Ready;
                self.render_purchase_control();
                self.view.status(StatusMessage::error(format!(
                    "Transaction failed: {error}"
                )));
                Err(error)
            }
        }
    }

    /// Full purchase cycle: submit, then await confirmation.
    pub async fn purchase(&mut self, input: &str) -> Result<Option<PurchaseReceipt>, Error> {
        let ticket = self.submit(input).await?;
        self.finish(ticket).await
    }

    /// Account or chain change: full reset, no state carried across. Any
    /// cached balance could otherwise reflect a stale chain or account.
    pub fn handle_wallet_event(&mut self, event: WalletEvent) -> bool {
        let invalidates = match (&event, self.connection) {
            (_, None) => self.phase != Phase::Disconnected,
            (WalletEvent::ChainChanged(chain_id), Some(connection)) => {
                *chain_id != connection.chain_id
            }
            (WalletEvent::AccountsChanged(accounts), Some(connection)) => {
                accounts.first() != Some(&connection.address)
            }
        };

        if invalidates {
            self.reset();
        }
        invalidates
    }

    /// Drive the session from a merged stream of refresh ticks and wallet
    /// events. Returns when the wallet changes (host rebuilds the session)
    /// or the stream ends.
    pub async fn run<E>(&mut self, mut events: E) -> SessionEnd
    where
        E: SessionEvents,
    {
        while let Some(event) = events.next().await {
            match event {
                SessionEvent::Refresh => self.refresh().await,
                SessionEvent::Wallet(wallet_event) => {
                    if self.handle_wallet_event(wallet_event) {
                        return SessionEnd::WalletChanged;
                    }
                }
            }
        }
        SessionEnd::EventsClosed
    }

    async fn refresh_all(&mut self) -> Result<(), Error> {
        let snapshot = self.gateway.read_sale_snapshot().await?;
        self.snapshot = Some(snapshot);
        self.view.sale_updated(&snapshot);

        if let Some(connection) = self.connection {
            let wallet = self.gateway.read_wallet_state(connection).await?;
            self.wallet = Some(wallet);
            self.view.wallet_updated(&wallet);
        }
        Ok(())
    }

    fn render_purchase_control(&self) {
        let control = match (self.phase, &self.snapshot) {
            (Phase::Submitting, _) => PurchaseControl::Busy,
            (_, Some(snapshot)) if !snapshot.active => PurchaseControl::SaleInactive,
            _ => PurchaseControl::Enabled,
        };
        self.view.purchase_control(control);
    }

    fn reject(&self, error: ValidationError) -> Error {
        self.view.status(StatusMessage::error(error.to_string()));
        Error::Validation(error)
    }

    fn reset(&mut self) {
        self.phase = Phase::Disconnected;
        self.connection = None;
        self.snapshot = None;
        self.wallet = None;
        self.pending = None;
        self.view.status(StatusMessage::error(
            "Wallet account or network changed; please reconnect.",
        ));
    }
}
