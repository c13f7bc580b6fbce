use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use tracing::info;

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
    /// The extension switched accounts, or dropped the account when `None`.
    Changed(Option<String>),
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Wallet connection rejected: {0}")]
    ConnectRejected(String),

    #[error("Wallet disconnect failed: {0}")]
    DisconnectFailed(String),
}

/// Bridge to a wallet extension, resolved at runtime.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the user to approve a connection; yields the public address.
    async fn connect(&self) -> Result<String, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    /// Address already approved for this site, if any.
    fn public_key(&self) -> Option<String>;

    fn subscribe(&self) -> broadcast::Receiver<AccountEvent>;
}

/// In-process provider holding a single fixed key.
pub struct StaticWalletProvider {
    address: String,
    trusted: AtomicBool,
    reject: bool,
    events: broadcast::Sender<AccountEvent>,
}

impl StaticWalletProvider {
    pub fn new(address: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            address: address.into(),
            trusted: AtomicBool::new(false),
            reject: false,
            events,
        }
    }

    /// Provider that already approved this site, so the key is exposed up front.
    pub fn trusted(address: impl Into<String>) -> Self {
        let provider = Self::new(address);
        provider.trusted.store(true, Ordering::SeqCst);
        provider
    }

    /// Provider whose user declines every connection request.
    pub fn rejecting(address: impl Into<String>) -> Self {
        Self {
            reject: true,
            ..Self::new(address)
        }
    }

    pub fn emit_account_change(&self, address: Option<String>) {
        // No receivers is fine
        let _ = self.events.send(AccountEvent::Changed(address));
    }
}

#[async_trait]
impl WalletProvider for StaticWalletProvider {
    async fn connect(&self) -> Result<String, WalletError> {
        if self.reject {
            return Err(WalletError::ConnectRejected("User rejected the request.".to_string()));
        }
        self.trusted.store(true, Ordering::SeqCst);
        info!("Static wallet approved connection");
        Ok(self.address.clone())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.trusted.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn public_key(&self) -> Option<String> {
        if self.trusted.load(Ordering::SeqCst) {
            Some(self.address.clone())
        } else {
            None
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<AccountEvent> {
        self.events.subscribe()
    }
}
