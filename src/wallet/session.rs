use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::wallet::provider::{AccountEvent, WalletError, WalletProvider};

/// Where users are sent when no wallet extension is available.
pub const INSTALL_URL: &str = "https://phantom.app/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletState {
    pub address: Option<String>,
    pub connecting: bool,
    pub connected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(String),
    /// No provider was detected; the user needs to install one.
    InstallRequired(&'static str),
}

/// Wallet connection shared across the application.
///
/// Created once at start-up and mutated only through `connect`,
/// `disconnect` and account-change events from the provider.
pub struct WalletSession {
    provider: Option<Arc<dyn WalletProvider>>,
    state: RwLock<WalletState>,
    // Dropped with the session, which stops any account listener.
    shutdown: watch::Sender<()>,
}

impl WalletSession {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        let mut state = WalletState::default();
        if let Some(address) = provider.as_ref().and_then(|p| p.public_key()) {
            info!("Wallet already approved: {}", address);
            state.address = Some(address);
            state.connected = true;
        }

        let (shutdown, _) = watch::channel(());
        Self {
            provider,
            state: RwLock::new(state),
            shutdown,
        }
    }

    pub fn detached() -> Self {
        Self::new(None)
    }

    fn read(&self) -> RwLockReadGuard<'_, WalletState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, WalletState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> WalletState {
        self.read().clone()
    }

    pub fn address(&self) -> Option<String> {
        self.read().address.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.read().connected
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn connect(&self) -> Result<ConnectOutcome, WalletError> {
        let Some(provider) = self.provider.clone() else {
            warn!("No wallet provider detected, install from {}", INSTALL_URL);
            return Ok(ConnectOutcome::InstallRequired(INSTALL_URL));
        };

        self.write().connecting = true;
        let result = provider.connect().await;

        let mut state = self.write();
        state.connecting = false;
        match result {
            Ok(address) => {
                info!("Wallet connected: {}", address);
                state.address = Some(address.clone());
                state.connected = true;
                Ok(ConnectOutcome::Connected(address))
            }
            Err(e) => {
                error!("Error connecting wallet: {}", e);
                Err(e)
            }
        }
    }

    pub async fn disconnect(&self) -> Result<(), WalletError> {
        let Some(provider) = self.provider.clone() else {
            return Ok(());
        };

        provider.disconnect().await?;

        let mut state = self.write();
        state.address = None;
        state.connected = false;
        info!("Wallet disconnected");
        Ok(())
    }

    pub fn apply_account_event(&self, event: AccountEvent) {
        let AccountEvent::Changed(address) = event;
        let mut state = self.write();
        match address {
            Some(address) => {
                info!("Wallet account changed: {}", address);
                state.address = Some(address);
                state.connected = true;
            }
            None => {
                info!("Wallet account removed");
                state.address = None;
                state.connected = false;
            }
        }
    }

    /// Follow provider account changes until the provider or the session goes away.
    ///
    /// The task only holds a weak reference, so it never keeps the session alive.
    pub fn spawn_account_listener(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let mut events = self.provider.as_ref()?.subscribe();
        let mut closed = self.shutdown.subscribe();
        let session = Arc::downgrade(self);

        Some(tokio::spawn(async move {
            loop {
                tokio::select! {
                    // Only errors once the sender is dropped with the session
                    _ = closed.changed() => break,
                    received = events.recv() => match received {
                        Ok(event) => match session.upgrade() {
                            Some(session) => session.apply_account_event(event),
                            None => break,
                        },
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Missed {} wallet account events", skipped);
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            info!("Wallet account listener stopped");
        }))
    }
}
