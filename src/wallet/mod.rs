pub mod provider;
pub mod session;

pub use provider::{AccountEvent, StaticWalletProvider, WalletError, WalletProvider};
pub use session::{ConnectOutcome, WalletSession, WalletState, INSTALL_URL};
