//! Wagerings: prediction-market listing and local bet pricing.

pub mod config;
pub mod data;
pub mod display;
pub mod execution;
pub mod pricing;
pub mod wallet;

pub use data::types::{Market, Outcome};
pub use execution::types::{Bet, BetConfirmation, BetError};
pub use pricing::{compute_odds, OddsQuote, Side};
pub use wallet::{WalletProvider, WalletSession};
