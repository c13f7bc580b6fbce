use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pricing::Side;

/// Receipt of a confirmed simulated bet. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Bet {
    pub id: String,
    pub market_id: String,
    pub wallet_address: String,
    pub side: Side,
    pub amount: f64,
    pub potential_return: f64,
    pub odds: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct BetConfirmation {
    pub bet: Bet,
    pub message: String,
}

impl BetConfirmation {
    pub fn for_bet(bet: Bet) -> Self {
        let message = format!(
            "Bet placed! {} SOL on {}",
            bet.amount,
            bet.side.as_str().to_uppercase()
        );
        Self { bet, message }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BetError {
    #[error("Bet was cancelled before confirmation")]
    Cancelled,

    #[error("No bet is awaiting confirmation")]
    NothingPending,

    #[error(transparent)]
    Wallet(#[from] crate::wallet::WalletError),
}
