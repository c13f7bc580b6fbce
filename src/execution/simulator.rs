use chrono::Utc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::BettingConfig;
use crate::data::types::Market;
use crate::execution::types::{Bet, BetConfirmation, BetError};
use crate::pricing::Side;

/// Stand-in for bet placement: confirms after a fixed delay, persists nothing.
#[derive(Debug, Clone)]
pub struct BetSimulator {
    delay: Duration,
}

impl BetSimulator {
    pub fn new(config: &BettingConfig) -> Self {
        Self::with_delay(Duration::from_millis(config.confirmation_delay_ms))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Start a simulated placement, priced at the market's current volumes.
    pub fn place(&self, market: &Market, side: Side, amount: f64, wallet_address: &str) -> PendingBet {
        let quote = market.quote(side, amount);
        let bet = Bet {
            id: Uuid::new_v4().to_string(),
            market_id: market.id.clone(),
            wallet_address: wallet_address.to_string(),
            side,
            amount,
            potential_return: quote.potential_return,
            odds: quote.odds,
            created_at: Utc::now(),
        };

        info!(
            "Simulating bet {}: {} SOL on {} in market {} @ {:.2}x",
            bet.id, amount, side, market.id, quote.odds
        );

        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            BetConfirmation::for_bet(bet)
        });

        PendingBet {
            handle: Some(handle),
        }
    }
}

/// A simulated bet waiting on its timer. Dropping it cancels the bet.
#[derive(Debug)]
pub struct PendingBet {
    handle: Option<JoinHandle<BetConfirmation>>,
}

impl PendingBet {
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            warn!("Pending bet cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_none()
    }

    pub async fn confirm(mut self) -> Result<BetConfirmation, BetError> {
        let handle = self.handle.take().ok_or(BetError::Cancelled)?;
        let confirmation = handle.await.map_err(|_| BetError::Cancelled)?;
        info!("{}", confirmation.message);
        Ok(confirmation)
    }
}

impl Drop for PendingBet {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
