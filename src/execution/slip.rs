use tracing::info;

use crate::data::types::Market;
use crate::execution::simulator::{BetSimulator, PendingBet};
use crate::execution::types::{BetConfirmation, BetError};
use crate::pricing::{payout_multiplier, OddsQuote, Side};
use crate::wallet::{ConnectOutcome, WalletSession};

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The wallet was not connected; a connection was requested instead.
    ConnectRequested(ConnectOutcome),
    NothingToBet,
    /// A bet is already waiting on confirmation.
    InProgress,
    Placed,
}

/// Betting state for one market: chosen side, typed amount, pending bet.
#[derive(Debug)]
pub struct BetSlip {
    market: Market,
    side: Side,
    amount: String,
    pending: Option<PendingBet>,
}

impl BetSlip {
    pub fn new(market: Market) -> Self {
        Self {
            market,
            side: Side::Yes,
            amount: String::new(),
            pending: None,
        }
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn select_side(&mut self, side: Side) {
        self.side = side;
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub fn is_betting(&self) -> bool {
        self.pending.is_some()
    }

    /// Leading number of the typed amount, so `"3 SOL"` reads as 3.
    /// Text without a leading number counts as zero.
    pub fn bet_amount(&self) -> f64 {
        leading_number(&self.amount)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    pub fn quote(&self) -> OddsQuote {
        self.market.quote(self.side, self.bet_amount())
    }

    /// Multiplier shown on the side button for `side`.
    pub fn payout_for(&self, side: Side) -> f64 {
        payout_multiplier(self.market.yes_volume, self.market.no_volume, side)
    }

    /// Whether the bet button accepts input.
    pub fn can_submit(&self, connected: bool) -> bool {
        !(self.is_betting() || (connected && self.bet_amount() <= 0.0))
    }

    pub async fn submit(
        &mut self,
        session: &WalletSession,
        simulator: &BetSimulator,
    ) -> Result<SubmitOutcome, BetError> {
        let address = match session.address() {
            Some(address) if session.is_connected() => address,
            _ => {
                let outcome = session.connect().await?;
                return Ok(SubmitOutcome::ConnectRequested(outcome));
            }
        };

        if self.is_betting() {
            return Ok(SubmitOutcome::InProgress);
        }

        let amount = self.bet_amount();
        if amount <= 0.0 {
            return Ok(SubmitOutcome::NothingToBet);
        }

        self.pending = Some(simulator.place(&self.market, self.side, amount, &address));
        Ok(SubmitOutcome::Placed)
    }

    /// Wait for the pending bet, then clear the slip.
    pub async fn await_confirmation(&mut self) -> Result<BetConfirmation, BetError> {
        let pending = self.pending.take().ok_or(BetError::NothingPending)?;
        let confirmation = pending.confirm().await?;
        self.amount.clear();
        Ok(confirmation)
    }

    /// Closing the slip drops any bet that has not confirmed yet.
    pub fn close(&mut self) {
        if let Some(mut pending) = self.pending.take() {
            info!("Bet slip closed with a pending bet on {}", self.market.id);
            pending.cancel();
        }
        self.amount.clear();
    }
}

/// Longest numeric prefix of `text` after leading whitespace.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    end = digits_from(end);
    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    // Shrink past dangling signs or dots such as "-" or "."
    (1..=end).rev().find_map(|len| text[..len].parse::<f64>().ok())
}
