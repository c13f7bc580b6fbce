pub mod odds;
pub mod types;

pub use odds::{compute_odds, implied_probabilities, odds_for_probability, payout_multiplier};
pub use types::{OddsQuote, Side};
