use crate::pricing::types::{OddsQuote, Side};

/// Probability assigned to both sides when no volume has been recorded.
pub const EVEN_PROBABILITY: f64 = 0.5;

/// Multiplier paid when a side's implied probability is zero.
pub const FALLBACK_ODDS: f64 = 2.0;

/// Implied (yes, no) probabilities from the two volume counters.
///
/// The total is always recomputed from the counters, never read from a
/// stored `total_volume`.
pub fn implied_probabilities(yes_volume: f64, no_volume: f64) -> (f64, f64) {
    let total = yes_volume + no_volume;
    if total > 0.0 {
        (yes_volume / total, no_volume / total)
    } else {
        (EVEN_PROBABILITY, EVEN_PROBABILITY)
    }
}

/// Payout multiplier for a side with implied probability `prob`.
pub fn odds_for_probability(prob: f64) -> f64 {
    if prob > 0.0 {
        1.0 / prob
    } else {
        FALLBACK_ODDS
    }
}

/// Multiplier a bet on `side` would pay at the current volumes.
pub fn payout_multiplier(yes_volume: f64, no_volume: f64, side: Side) -> f64 {
    let (yes_prob, no_prob) = implied_probabilities(yes_volume, no_volume);
    match side {
        Side::Yes => odds_for_probability(yes_prob),
        Side::No => odds_for_probability(no_prob),
    }
}

/// Price a bet of `stake` on `side`.
///
/// Stake is not clamped: a zero or negative stake yields zero or negative
/// return and profit, and callers decide whether that counts as a bet.
/// Negative volumes are not rejected either.
pub fn compute_odds(yes_volume: f64, no_volume: f64, side: Side, stake: f64) -> OddsQuote {
    let (yes_prob, no_prob) = implied_probabilities(yes_volume, no_volume);

    let current_prob = match side {
        Side::Yes => yes_prob,
        Side::No => no_prob,
    };
    let odds = odds_for_probability(current_prob);

    let potential_return = stake * odds;
    let potential_profit = potential_return - stake;

    OddsQuote {
        yes_prob,
        no_prob,
        odds,
        potential_return,
        potential_profit,
    }
}
