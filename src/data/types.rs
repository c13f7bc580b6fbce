use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::{compute_odds, implied_probabilities, OddsQuote, Side};

/// Server-side precomputed badge. Unknown values render as `Even`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Likely,
    Unlikely,
    #[default]
    #[serde(other)]
    Even,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Likely => "Likely",
            Outcome::Unlikely => "Unlikely",
            Outcome::Even => "Even",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
    pub yes_volume: f64,
    pub no_volume: f64,
    #[serde(default)]
    pub total_volume: f64,
    #[serde(default)]
    pub liquidity: f64,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub outcome: Outcome,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub winning_side: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Market {
    /// Live (yes, no) probabilities from the volume counters.
    pub fn probabilities(&self) -> (f64, f64) {
        implied_probabilities(self.yes_volume, self.no_volume)
    }

    pub fn quote(&self, side: Side, stake: f64) -> OddsQuote {
        compute_odds(self.yes_volume, self.no_volume, side, stake)
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.question.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
pub(crate) fn sample_market(id: &str, question: &str, yes_volume: f64, no_volume: f64) -> Market {
    let now = Utc::now();
    Market {
        id: id.to_string(),
        question: question.to_string(),
        description: String::new(),
        icon: "bitcoin".to_string(),
        category: "crypto".to_string(),
        yes_volume,
        no_volume,
        total_volume: yes_volume + no_volume,
        liquidity: 0.0,
        end_date: now + chrono::Duration::days(10),
        outcome: Outcome::Even,
        resolved: false,
        winning_side: None,
        created_at: now,
        updated_at: now,
    }
}
