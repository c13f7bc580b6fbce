use chrono::{DateTime, Utc};

use crate::data::types::Market;

const MS_PER_DAY: i64 = 1000 * 60 * 60 * 24;
const DAYS_PER_MONTH: i64 = 30;

/// Round to `digits` decimals, ties away from zero.
///
/// `{:.N}` alone breaks exact ties to even, which would show 1.25 as 1.2.
fn round_half_up(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

pub fn format_volume(volume: f64) -> String {
    if volume >= 1000.0 {
        format!("{:.1}K", round_half_up(volume / 1000.0, 1))
    } else {
        format!("{:.1}", round_half_up(volume, 1))
    }
}

pub fn format_liquidity(liquidity: f64) -> String {
    if liquidity >= 1_000_000.0 {
        format!("${:.1}M", round_half_up(liquidity / 1_000_000.0, 1))
    } else if liquidity >= 1000.0 {
        format!("${:.1}K", round_half_up(liquidity / 1000.0, 1))
    } else {
        format!("${:.0}", round_half_up(liquidity, 0))
    }
}

pub fn format_percent(prob: f64) -> String {
    format!("{:.1}%", round_half_up(prob * 100.0, 1))
}

/// Coarse countdown: whole 30-day months, else whole days, else `< 1d`.
/// Past end dates also read `< 1d`.
pub fn time_remaining(end_date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (end_date - now).num_milliseconds();
    let days = diff_ms.div_euclid(MS_PER_DAY);
    let months = days.div_euclid(DAYS_PER_MONTH);

    if months > 0 {
        format!("{}mo", months)
    } else if days > 0 {
        format!("{}d", days)
    } else {
        "< 1d".to_string()
    }
}

/// `AbCd...WxYz` form of a wallet address.
pub fn abbreviate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// One line of the market list.
pub fn render_market_line(market: &Market, now: DateTime<Utc>) -> String {
    let (yes_prob, no_prob) = market.probabilities();
    format!(
        "[{}] {} ({}, {}) | YES {} NO {} | {} SOL (↑{} ↓{}) | LIQUIDITY: {} | {}",
        market.outcome.label(),
        market.question,
        market.category,
        market.icon,
        format_percent(yes_prob),
        format_percent(no_prob),
        format_volume(market.total_volume),
        format_volume(market.yes_volume),
        format_volume(market.no_volume),
        format_liquidity(market.liquidity),
        time_remaining(market.end_date, now),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::sample_market;
    use chrono::Duration;

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(0.0), "0.0");
        assert_eq!(format_volume(999.9), "999.9");
        assert_eq!(format_volume(1000.0), "1.0K");
        assert_eq!(format_volume(15300.0), "15.3K");
    }

    #[test]
    fn test_format_liquidity() {
        assert_eq!(format_liquidity(999.0), "$999");
        assert_eq!(format_liquidity(1000.0), "$1.0K");
        assert_eq!(format_liquidity(2_500_000.0), "$2.5M");
        assert_eq!(format_liquidity(999_999.0), "$1000.0K");
    }

    #[test]
    fn test_ties_round_up() {
        assert_eq!(format_volume(1250.0), "1.3K");
        assert_eq!(format_volume(0.25), "0.3");
        assert_eq!(format_liquidity(2.5), "$3");
        assert_eq!(format_liquidity(1_250_000.0), "$1.3M");
        assert_eq!(format_percent(1.0 / 16.0), "6.3%");
        assert_eq!(format_percent(0.5), "50.0%");
    }

    #[test]
    fn test_time_remaining_buckets() {
        let now = Utc::now();
        assert_eq!(time_remaining(now + Duration::days(95), now), "3mo");
        assert_eq!(time_remaining(now + Duration::days(30), now), "1mo");
        assert_eq!(time_remaining(now + Duration::days(29) + Duration::hours(23), now), "29d");
        assert_eq!(time_remaining(now + Duration::hours(23), now), "< 1d");
        assert_eq!(time_remaining(now - Duration::days(3), now), "< 1d");
    }

    #[test]
    fn test_abbreviate_address() {
        assert_eq!(
            abbreviate_address("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"),
            "7xKX...gAsU"
        );
        assert_eq!(abbreviate_address("short"), "short");
    }

    #[test]
    fn test_render_market_line() {
        let now = Utc::now();
        let mut market = sample_market("m1", "Will BTC moon?", 600.0, 400.0);
        market.liquidity = 12_000.0;
        market.end_date = now + Duration::days(3) + Duration::hours(1);

        let line = render_market_line(&market, now);
        assert!(line.starts_with("[Even] Will BTC moon? (crypto, bitcoin)"));
        assert!(line.contains("YES 60.0% NO 40.0%"));
        assert!(line.contains("1.0K SOL"));
        assert!(line.contains("LIQUIDITY: $12.0K"));
        assert!(line.ends_with("3d"));
    }
}
