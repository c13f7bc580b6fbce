pub mod format;

pub use format::{
    abbreviate_address, format_liquidity, format_percent, format_volume, render_market_line,
    time_remaining,
};
