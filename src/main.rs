use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use wagerings::config::{Config, EnvConfig};
use wagerings::data::board::{MarketBoard, View};
use wagerings::data::supabase::SupabaseClient;
use wagerings::display::{abbreviate_address, format_percent, render_market_line};
use wagerings::execution::simulator::BetSimulator;
use wagerings::execution::slip::{BetSlip, SubmitOutcome};
use wagerings::pricing::{compute_odds, Side};
use wagerings::wallet::{ConnectOutcome, StaticWalletProvider, WalletProvider, WalletSession};

#[derive(Parser)]
#[command(name = "wagerings", about = "Browse prediction markets and price bets")]
struct Cli {
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List unresolved markets, highest volume first
    Markets {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        trending: bool,
    },
    /// Price a bet from raw volumes
    Quote {
        #[arg(long)]
        yes: f64,
        #[arg(long)]
        no: f64,
        #[arg(long, value_parser = Side::from_str)]
        side: Side,
        #[arg(long)]
        stake: f64,
    },
    /// Simulate placing a bet on a listed market
    Bet {
        #[arg(long)]
        market: String,
        #[arg(long, value_parser = Side::from_str)]
        side: Side,
        #[arg(long)]
        amount: String,
        /// Wallet address to connect with; without one no wallet is detected
        #[arg(long)]
        wallet: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let level = tracing::Level::from_str(&config.app.log_level).unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Command::Markets { search, trending } => {
            let mut board = load_board(&config).await?;
            board.set_search(search);
            if trending {
                board.set_view(View::Trending);
            }
            print_board(&board);
        }
        Command::Quote { yes, no, side, stake } => {
            let quote = compute_odds(yes, no, side, stake);
            println!("YES {}  NO {}", format_percent(quote.yes_prob), format_percent(quote.no_prob));
            println!("Odds: {:.2}x", quote.odds);
            println!("Potential Return: {:.2} SOL", quote.potential_return);
            println!("Potential Profit: {:.2} SOL", quote.potential_profit);
        }
        Command::Bet { market, side, amount, wallet } => {
            let board = load_board(&config).await?;
            let market = board
                .find(&market)
                .cloned()
                .with_context(|| format!("Unknown market: {}", market))?;

            let provider = wallet.map(|address| {
                Arc::new(StaticWalletProvider::new(address)) as Arc<dyn WalletProvider>
            });
            let session = Arc::new(WalletSession::new(provider));
            let _listener = session.spawn_account_listener();
            let simulator = BetSimulator::new(&config.betting);

            let mut slip = BetSlip::new(market);
            slip.select_side(side);
            slip.set_amount(amount);

            // First submit connects the wallet, second places the bet
            for _ in 0..2 {
                match slip.submit(&session, &simulator).await? {
                    SubmitOutcome::ConnectRequested(ConnectOutcome::InstallRequired(url)) => {
                        println!("No wallet detected. Install one from {}", url);
                        return Ok(());
                    }
                    SubmitOutcome::ConnectRequested(ConnectOutcome::Connected(address)) => {
                        println!("Connected {}", abbreviate_address(&address));
                    }
                    SubmitOutcome::NothingToBet => {
                        println!("Enter a bet amount greater than zero");
                        return Ok(());
                    }
                    SubmitOutcome::InProgress | SubmitOutcome::Placed => break,
                }
            }

            let quote = slip.quote();
            println!("{}", slip.market().question);
            println!(
                "YES {:.2}x payout  NO {:.2}x payout",
                slip.payout_for(Side::Yes),
                slip.payout_for(Side::No)
            );
            println!(
                "Betting {:.2} SOL on {} at {:.2}x, potential return {:.2} SOL",
                slip.bet_amount(),
                slip.side().as_str().to_uppercase(),
                quote.odds,
                quote.potential_return
            );
            let confirmation = slip.await_confirmation().await?;
            println!("{}", confirmation.message);
        }
    }

    Ok(())
}

async fn load_board(config: &Config) -> Result<MarketBoard> {
    let env_config = EnvConfig::load()?;
    let client = SupabaseClient::new(
        env_config.supabase_url,
        env_config.supabase_anon_key,
        Duration::from_secs(config.backend.request_timeout_secs),
    )?;

    tracing::info!("Loading markets...");
    Ok(MarketBoard::new(client.load_markets().await))
}

fn print_board(board: &MarketBoard) {
    let visible = board.visible();
    println!("MARKET ({})", visible.len());

    if visible.is_empty() {
        println!("No markets available");
        return;
    }

    let now = Utc::now();
    for market in visible {
        println!("{}", render_market_line(market, now));
    }
}
