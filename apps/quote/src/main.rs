//! # Powderbook Quote
//!
//! Command-line front end for the Powderbook cost calculator.
//!
//! ## Usage
//! ```bash
//! # 500 bullets, $250 + $15 shipping
//! cargo run -p powderbook-quote -- unit --price 250 --shipping 15 --qty 500
//!
//! # Cost per round for a 24 gr load, 100-round batch
//! cargo run -p powderbook-quote -- round --charge 24 --powder 35 --primer 0.08 \
//!     --projectile 0.25 --case 0.50 --reloads 5 --rounds 100
//!
//! # Total spent across exported purchase records
//! cargo run -p powderbook-quote -- spent --file purchases.json
//! ```
//!
//! ## Flow
//! ```text
//! env (POWDERBOOK_*) ──► QuoteConfig ──┐
//!                                      ├──► powderbook-core ──► stdout
//! argv ──────────────► Invocation ─────┘
//! ```

mod commands;
mod config;
mod error;

use std::env;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::commands::{
    load_purchases, parse_args, quote_round, quote_spent, quote_unit, Command, USAGE,
};
use crate::config::{OutputMode, QuoteConfig};
use crate::error::QuoteResult;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays clean for JSON output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        return Err(e.into());
    }

    Ok(())
}

fn run() -> QuoteResult<()> {
    let config = QuoteConfig::load()?;
    info!(
        symbol = %config.currency.symbol,
        decimals = config.currency.decimals,
        rounding = %config.currency.rounding,
        "Configuration loaded"
    );

    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = parse_args(&args)?;
    let json = invocation.json || config.output == OutputMode::Json;

    let output = match invocation.command {
        Command::Help => USAGE.to_string(),
        Command::Unit(unit) => {
            let quote = quote_unit(&unit, &config.currency);
            if json {
                serde_json::to_string_pretty(&quote)?
            } else {
                quote.render()
            }
        }
        Command::Round(round) => {
            let quote = quote_round(&round, &config.currency);
            if json {
                serde_json::to_string_pretty(&quote)?
            } else {
                quote.render()
            }
        }
        Command::Spent(spent) => {
            let purchases = load_purchases(&spent.file)?;
            info!(file = %spent.file.display(), count = purchases.len(), "Loaded purchases");
            let quote = quote_spent(&purchases, &config.currency)?;
            if json {
                serde_json::to_string_pretty(&quote)?
            } else {
                quote.render()
            }
        }
    };

    println!("{}", output);
    Ok(())
}
