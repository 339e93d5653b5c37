//! Purchases CLI
//!
//! Records purchases in a local JSON file and reports them converted to
//! another currency using the Treasury reporting rates of exchange.
//!
//! - Load configuration from environment (and `.env`)
//! - Build the store and rate provider adapters
//! - Run one command and print its result

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exchange_rates::{Rates, StaticRates, TreasuryRatesClient};
use purchases_hex::PurchaseService;
use purchases_hex::inbound::{Command, execute};
use purchases_repo::JsonFileStore;
use purchases_types::{RetrieveTransactionRequest, StoreTransactionRequest, TransactionId};

#[derive(Parser)]
#[command(name = "purchases")]
#[command(author, version, about = "Store purchases and retrieve them in another currency", long_about = None)]
struct Cli {
    /// JSON file holding the stored purchases [env: PURCHASES_STORAGE_PATH]
    #[arg(long, global = true)]
    storage_path: Option<PathBuf>,

    /// Base URL of the rates of exchange API [env: EXCHANGE_RATES_URL]
    #[arg(long, global = true)]
    rates_url: Option<String>,

    /// JSON file of quotations to use instead of the live API [env: EXCHANGE_RATES_FILE]
    #[arg(long, global = true)]
    rates_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove every stored purchase
    Reset,
    /// Store a purchase and print its id
    Store {
        /// Purchase amount, rounded to cents
        #[arg(long, value_parser = parse_amount)]
        amount: Decimal,
        /// Purchase date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Description, truncated to 50 characters
        #[arg(long)]
        description: String,
    },
    /// Retrieve a purchase converted to another currency
    Retrieve {
        /// Purchase id (UUID)
        #[arg(long, value_parser = parse_transaction_id)]
        id: TransactionId,
        /// Target currency as named by the Treasury dataset (e.g. Canada-Dollar)
        #[arg(long)]
        currency: String,
    },
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Reset => Command::Reset,
            Commands::Store {
                amount,
                date,
                description,
            } => Command::Store(StoreTransactionRequest {
                amount,
                date,
                description,
            }),
            Commands::Retrieve { id, currency } => {
                Command::Retrieve(RetrieveTransactionRequest { id, currency })
            }
        }
    }
}

fn parse_amount(s: &str) -> Result<Decimal, String> {
    let s = s.trim();
    Decimal::from_str_exact(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| format!("{} is not a valid decimal number", s))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("{} is not a valid ISO 8601 date", s))
}

fn parse_transaction_id(s: &str) -> Result<TransactionId, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("{} is not a valid UUID", s))
}

async fn build_rates(config: &config::Config) -> Result<Rates> {
    match &config.rates_file {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Can not read rates file {}", path.display()))?;
            let rates = StaticRates::from_json(&json)
                .with_context(|| format!("Can not parse rates file {}", path.display()))?;
            tracing::debug!("Using {} quotations from {}", rates.quotations().len(), path.display());
            Ok(rates.into())
        }
        None => {
            tracing::debug!("Using exchange rates API: {}", config.rates_url);
            Ok(TreasuryRatesClient::new(config.rates_url.as_str()).into())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries only the result line
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::Config::from_env()?.with_overrides(
        cli.storage_path,
        cli.rates_url,
        cli.rates_file,
    );
    tracing::debug!("Using storage: {}", config.storage_path.display());

    let rates = build_rates(&config).await?;
    let service = PurchaseService::new(JsonFileStore::new(config.storage_path), rates);

    match execute(&service, cli.command.into()).await {
        Ok(output) => {
            println!("Result: {}", output.to_json()?);
        }
        Err(err) => {
            if !err.is_domain() {
                tracing::error!(error = ?err, "command failed");
            }
            println!("Error: {}", err);
            std::process::exit(1);
        }
    }

    Ok(())
}
