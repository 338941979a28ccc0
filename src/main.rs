// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use clap::{Parser, Subcommand};
use currency_converter::{config, db, export, log, seed_currencies, CurrencyConverter, CurrencyStore};
use dotenvy::dotenv;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about = "Convert amounts between currencies stored in a local database")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database URL, overrides the config file and DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all stored currencies
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single currency by code
    Find { code: String },
    /// Convert an amount from one currency to another
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    /// Add a new currency
    Add {
        code: String,
        name: String,
        /// Rate to the base currency (EUR)
        rate: String,
    },
    /// Insert the currencies listed in the config file
    Seed,
    /// Export all currencies to CSV
    Export {
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();
    log::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = config::load_config(cli.config.as_deref(), cli.database_url)?;

    let pool = db::create_db_pool(&settings.database_url, settings.max_connections).await?;
    let store = CurrencyStore::new(pool);

    match cli.command {
        Commands::List { json } => {
            let app = CurrencyConverter::load(store).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(app.currencies())?);
            } else if app.currencies().is_empty() {
                println!("No currencies stored yet. Add one with `add <code> <name> <rate>`.");
            } else {
                for currency in app.currencies() {
                    println!("{} ({})", currency, currency.exchange_rate);
                }
            }
        }
        Commands::Find { code } => match store.find_by_code(&code.trim().to_uppercase()).await? {
            Some(currency) => println!("{} ({})", currency, currency.exchange_rate),
            None => anyhow::bail!("Currency {} not found", code),
        },
        Commands::Convert { amount, from, to } => {
            let app = CurrencyConverter::load(store).await?;
            let conversion = app.convert(&amount, Some(&from), Some(&to))?;
            println!("{}", conversion);
        }
        Commands::Add { code, name, rate } => {
            let mut app = CurrencyConverter::load(store).await?;
            let currency = app.add_currency(&code, &name, &rate).await?;
            println!("✅ Added {} ({})", currency, currency.exchange_rate);
        }
        Commands::Seed => {
            let inserted = seed_currencies(&store, &settings.currencies).await?;
            println!("✅ Seeded {} currencies", inserted);
        }
        Commands::Export { output } => {
            let path = export::export_currencies_csv(&store, &output).await?;
            println!("📁 CSV file created: {}", path.display());
        }
    }

    Ok(())
}
