use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bar_sync::config::Config;
use bar_sync::db::{connection, migrate};
use market_feed::source::alpaca::AlpacaSource;

#[derive(Parser)]
#[command(version, about = "Market bar ingestor and snapshot CLI")]
struct Cli {
    /// Path to a TOML config file; when omitted, SYMBOLS/DB_PATH env vars
    /// are used instead.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Apply pending schema migrations to the bar store.
    Migrate,
    /// Poll the data source on a fixed cadence and upsert bars.
    Ingest {
        /// Run a single cycle and exit instead of looping.
        #[arg(long)]
        once: bool,
    },
    /// Print snapshot JSON for the given symbols.
    Snapshot {
        /// Symbols to summarize, comma-separated.
        #[arg(long, value_delimiter = ',', required = true)]
        symbols: Vec<String>,
        /// How many recent bars to summarize per symbol.
        #[arg(long, default_value_t = 60)]
        window: usize,
    },
}

fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p),
        None => Config::from_env(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("bar_sync=info".parse()?))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    match cli.cmd {
        Cmd::Migrate => {
            migrate::run(&cfg.db_path)?;
        }
        Cmd::Ingest { once } => {
            migrate::run(&cfg.db_path)?;
            let source = AlpacaSource::new()?;
            if once {
                let mut conn = connection::connect_sqlite(&cfg.db_path)?;
                let report =
                    bar_sync::ingest::run_cycle(&mut conn, &source, &cfg, chrono::Utc::now())
                        .await?;
                println!(
                    "upserted {} rows over {} .. {}",
                    report.rows_upserted, report.window.start, report.window.end
                );
            } else {
                bar_sync::ingest::run_loop(&cfg, &source).await?;
            }
        }
        Cmd::Snapshot { symbols, window } => {
            if window == 0 {
                bail!("window must be at least 1");
            }
            let mut conn = connection::connect_sqlite(&cfg.db_path)?;
            let snaps = bar_sync::snapshot::build_snapshots(&mut conn, &symbols, window)?;
            println!("{}", serde_json::to_string_pretty(&snaps)?);
        }
    }

    Ok(())
}
