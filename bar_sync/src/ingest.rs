//! The recurring fetch-and-upsert cycle.
//!
//! One cycle resolves the session window for "now", fetches bars for every
//! configured symbol over that window, and commits the whole batch to the
//! store. The loop runs cycles strictly sequentially on one task, so two
//! cycles can never overlap the same store, and a failed cycle is logged and
//! retried on the next tick rather than crashing the loop.

use std::future::Future;

use anyhow::Context;
use chrono::{DateTime, TimeDelta, Utc};
use diesel::SqliteConnection;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use market_feed::models::request::BarsRequest;
use market_feed::source::MarketDataSource;

use crate::config::Config;
use crate::db::connection::connect_sqlite;
use crate::session::{SessionWindow, resolve_window};
use crate::store;

/// Outcome of one completed ingestion cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Rows written to the store (insert or overwrite).
    pub rows_upserted: usize,
    /// The window the cycle requested.
    pub window: SessionWindow,
}

/// Run a single fetch-and-upsert cycle at instant `now`.
///
/// Symbols absent from the fetch response are simply absent from the batch.
/// Any fetch or store failure aborts the cycle with no partial batch
/// committed; the caller decides whether to retry.
pub async fn run_cycle(
    conn: &mut SqliteConnection,
    source: &dyn MarketDataSource,
    cfg: &Config,
    now: DateTime<Utc>,
) -> anyhow::Result<CycleReport> {
    let window = resolve_window(now, TimeDelta::minutes(i64::from(cfg.lookback_minutes)));

    let mut req = BarsRequest::minute(cfg.symbols.clone(), window.start, window.end);
    req.feed = cfg.feed;

    let series = source.fetch_bars(&req).await.with_context(|| {
        format!(
            "fetch bars for {} symbols over {} .. {}",
            cfg.symbols.len(),
            window.start,
            window.end
        )
    })?;

    let rows_upserted = store::upsert_bars(conn, &series).with_context(|| {
        format!(
            "commit batch for {} symbols over {} .. {}",
            cfg.symbols.len(),
            window.start,
            window.end
        )
    })?;

    info!(
        rows_upserted,
        window_start = %window.start,
        window_end = %window.end,
        "ingest cycle complete"
    );

    Ok(CycleReport {
        rows_upserted,
        window,
    })
}

/// Run ingestion cycles on a fixed cadence until ctrl-c.
///
/// Missed ticks are delayed, not bunched, and each cycle completes before
/// the next tick is observed. A failed cycle is logged at warn and the loop
/// keeps going; only opening the store can fail this function.
pub async fn run_loop(cfg: &Config, source: &dyn MarketDataSource) -> anyhow::Result<()> {
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "ctrl-c handler unavailable, stopping ingest loop");
        }
    };
    run_until(cfg, source, shutdown).await
}

/// Run ingestion cycles on a fixed cadence until `shutdown` completes.
///
/// The shutdown future is created once and kept pinned across iterations, so
/// a signal that arrives while a cycle is in flight is not lost: the cycle
/// finishes, the next select observes the completed future, and the loop
/// stops without scheduling another tick.
pub async fn run_until(
    cfg: &Config,
    source: &dyn MarketDataSource,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let mut conn = connect_sqlite(&cfg.db_path)
        .with_context(|| format!("open bar store at {}", cfg.db_path))?;

    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(cfg.cadence_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        symbols = cfg.symbols.len(),
        cadence_secs = cfg.cadence_secs,
        db_path = %cfg.db_path,
        "ingest loop started"
    );

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = run_cycle(&mut conn, source, cfg, Utc::now()).await {
                    let chain = format!("{err:#}");
                    warn!(error = %chain, "ingest cycle skipped");
                }
            }
            _ = &mut shutdown => {
                info!("shutdown signal received, stopping ingest loop");
                return Ok(());
            }
        }
    }
}
