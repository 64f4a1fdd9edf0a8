//! Compact numeric summaries of recent price action.
//!
//! A snapshot is derived on demand from whatever bars the store currently
//! holds; it is never persisted. Its shape is the one contract downstream
//! agent consumers depend on, so a symbol with no history is reported as an
//! explicit `unavailable` value rather than an error or a zero-filled
//! summary.

use diesel::SqliteConnection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};
use market_feed::models::bar::Bar;

use crate::store;

/// Summary of up to `window` recent bars for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Close of the most recent bar.
    pub last_close: f64,
    /// Last close minus the first bar's open.
    pub change_abs: f64,
    /// `change_abs` as a percentage of the first bar's open.
    pub change_pct: f64,
    /// Highest high across the window.
    pub high: f64,
    /// Lowest low across the window.
    pub low: f64,
    /// Mean per-minute volume across the window.
    pub avg_volume: f64,
    /// Bars actually summarized; may be less than the requested window.
    pub bar_count: usize,
    /// Timestamp of the most recent bar used.
    pub as_of: DateTime<Utc>,
}

/// Snapshot result for one symbol. `Unavailable` is a normal, displayable
/// state, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SymbolSnapshot {
    /// A summary was computed from at least one stored bar.
    Ready(Snapshot),
    /// No bars are stored for this symbol.
    Unavailable,
}

/// Summarize a chronological, non-empty slice of bars.
fn summarize(bars: &[Bar]) -> Option<Snapshot> {
    let (first, last) = (bars.first()?, bars.last()?);

    let mut high = f64::MIN;
    let mut low = f64::MAX;
    let mut volume_total = 0i64;
    for bar in bars {
        high = high.max(bar.high);
        low = low.min(bar.low);
        volume_total += bar.volume;
    }

    let change_abs = last.close - first.open;
    let change_pct = if first.open > 0.0 {
        change_abs / first.open * 100.0
    } else {
        0.0
    };

    Some(Snapshot {
        last_close: last.close,
        change_abs,
        change_pct,
        high,
        low,
        avg_volume: volume_total as f64 / bars.len() as f64,
        bar_count: bars.len(),
        as_of: last.timestamp,
    })
}

/// Build a snapshot for each requested symbol from the current store
/// contents.
///
/// Reads up to `window` most recent bars per symbol. The returned map
/// preserves the caller's symbol order and always contains one entry per
/// requested symbol. Symbol validation (non-empty list, positive window)
/// belongs to the tool boundary, not here.
pub fn build_snapshots(
    conn: &mut SqliteConnection,
    symbols: &[String],
    window: usize,
) -> anyhow::Result<IndexMap<String, SymbolSnapshot>> {
    let mut out = IndexMap::with_capacity(symbols.len());
    for sym in symbols {
        let sym = sym.trim().to_uppercase();
        let bars = store::read_recent(conn, &sym, window)?;
        let snap = match summarize(&bars) {
            Some(s) => SymbolSnapshot::Ready(s),
            None => SymbolSnapshot::Unavailable,
        };
        out.insert(sym, snap);
    }
    Ok(out)
}
