//! Canonical in-memory representation of a one-minute OHLCV bar.
//!
//! This struct is the standard output of every [`MarketDataSource`](crate::source::MarketDataSource)
//! implementation, regardless of vendor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One minute of OHLCV data.
///
/// The timestamp marks the *start* of the bar interval and is UTC. Prices are
/// positive; volume is a non-negative share count. Vendors may revise a bar
/// shortly after it closes, so two observations of the same minute can carry
/// different values — the most recent one wins downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Start of the bar interval (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the interval.
    pub high: f64,

    /// Lowest price during the interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the interval.
    pub volume: i64,
}

/// All bars returned for a single symbol, in the vendor's order
/// (ascending by timestamp for every supported source).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// Uppercase ticker (e.g., "AAPL").
    pub symbol: String,
    /// The per-minute bars for this symbol.
    pub bars: Vec<Bar>,
}
