use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for a per-minute bars request.
///
/// The timeframe is always one minute — that is the only granularity the bar
/// store persists — so it is not a parameter here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarsRequest {
    /// Symbols to request (e.g., `["AAPL", "MSFT"]`).
    pub symbols: Vec<String>,

    /// Start of the requested range (inclusive, UTC).
    pub start: DateTime<Utc>,

    /// End of the requested range (exclusive, UTC).
    pub end: DateTime<Utc>,

    /// Which vendor feed to read from.
    #[serde(default)]
    pub feed: Feed,

    /// Maximum rows per response page. A high value avoids silent truncation
    /// when backfilling a full session.
    pub limit: u32,
}

impl BarsRequest {
    /// Default page limit; a full RTH session is 390 minute-bars per symbol,
    /// so 10_000 leaves generous headroom.
    pub const DEFAULT_LIMIT: u32 = 10_000;

    /// Builds a request over `[start, end)` with the default feed and limit.
    pub fn minute(symbols: Vec<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            symbols,
            start,
            end,
            feed: Feed::default(),
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Source feed for stock data. IEX is the free feed and is dense only during
/// regular trading hours, which is why the ingestor requests RTH windows.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    #[default]
    Iex,
    Sip,
    Otc,
}

impl Feed {
    /// Wire name used in vendor query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Feed::Iex => "iex",
            Feed::Sip => "sip",
            Feed::Otc => "otc",
        }
    }
}
