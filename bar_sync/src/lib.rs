//! Rolling local store of per-minute market bars, plus the views derived
//! from it.
//!
//! The pipeline: a [`market_feed::source::MarketDataSource`] is polled on a
//! fixed cadence ([`ingest`]) over a trading-session-aware window
//! ([`session`]), and every returned row is upserted into a SQLite table
//! keyed by `(symbol, ts_utc)` ([`store`]). On-demand consumers read compact
//! per-symbol summaries from that table ([`snapshot`]).

#![deny(missing_docs)]

pub mod config;
pub mod db;
pub mod ingest;
pub mod schema;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod tz;
