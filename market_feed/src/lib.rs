//! Vendor data-source layer: bar models, the [`MarketDataSource`] trait, and
//! the Alpaca REST implementation.
//!
//! This crate knows nothing about persistence. It fetches raw per-minute bars
//! for a UTC time range and hands them to the caller as [`models::bar::BarSeries`]
//! values, one per symbol.

pub mod models;
pub mod source;
