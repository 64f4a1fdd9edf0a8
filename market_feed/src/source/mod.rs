//! Source abstraction for market data vendors.
//!
//! [`MarketDataSource`] is the single seam between the ingestion pipeline and
//! any concrete vendor API. Implementations handle vendor-specific request
//! construction, pagination, and decoding; callers only see [`BarSeries`]
//! values and the unified [`SourceError`] taxonomy.
//!
//! The trait is async and object-safe (`dyn MarketDataSource`) so the
//! ingestion loop can be tested against a scripted fake.

pub mod alpaca;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{bar::BarSeries, request::BarsRequest};

/// Fetches per-minute bars from a market data vendor.
///
/// A source may return fewer symbols than requested (nothing traded in the
/// window) and fewer bars than the window spans (sparse feed). Neither is an
/// error.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches bars for all requested symbols over `[start, end)`.
    ///
    /// Returns one [`BarSeries`] per symbol that had data, in the order the
    /// vendor reported them.
    async fn fetch_bars(&self, req: &BarsRequest) -> Result<Vec<BarSeries>, SourceError>;
}

/// Errors that can occur while constructing a source instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SourceInitError {
    /// A credential environment variable is not set.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// The HTTP client could not be built.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// A credential contains characters that cannot appear in a header.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur inside a [`MarketDataSource`] implementation.
///
/// All of these are transient from the ingestion loop's point of view: the
/// cycle is skipped and retried on the next tick.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SourceError {
    /// The request itself failed (network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Request {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The vendor returned a non-success status (auth error, rate limit).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this vendor.
    #[snafu(display("Invalid request for source: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },
}
