use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

/// One bar as Alpaca encodes it (single-letter field names).
///
/// Volume arrives as a JSON number; it is integral for equities but decoded
/// as `f64` to tolerate fractional values from other asset classes.
#[derive(Deserialize, Debug)]
pub struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
}

#[derive(Deserialize, Debug)]
pub struct AlpacaResponse {
    pub bars: IndexMap<String, Vec<AlpacaBar>>,
    pub next_page_token: Option<String>,
}
