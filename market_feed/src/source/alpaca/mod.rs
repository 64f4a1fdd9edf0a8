//! Alpaca Market Data REST source (`/v2/stocks/bars`).

mod response;

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;

use crate::{
    models::{
        bar::{Bar, BarSeries},
        request::BarsRequest,
    },
    source::{
        ApiSnafu, ClientBuildSnafu, InvalidApiKeySnafu, MarketDataSource, MissingEnvVarSnafu,
        RequestSnafu, SourceError, SourceInitError, ValidationSnafu,
    },
};

use response::{AlpacaBar, AlpacaResponse};

const BASE_URL: &str = "https://data.alpaca.markets/v2/stocks/bars";

/// Alpaca REST client for minute bars.
pub struct AlpacaSource {
    client: Client,
    _api_key: SecretString,
    _secret_key: SecretString,
}

impl AlpacaSource {
    /// Creates a new Alpaca source.
    ///
    /// Reads credentials from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables and installs them as default request headers.
    pub fn new() -> Result<Self, SourceInitError> {
        let api_key =
            SecretString::new(get_env_var("APCA_API_KEY_ID").context(MissingEnvVarSnafu)?.into());
        let secret_key = SecretString::new(
            get_env_var("APCA_API_SECRET_KEY")
                .context(MissingEnvVarSnafu)?
                .into(),
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(api_key.expose_secret()).context(InvalidApiKeySnafu)?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(secret_key.expose_secret())
                .context(InvalidApiKeySnafu)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            _api_key: api_key,
            _secret_key: secret_key,
        })
    }

    fn query_params(req: &BarsRequest) -> Vec<(String, String)> {
        vec![
            ("symbols".to_string(), req.symbols.join(",")),
            ("timeframe".to_string(), "1Min".to_string()),
            ("start".to_string(), req.start.to_rfc3339()),
            ("end".to_string(), req.end.to_rfc3339()),
            ("feed".to_string(), req.feed.as_str().to_string()),
            ("limit".to_string(), req.limit.to_string()),
        ]
    }
}

fn validate(req: &BarsRequest) -> Result<(), SourceError> {
    if req.symbols.is_empty() {
        return ValidationSnafu {
            message: "symbol list is empty",
        }
        .fail();
    }
    if req.start >= req.end {
        return ValidationSnafu {
            message: format!("empty time range: {} >= {}", req.start, req.end),
        }
        .fail();
    }
    Ok(())
}

#[async_trait]
impl MarketDataSource for AlpacaSource {
    async fn fetch_bars(&self, req: &BarsRequest) -> Result<Vec<BarSeries>, SourceError> {
        validate(req)?;

        let mut all_bars: IndexMap<String, Vec<AlpacaBar>> = IndexMap::new();
        let mut next_page_token: Option<String> = None;

        loop {
            let mut query_params = Self::query_params(req);
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            let response = self
                .client
                .get(BASE_URL)
                .query(&query_params)
                .send()
                .await
                .context(RequestSnafu)?;

            if !response.status().is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu { message }.fail();
            }

            let alpaca_response = response
                .json::<AlpacaResponse>()
                .await
                .context(RequestSnafu)?;

            // Merge the bars from the current page into our collection.
            for (symbol, bars) in alpaca_response.bars {
                all_bars.entry(symbol).or_default().extend(bars);
            }

            if let Some(token) = alpaca_response.next_page_token {
                next_page_token = Some(token);
            } else {
                break;
            }
        }

        let result = all_bars
            .into_iter()
            .map(|(symbol, alpaca_bars)| {
                let bars = alpaca_bars
                    .into_iter()
                    .map(|ab| Bar {
                        timestamp: ab.timestamp,
                        open: ab.open,
                        high: ab.high,
                        low: ab.low,
                        close: ab.close,
                        volume: ab.volume as i64,
                    })
                    .collect();

                BarSeries { symbol, bars }
            })
            .collect();

        Ok(result)
    }
}
