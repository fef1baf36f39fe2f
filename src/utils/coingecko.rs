use crate::models::{Coin, CoinDetail, CoinDetailResponse, MarketChartResponse, PriceSnapshot};
use dotenv::dotenv;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The only error kind surfaced by fetches. Timeouts, DNS failures and
/// connection refusals arrive as `Request`; non-2xx responses as `Status`.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(StatusCode),
}

/// CoinGecko API client. One GET per call, fixed timeout, no retries;
/// retry policy belongs to the caller's next refresh tick.
#[derive(Clone)]
pub struct CoinGecko {
    client: Client,
    base_url: String,
}

impl CoinGecko {
    pub fn init() -> Result<Self, reqwest::Error> {
        dotenv().ok();
        let base_url =
            env::var("COINGECKO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(&base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(CoinGecko {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(query).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }
        Ok(resp.json::<T>().await?)
    }

    /// Current price, 24h change, 24h volume and market cap for every
    /// tracked coin, in USD and BRL.
    pub async fn fetch_prices(&self) -> Result<PriceSnapshot, FetchError> {
        self.get_json("/simple/price", &Self::price_query()).await
    }

    /// Same call as `fetch_prices`, but the raw upstream JSON. Used by the
    /// backend proxy, which forwards the payload untouched.
    pub async fn fetch_prices_raw(&self) -> Result<serde_json::Value, FetchError> {
        self.get_json("/simple/price", &Self::price_query()).await
    }

    /// Daily closing prices for the last `days` days, oldest first.
    pub async fn fetch_history(&self, coin_id: &str, days: u32) -> Result<Vec<f64>, FetchError> {
        let chart: MarketChartResponse = self
            .get_json(
                &format!("/coins/{}/market_chart", coin_id),
                &[
                    ("vs_currency", "usd".to_string()),
                    ("days", days.to_string()),
                    ("interval", "daily".to_string()),
                ],
            )
            .await?;
        Ok(chart.closing_prices())
    }

    /// ATH/ATL and supply figures for one coin.
    pub async fn fetch_detail(&self, coin_id: &str) -> Result<CoinDetail, FetchError> {
        let detail: CoinDetailResponse = self
            .get_json(
                &format!("/coins/{}", coin_id),
                &[
                    ("localization", "false".to_string()),
                    ("tickers", "false".to_string()),
                    ("community_data", "false".to_string()),
                ],
            )
            .await?;
        Ok(detail.into())
    }

    fn price_query() -> Vec<(&'static str, String)> {
        let ids = Coin::ALL
            .iter()
            .map(|coin| coin.id())
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("ids", ids),
            ("vs_currencies", "usd,brl".to_string()),
            ("include_24hr_change", "true".to_string()),
            ("include_24hr_vol", "true".to_string()),
            ("include_market_cap", "true".to_string()),
        ]
    }
}
