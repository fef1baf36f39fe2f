use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed set of coins the dashboard tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coin {
    Bitcoin,
    Ethereum,
}

impl Coin {
    pub const ALL: [Coin; 2] = [Coin::Bitcoin, Coin::Ethereum];

    pub fn id(&self) -> &'static str {
        match self {
            Coin::Bitcoin => "bitcoin",
            Coin::Ethereum => "ethereum",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Coin::Bitcoin => "BTC",
            Coin::Ethereum => "ETH",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Coin::Bitcoin => "₿",
            Coin::Ethereum => "Ξ",
        }
    }
}

/// One coin's entry in the `/simple/price` response.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CoinPrice {
    #[serde(default)]
    pub usd: f64,
    #[serde(default)]
    pub brl: f64,
    #[serde(default)]
    pub usd_24h_change: f64,
    #[serde(default)]
    pub usd_24h_vol: f64,
    #[serde(default)]
    pub usd_market_cap: f64,
}

/// Full `/simple/price` payload keyed by coin id. Replaced wholesale on
/// every successful fetch, never merged field by field.
pub type PriceSnapshot = HashMap<String, CoinPrice>;

/// `/coins/{id}/market_chart` payload. Each pair is [timestamp, price].
#[derive(Serialize, Deserialize, Debug)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<(f64, f64)>,
}

impl MarketChartResponse {
    /// Daily closes in chronological order, oldest first.
    pub fn closing_prices(&self) -> Vec<f64> {
        self.prices.iter().map(|&(_, price)| price).collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CurrencyValue {
    pub usd: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MarketData {
    pub ath: CurrencyValue,
    pub atl: CurrencyValue,
    pub circulating_supply: f64,
    pub max_supply: Option<f64>,
}

/// `/coins/{id}` response, trimmed to the fields the dashboard consumes.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CoinDetailResponse {
    pub market_data: MarketData,
}

/// Per-coin detail metadata held by the dashboard.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CoinDetail {
    pub ath: f64,
    pub atl: f64,
    pub circulating_supply: f64,
    pub max_supply: Option<f64>,
}

impl From<CoinDetailResponse> for CoinDetail {
    fn from(resp: CoinDetailResponse) -> Self {
        CoinDetail {
            ath: resp.market_data.ath.usd,
            atl: resp.market_data.atl.usd,
            circulating_supply: resp.market_data.circulating_supply,
            max_supply: resp.market_data.max_supply,
        }
    }
}
