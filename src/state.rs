use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::{Coin, CoinDetail, CoinPrice, PriceSnapshot};
use crate::utils::coingecko::{CoinGecko, FetchError};
use crate::utils::now_hms;
use crate::HISTORY_DAYS;

/// Everything the dashboard holds between refreshes. There is exactly one
/// snapshot per data category; a failed fetch keeps the previous value.
pub struct DashboardState {
    pub prices: Option<PriceSnapshot>,
    pub histories: HashMap<Coin, Vec<f64>>,
    pub details: HashMap<Coin, CoinDetail>,
    pub last_update: String,
    pub healthy: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        DashboardState {
            prices: None,
            histories: HashMap::new(),
            details: HashMap::new(),
            last_update: "—".to_string(),
            healthy: false,
        }
    }

    /// Replace-or-keep for the price snapshot. Success swaps the whole
    /// snapshot and stamps the update time; failure only flips health.
    pub fn apply_prices(&mut self, result: Result<PriceSnapshot, FetchError>) {
        match result {
            Ok(snapshot) => {
                self.prices = Some(snapshot);
                self.healthy = true;
                self.last_update = now_hms();
            }
            Err(_) => {
                self.healthy = false;
            }
        }
    }

    pub fn apply_history(&mut self, coin: Coin, result: Result<Vec<f64>, FetchError>) {
        if let Ok(history) = result {
            self.histories.insert(coin, history);
        }
    }

    pub fn apply_detail(&mut self, coin: Coin, result: Result<CoinDetail, FetchError>) {
        if let Ok(detail) = result {
            self.details.insert(coin, detail);
        }
    }

    pub fn coin_price(&self, coin: Coin) -> Option<&CoinPrice> {
        self.prices.as_ref().and_then(|prices| prices.get(coin.id()))
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Initial blocking fetch sequence run once before the periodic loop:
/// history and detail for every coin, then one price snapshot. Failures
/// leave the corresponding entries absent rather than defaulted.
pub async fn seed(state: &mut DashboardState, client: &CoinGecko) {
    for coin in Coin::ALL {
        state.apply_history(coin, client.fetch_history(coin.id(), HISTORY_DAYS).await);
        state.apply_detail(coin, client.fetch_detail(coin.id()).await);
    }
    state.apply_prices(client.fetch_prices().await);
}

/// A named refresh cadence checked against elapsed wall time, so a missed
/// tick still fires on the next pass instead of slipping a full interval.
pub struct RefreshTimer {
    pub interval: Duration,
    pub last_fired: Instant,
}

impl RefreshTimer {
    pub fn new(interval: Duration) -> Self {
        RefreshTimer {
            interval,
            last_fired: Instant::now(),
        }
    }

    pub fn due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_fired) >= self.interval
    }

    pub fn fire(&mut self, now: Instant) {
        self.last_fired = now;
    }
}
