pub mod formatters;
pub mod models;
pub mod routes;
pub mod state;
pub mod ui;
pub mod utils;

mod tests;

/// Seconds between price snapshot refreshes.
pub const REFRESH_INTERVAL_SECS: u64 = 30;
/// Seconds between history/detail refreshes.
pub const HISTORY_REFRESH_SECS: u64 = 300;
/// Days of daily closes shown in the sparkline.
pub const HISTORY_DAYS: u32 = 7;
