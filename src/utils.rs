pub mod coingecko;

use chrono::Local;

pub fn now_hms() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

pub fn now_date_time() -> String {
    Local::now().format("%d/%m/%Y  %H:%M:%S").to_string()
}
