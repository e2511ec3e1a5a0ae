//! Market-data domain: the preset ticker set, daily price bars, the
//! normalized history table and the data-provider abstraction.

pub mod bar;
pub mod history;
pub mod provider;
pub mod ticker;

pub use bar::PriceBar;
pub use history::HistoryTable;
pub use provider::{MarketDataProvider, ProviderError, YahooFinanceProvider};
pub use ticker::Ticker;

use chrono::{NaiveDate, Utc};

/// First day of the fixed historical window every load covers.
pub const HISTORY_START: (i32, u32, u32) = (2010, 1, 1);

/// The fixed fetch window: 2010-01-01 through today.
pub fn history_window() -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(HISTORY_START.0, HISTORY_START.1, HISTORY_START.2)
        .expect("static window start is a valid date");
    (start, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_starts_2010_and_ends_today() {
        let (start, end) = history_window();
        assert_eq!(start, NaiveDate::from_ymd_opt(2010, 1, 1).unwrap());
        assert!(end >= start);
        assert_eq!(end, Utc::now().date_naive());
    }
}
