use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bar::PriceBar;
use crate::ticker::Ticker;

/// Normalized table of daily bars for one ticker.
///
/// Ordered by date ascending, one row per trading day (weekends and
/// holidays simply absent). The table is never mutated after load; scoped
/// uses (lookup, chart series, forecast projection) borrow or copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTable {
    symbol: Ticker,
    bars: Vec<PriceBar>,
}

impl HistoryTable {
    /// Normalize raw provider bars into a table: sort by date ascending.
    ///
    /// Sorting is stable, so if the provider ever hands back two bars for
    /// one calendar day, their relative order survives and lookups keep
    /// first-match-wins semantics.
    pub fn from_bars(symbol: Ticker, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        debug!(symbol = %symbol, rows = bars.len(), "normalized history table");
        Self { symbol, bars }
    }

    pub fn symbol(&self) -> Ticker {
        self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Last `n` rows, in table order.
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    /// Exact-match lookup on the date column.
    ///
    /// Returns the first of potentially multiple matches (duplicate dates
    /// should not occur with daily bars, but the contract is explicit
    /// rather than incidental). A miss is a miss: no nearest-date
    /// fallback, even when adjacent days have data.
    pub fn bar_on(&self, date: NaiveDate) -> Option<&PriceBar> {
        self.bars.iter().find(|bar| bar.date == date)
    }

    /// Date of the last row, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }

    /// True when every consecutive pair of rows strictly advances in date.
    pub fn dates_strictly_increasing(&self) -> bool {
        self.bars.windows(2).all(|w| w[0].date < w[1].date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(y: i32, m: u32, d: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close: Some(close),
            volume: 1_000,
        }
    }

    fn table() -> HistoryTable {
        // A trading week: Mon 2024-01-08 .. Fri 2024-01-12, weekend absent.
        HistoryTable::from_bars(
            Ticker::Aapl,
            vec![
                bar(2024, 1, 8, 185.0),
                bar(2024, 1, 9, 186.0),
                bar(2024, 1, 10, 187.0),
                bar(2024, 1, 11, 188.0),
                bar(2024, 1, 12, 189.0),
            ],
        )
    }

    #[test]
    fn normalization_sorts_by_date() {
        let t = HistoryTable::from_bars(
            Ticker::Aapl,
            vec![bar(2024, 1, 10, 187.0), bar(2024, 1, 8, 185.0), bar(2024, 1, 9, 186.0)],
        );
        assert!(t.dates_strictly_increasing());
        assert_eq!(t.bars()[0].date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    }

    #[test]
    fn normalization_is_idempotent_on_sorted_input() {
        let t = table();
        let renormalized = HistoryTable::from_bars(t.symbol(), t.bars().to_vec());
        assert_eq!(renormalized, t);
    }

    #[test]
    fn exact_date_hit_returns_that_row() {
        let t = table();
        let hit = t.bar_on(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).unwrap();
        assert_eq!(hit.close, Some(187.0));
    }

    #[test]
    fn weekend_date_misses_with_no_neighbor_fallback() {
        let t = table();
        // Saturday between two trading days with data.
        assert!(t.bar_on(NaiveDate::from_ymd_opt(2024, 1, 13).unwrap()).is_none());
    }

    #[test]
    fn duplicate_dates_resolve_to_first_match() {
        let mut bars = table().bars().to_vec();
        let mut dup = bar(2024, 1, 10, 999.0);
        dup.volume = 7;
        bars.push(dup);
        let t = HistoryTable::from_bars(Ticker::Aapl, bars);
        let hit = t.bar_on(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).unwrap();
        // The original row wins, not the duplicate appended later.
        assert_eq!(hit.close, Some(187.0));
    }

    #[test]
    fn tail_returns_last_rows_in_order() {
        let t = table();
        let tail = t.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].date, NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
        assert_eq!(tail[1].date, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
    }

    #[test]
    fn tail_larger_than_table_is_whole_table() {
        let t = table();
        assert_eq!(t.tail(50).len(), t.len());
    }
}
