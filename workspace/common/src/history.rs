use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::converters::round2;

/// One daily OHLCV bar as it travels over the wire.
///
/// `close` is optional because the provider occasionally returns a bar
/// without a close (for example the in-progress session); such rows are
/// kept in the history but dropped from the forecast training series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceBarDto {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: Option<f64>,
    pub volume: u64,
}

/// The preset ticker symbols the selector offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TickerList {
    pub symbols: Vec<String>,
}

/// Normalized history table for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct History {
    pub symbol: String,
    /// Ordered by date ascending, one bar per trading day.
    pub bars: Vec<PriceBarDto>,
    /// Total row count before any `tail` truncation.
    pub total_rows: usize,
}

/// Result of an exact-date lookup: the four displayed price fields rounded
/// to two decimal places, plus the full matching bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyQuote {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub close: Option<f64>,
    pub high: f64,
    pub low: f64,
    pub bar: PriceBarDto,
}

impl DailyQuote {
    /// Build a quote from a bar, rounding the displayed fields.
    pub fn from_bar(symbol: &str, bar: PriceBarDto) -> Self {
        Self {
            symbol: symbol.to_string(),
            date: bar.date,
            open: round2(bar.open),
            close: bar.close.map(round2),
            high: round2(bar.high),
            low: round2(bar.low),
            bar,
        }
    }
}

/// Dual-series payload for the price-over-time chart.
///
/// The close series carries its own date axis because bars without a close
/// are omitted from it but still chart an open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceChart {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub close_dates: Vec<NaiveDate>,
    pub close: Vec<f64>,
}
