//! Data-provider abstraction.
//!
//! The [`MarketDataProvider`] trait hides the concrete market-data source
//! so the application can swap implementations and tests can inject a
//! canned one. The cache layer sits above this trait; providers know
//! nothing about caching.

pub mod yahoo;

pub use yahoo::YahooFinanceProvider;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::bar::PriceBar;
use crate::ticker::Ticker;

/// Faults a provider can surface.
///
/// An empty result is deliberately *not* an error: emptiness is the one
/// provider condition the application handles explicitly, so
/// [`MarketDataProvider::fetch_daily`] reports it as an empty `Vec`.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("provider rejected symbol '{symbol}': {reason}")]
    SymbolRejected { symbol: String, reason: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// A source of daily OHLCV bars.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name, used in health reporting and logs.
    fn name(&self) -> &str;

    /// Fetch raw daily bars for `ticker` over `[start, end]`, dates
    /// ascending. An empty `Vec` means the provider has nothing for the
    /// symbol in that window.
    async fn fetch_daily(
        &self,
        ticker: Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, ProviderError>;
}
