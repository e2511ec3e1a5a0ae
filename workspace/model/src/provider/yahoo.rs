use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::debug;

use crate::bar::{flatten_label, PriceBar};
use crate::provider::{MarketDataProvider, ProviderError};
use crate::ticker::Ticker;

const YAHOO_BASE_API_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartResponseJson {
    chart: ChartJson,
}

#[derive(Debug, Deserialize)]
struct ChartJson {
    result: Option<Vec<ChartResultJson>>,
    error: Option<ChartErrorJson>,
}

#[derive(Debug, Deserialize)]
struct ChartErrorJson {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResultJson {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: IndicatorsJson,
}

#[derive(Debug, Deserialize)]
struct IndicatorsJson {
    /// One entry per requested symbol; value arrays keyed by field label.
    /// For some request shapes the labels come back suffixed with the
    /// symbol (`close.AAPL`), hence the label flattening on access.
    quote: Vec<BTreeMap<String, Vec<Option<f64>>>>,
}

/// Daily-bar client for the Yahoo Finance v8 chart API.
#[derive(Clone)]
pub struct YahooFinanceProvider {
    base_url: String,
    client: reqwest::Client,
}

impl Default for YahooFinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooFinanceProvider {
    pub fn new() -> Self {
        Self {
            base_url: YAHOO_BASE_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different host (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn chart_url(&self, ticker: Ticker, start: NaiveDate, end: NaiveDate) -> String {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        // Inclusive end: the API treats period2 as exclusive.
        let period2 = end.and_time(NaiveTime::MIN).and_utc().timestamp() + 86_400;
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url, ticker, period1, period2
        )
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        "yahoo-finance"
    }

    async fn fetch_daily(
        &self,
        ticker: Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, ProviderError> {
        let url = self.chart_url(ticker, start, end);
        debug!("fetch_daily | url: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .json::<ChartResponseJson>()
            .await?;

        parse_chart_response(ticker, response)
    }
}

/// Resolve a value array by its flattened field label.
fn field<'a>(
    quote: &'a BTreeMap<String, Vec<Option<f64>>>,
    name: &str,
) -> &'a [Option<f64>] {
    quote
        .iter()
        .find(|(label, _)| flatten_label(label) == name)
        .map(|(_, values)| values.as_slice())
        .unwrap_or(&[])
}

/// Turn a chart-API response into raw bars, dates ascending.
///
/// Rows missing open, high, low or volume are skipped entirely; a missing
/// close is preserved as `None` so the forecast projection can drop it.
fn parse_chart_response(
    ticker: Ticker,
    response: ChartResponseJson,
) -> Result<Vec<PriceBar>, ProviderError> {
    if let Some(error) = response.chart.error {
        return Err(ProviderError::SymbolRejected {
            symbol: ticker.to_string(),
            reason: format!("{}: {}", error.code, error.description),
        });
    }

    let Some(result) = response.chart.result.and_then(|mut r| r.pop()) else {
        // No result block and no error: nothing for this symbol.
        return Ok(Vec::new());
    };

    let Some(quote) = result.indicators.quote.first() else {
        return Ok(Vec::new());
    };

    let opens = field(quote, "open");
    let highs = field(quote, "high");
    let lows = field(quote, "low");
    let closes = field(quote, "close");
    let volumes = field(quote, "volume");

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let date = DateTime::from_timestamp(*ts, 0)
            .ok_or_else(|| ProviderError::MalformedResponse(format!("bad timestamp {ts}")))?
            .date_naive();

        let at = |values: &[Option<f64>]| values.get(i).copied().flatten();
        let (Some(open), Some(high), Some(low), Some(volume)) =
            (at(opens), at(highs), at(lows), at(volumes))
        else {
            debug!("fetch_daily | skipping incomplete bar at {}", date);
            continue;
        };

        bars.push(PriceBar {
            date,
            open,
            high,
            low,
            close: at(closes),
            volume: volume as u64,
        });
    }

    Ok(bars)
}
