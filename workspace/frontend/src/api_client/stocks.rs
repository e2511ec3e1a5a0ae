use chrono::NaiveDate;

use common::{
    ComponentSeries, DailyQuote, ForecastChart, ForecastTable, History, PriceChart, TickerList,
};

use super::{get, ApiError};

/// List the preset ticker symbols.
pub async fn get_tickers() -> Result<TickerList, ApiError> {
    get("/tickers").await
}

/// Last `tail` rows of the history table.
pub async fn get_history_tail(symbol: String, tail: usize) -> Result<History, ApiError> {
    get(&format!("/tickers/{symbol}/history?tail={tail}")).await
}

/// Exact-date lookup; misses come back as a `NO_TRADING_DATA` error.
pub async fn get_quote(symbol: String, date: NaiveDate) -> Result<DailyQuote, ApiError> {
    get(&format!("/tickers/{symbol}/history/{date}")).await
}

/// Dual open/close series for the price chart.
pub async fn get_price_chart(symbol: String) -> Result<PriceChart, ApiError> {
    get(&format!("/tickers/{symbol}/chart")).await
}

/// Forecast table over the history plus `years` of prediction.
pub async fn get_forecast(symbol: String, years: u8) -> Result<ForecastTable, ApiError> {
    get(&format!("/tickers/{symbol}/forecast?years={years}")).await
}

/// Forecast chart payload: history markers plus prediction band.
pub async fn get_forecast_chart(symbol: String, years: u8) -> Result<ForecastChart, ApiError> {
    get(&format!("/tickers/{symbol}/forecast/chart?years={years}")).await
}

/// Decomposed trend/weekly/yearly component series.
pub async fn get_forecast_components(
    symbol: String,
    years: u8,
) -> Result<ComponentSeries, ApiError> {
    get(&format!("/tickers/{symbol}/forecast/components?years={years}")).await
}
