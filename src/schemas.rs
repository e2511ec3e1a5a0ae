use axum::http::StatusCode;
use axum::response::Json;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

use model::{HistoryTable, MarketDataProvider};

/// Application state shared across handlers.
///
/// This is the composition root's view of the world: the one market-data
/// provider and the per-ticker history cache (keyed by symbol, TTL set at
/// construction). Nothing else survives between requests.
#[derive(Clone)]
pub struct AppState {
    /// Market-data provider behind the trait seam
    pub provider: Arc<dyn MarketDataProvider>,
    /// Loaded history tables, keyed by ticker symbol
    pub cache: Cache<String, Arc<HistoryTable>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("provider", &self.provider.name())
            .field("cached_tickers", &self.cache.entry_count())
            .finish()
    }
}

/// API response wrapper
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            data,
            message: message.into(),
            success: true,
        })
    }
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Build the `(status, body)` error tuple handlers return.
pub fn error_response(
    status: StatusCode,
    code: &str,
    error: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Configured market-data provider
    pub provider: String,
}

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct HistoryQuery {
    /// Return only the last N rows (default: all rows)
    #[validate(range(min = 1, max = 10000))]
    pub tail: Option<usize>,
}

/// Query parameters for the forecast endpoints
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct ForecastQuery {
    /// Years of prediction; horizon is `years * 365` days
    #[validate(range(min = 1, max = 6))]
    pub years: u8,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::tickers::get_tickers,
        crate::handlers::history::get_history,
        crate::handlers::history::lookup_date,
        crate::handlers::history::get_price_chart,
        crate::handlers::forecast::get_forecast,
        crate::handlers::forecast::get_forecast_chart,
        crate::handlers::forecast::get_forecast_components,
    ),
    components(
        schemas(
            ApiResponse<common::TickerList>,
            ApiResponse<common::History>,
            ApiResponse<common::DailyQuote>,
            ApiResponse<common::PriceChart>,
            ApiResponse<common::ForecastTable>,
            ApiResponse<common::ForecastChart>,
            ApiResponse<common::ComponentSeries>,
            common::TickerList,
            common::PriceBarDto,
            common::History,
            common::DailyQuote,
            common::PriceChart,
            common::ForecastPoint,
            common::ForecastTable,
            common::ForecastChart,
            common::ComponentSeries,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "tickers", description = "Preset ticker symbols"),
        (name = "history", description = "Historical prices and date lookup"),
        (name = "forecast", description = "Price forecast and decomposition")
    )
)]
pub struct ApiDoc;
