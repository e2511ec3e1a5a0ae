//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the backend handlers' request/response payloads
//! so the frontend can deserialize API responses without duplicating shapes.

mod forecast;
mod history;

pub mod converters;

pub use forecast::{ComponentSeries, ForecastChart, ForecastPoint, ForecastTable};
pub use history::{DailyQuote, History, PriceChart, PriceBarDto, TickerList};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
/// Note: The backend has its own definition in src/schemas.rs with the
/// same field names. We mirror it here for the frontend to reuse.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Error response mirror (backend definition in src/schemas.rs).
///
/// The `code` field is what the frontend switches on: `NO_DATA` means the
/// provider had nothing for the ticker (a real failure), `NO_TRADING_DATA`
/// means the chosen date fell on a weekend or holiday (benign warning).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success flag (always false for errors)
    pub success: bool,
}

/// Error code for a ticker the provider returned no rows for.
pub const CODE_NO_DATA: &str = "NO_DATA";
/// Error code for an exact-date lookup miss (weekend or holiday).
pub const CODE_NO_TRADING_DATA: &str = "NO_TRADING_DATA";
/// Error code for an unknown ticker symbol.
pub const CODE_UNKNOWN_TICKER: &str = "UNKNOWN_TICKER";
/// Error code for provider faults other than emptiness.
pub const CODE_PROVIDER_ERROR: &str = "PROVIDER_ERROR";
/// Error code for forecast-engine faults.
pub const CODE_FORECAST_ERROR: &str = "FORECAST_ERROR";
