use axum::response::Json;
use tracing::instrument;

use common::TickerList;
use model::Ticker;

use crate::schemas::ApiResponse;

/// List the preset ticker symbols the selector offers
#[utoipa::path(
    get,
    path = "/api/v1/tickers",
    tag = "tickers",
    responses(
        (status = 200, description = "Preset symbols retrieved successfully", body = ApiResponse<TickerList>)
    )
)]
#[instrument]
pub async fn get_tickers() -> Json<ApiResponse<TickerList>> {
    let list = TickerList {
        symbols: Ticker::ALL.iter().map(|t| t.to_string()).collect(),
    };
    ApiResponse::ok(list, "Ticker symbols retrieved successfully")
}
