use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use common::{
    DailyQuote, History, PriceChart, CODE_NO_DATA, CODE_NO_TRADING_DATA, CODE_PROVIDER_ERROR,
    CODE_UNKNOWN_TICKER,
};
use model::{HistoryTable, Ticker};

use crate::helpers::converters::{bar_to_dto, table_to_history};
use crate::schemas::{error_response, ApiResponse, AppState, ErrorResponse, HistoryQuery};

/// Load the history table for a symbol, through the per-ticker cache.
///
/// On a cache miss this performs the one outbound provider fetch and
/// normalizes the result; an empty provider result maps to the explicit
/// `NO_DATA` failure rather than an empty table.
pub async fn load_history(
    state: &AppState,
    symbol: &str,
) -> Result<Arc<HistoryTable>, (StatusCode, Json<ErrorResponse>)> {
    let ticker: Ticker = symbol.parse().map_err(|_| {
        error_response(
            StatusCode::NOT_FOUND,
            CODE_UNKNOWN_TICKER,
            format!("'{symbol}' is not one of the preset ticker symbols"),
        )
    })?;

    if let Some(table) = state.cache.get(ticker.as_str()).await {
        debug!(symbol = %ticker, "history cache hit");
        return Ok(table);
    }

    let (start, end) = model::history_window();
    let bars = state
        .provider
        .fetch_daily(ticker, start, end)
        .await
        .map_err(|e| {
            warn!(symbol = %ticker, error = %e, "provider fetch failed");
            error_response(StatusCode::BAD_GATEWAY, CODE_PROVIDER_ERROR, e.to_string())
        })?;

    if bars.is_empty() {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            CODE_NO_DATA,
            format!("Failed to load stock data for {ticker}. Please try another symbol."),
        ));
    }

    let table = Arc::new(HistoryTable::from_bars(ticker, bars));
    state
        .cache
        .insert(ticker.as_str().to_string(), table.clone())
        .await;
    Ok(table)
}

/// Get the normalized history table for a ticker
#[utoipa::path(
    get,
    path = "/api/v1/tickers/{symbol}/history",
    tag = "history",
    params(
        ("symbol" = String, Path, description = "Ticker symbol"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "History retrieved successfully", body = ApiResponse<History>),
        (status = 404, description = "Unknown symbol or no data", body = ErrorResponse),
        (status = 502, description = "Provider failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_history(
    Path(symbol): Path<String>,
    Valid(Query(query)): Valid<Query<HistoryQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<History>>, (StatusCode, Json<ErrorResponse>)> {
    let table = load_history(&state, &symbol).await?;
    let history = table_to_history(&table, query.tail);
    Ok(ApiResponse::ok(history, "History retrieved successfully"))
}

/// Look up the bar for one calendar date
#[utoipa::path(
    get,
    path = "/api/v1/tickers/{symbol}/history/{date}",
    tag = "history",
    params(
        ("symbol" = String, Path, description = "Ticker symbol"),
        ("date" = NaiveDate, Path, description = "Calendar date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Matching trading day found", body = ApiResponse<DailyQuote>),
        (status = 404, description = "No trading data for this date (weekend or holiday), or no data for the symbol", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn lookup_date(
    Path((symbol, date)): Path<(String, NaiveDate)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DailyQuote>>, (StatusCode, Json<ErrorResponse>)> {
    let table = load_history(&state, &symbol).await?;

    // Exact match only; a miss is the expected weekend/holiday case and
    // deliberately distinct from the NO_DATA failure above.
    let Some(bar) = table.bar_on(date) else {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            CODE_NO_TRADING_DATA,
            format!("No trading data for {date} (holiday or weekend)."),
        ));
    };

    let quote = DailyQuote::from_bar(table.symbol().as_str(), bar_to_dto(bar));
    Ok(ApiResponse::ok(quote, "Trading day retrieved successfully"))
}

/// Dual-series payload for the price-over-time chart
#[utoipa::path(
    get,
    path = "/api/v1/tickers/{symbol}/chart",
    tag = "history",
    params(
        ("symbol" = String, Path, description = "Ticker symbol")
    ),
    responses(
        (status = 200, description = "Chart payload retrieved successfully", body = ApiResponse<PriceChart>),
        (status = 404, description = "Unknown symbol or no data", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_price_chart(
    Path(symbol): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PriceChart>>, (StatusCode, Json<ErrorResponse>)> {
    let table = load_history(&state, &symbol).await?;

    let mut chart = PriceChart {
        symbol: table.symbol().to_string(),
        dates: Vec::with_capacity(table.len()),
        open: Vec::with_capacity(table.len()),
        close_dates: Vec::with_capacity(table.len()),
        close: Vec::with_capacity(table.len()),
    };
    for bar in table.bars() {
        chart.dates.push(bar.date);
        chart.open.push(bar.open);
        if let Some(close) = bar.close {
            chart.close_dates.push(bar.date);
            chart.close.push(close);
        }
    }

    Ok(ApiResponse::ok(chart, "Chart payload retrieved successfully"))
}
