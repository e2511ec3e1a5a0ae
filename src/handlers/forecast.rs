use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use polars::prelude::DataFrame;
use std::sync::Arc;
use tracing::{debug, instrument};

use common::{ComponentSeries, ForecastChart, ForecastTable, CODE_FORECAST_ERROR};
use compute::{default_forecaster, horizon_days, training_frame};
use model::HistoryTable;

use crate::handlers::history::load_history;
use crate::helpers::converters::{forecast_points, forecast_series};
use crate::schemas::{error_response, ApiResponse, AppState, ErrorResponse, ForecastQuery};

/// Load history and run the whole forecast pipeline for one request:
/// project to the training frame, fit, extend by the horizon, predict.
///
/// The model is refitted per request; only the history fetch behind
/// `load_history` is cached.
async fn run_forecast(
    state: &AppState,
    symbol: &str,
    years: u8,
) -> Result<(Arc<HistoryTable>, DataFrame, u32), (StatusCode, Json<ErrorResponse>)> {
    let table = load_history(state, symbol).await?;
    let horizon = horizon_days(years);

    let forecast = (|| {
        let train = training_frame(&table)?;
        let fitted = default_forecaster().fit(&train)?;
        let future = fitted.make_future_frame(horizon)?;
        fitted.predict(&future)
    })()
    .map_err(|e| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            CODE_FORECAST_ERROR,
            e.to_string(),
        )
    })?;

    debug!(symbol, years, rows = forecast.height(), "forecast computed");
    Ok((table, forecast, horizon))
}

/// Forecast table over the history plus the requested horizon
#[utoipa::path(
    get,
    path = "/api/v1/tickers/{symbol}/forecast",
    tag = "forecast",
    params(
        ("symbol" = String, Path, description = "Ticker symbol"),
        ForecastQuery
    ),
    responses(
        (status = 200, description = "Forecast computed successfully", body = ApiResponse<ForecastTable>),
        (status = 404, description = "Unknown symbol or no data", body = ErrorResponse),
        (status = 500, description = "Forecast computation failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast(
    Path(symbol): Path<String>,
    Valid(Query(query)): Valid<Query<ForecastQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastTable>>, (StatusCode, Json<ErrorResponse>)> {
    let (table, forecast, horizon) = run_forecast(&state, &symbol, query.years).await?;

    let points = forecast_points(&forecast).map_err(|e| {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, CODE_FORECAST_ERROR, e)
    })?;
    let dto = ForecastTable::new(table.symbol().as_str(), horizon, points);
    Ok(ApiResponse::ok(dto, "Forecast computed successfully"))
}

/// Forecast chart payload: observed history plus prediction band
#[utoipa::path(
    get,
    path = "/api/v1/tickers/{symbol}/forecast/chart",
    tag = "forecast",
    params(
        ("symbol" = String, Path, description = "Ticker symbol"),
        ForecastQuery
    ),
    responses(
        (status = 200, description = "Forecast chart payload computed successfully", body = ApiResponse<ForecastChart>),
        (status = 404, description = "Unknown symbol or no data", body = ErrorResponse),
        (status = 500, description = "Forecast computation failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast_chart(
    Path(symbol): Path<String>,
    Valid(Query(query)): Valid<Query<ForecastQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastChart>>, (StatusCode, Json<ErrorResponse>)> {
    let (table, forecast, _) = run_forecast(&state, &symbol, query.years).await?;

    let series = forecast_series(&forecast).map_err(|e| {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, CODE_FORECAST_ERROR, e)
    })?;

    let mut chart = ForecastChart {
        symbol: table.symbol().to_string(),
        history_dates: Vec::with_capacity(table.len()),
        history_values: Vec::with_capacity(table.len()),
        dates: series.dates,
        yhat: series.yhat,
        yhat_lower: series.yhat_lower,
        yhat_upper: series.yhat_upper,
    };
    for bar in table.bars() {
        if let Some(close) = bar.close {
            chart.history_dates.push(bar.date);
            chart.history_values.push(close);
        }
    }

    Ok(ApiResponse::ok(
        chart,
        "Forecast chart payload computed successfully",
    ))
}

/// Decomposed trend/weekly/yearly component series
#[utoipa::path(
    get,
    path = "/api/v1/tickers/{symbol}/forecast/components",
    tag = "forecast",
    params(
        ("symbol" = String, Path, description = "Ticker symbol"),
        ForecastQuery
    ),
    responses(
        (status = 200, description = "Component series computed successfully", body = ApiResponse<ComponentSeries>),
        (status = 404, description = "Unknown symbol or no data", body = ErrorResponse),
        (status = 500, description = "Forecast computation failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast_components(
    Path(symbol): Path<String>,
    Valid(Query(query)): Valid<Query<ForecastQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ComponentSeries>>, (StatusCode, Json<ErrorResponse>)> {
    let (table, forecast, _) = run_forecast(&state, &symbol, query.years).await?;

    let series = forecast_series(&forecast).map_err(|e| {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, CODE_FORECAST_ERROR, e)
    })?;

    let components = ComponentSeries {
        symbol: table.symbol().to_string(),
        dates: series.dates,
        trend: series.trend,
        weekly: series.weekly,
        yearly: series.yearly,
    };

    Ok(ApiResponse::ok(
        components,
        "Component series computed successfully",
    ))
}
