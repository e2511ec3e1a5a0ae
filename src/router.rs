use crate::handlers::{
    forecast::{get_forecast, get_forecast_chart, get_forecast_components},
    health::health_check,
    history::{get_history, get_price_chart, lookup_date},
    tickers::get_tickers,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Ticker and history routes
        .route("/api/v1/tickers", get(get_tickers))
        .route("/api/v1/tickers/:symbol/history", get(get_history))
        .route("/api/v1/tickers/:symbol/history/:date", get(lookup_date))
        .route("/api/v1/tickers/:symbol/chart", get(get_price_chart))
        // Forecast routes
        .route("/api/v1/tickers/:symbol/forecast", get(get_forecast))
        .route(
            "/api/v1/tickers/:symbol/forecast/chart",
            get(get_forecast_chart),
        )
        .route(
            "/api/v1/tickers/:symbol/forecast/components",
            get(get_forecast_components),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
