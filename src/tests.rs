#[cfg(test)]
mod integration_tests {
    use crate::test_utils::test_utils::{
        mock_bars, setup_empty_test_app, setup_test_app, setup_test_app_state,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use model::{MarketDataProvider, PriceBar, ProviderError, Ticker};

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["provider"], "mock");
    }

    #[tokio::test]
    async fn test_get_tickers() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert!(body["success"].as_bool().unwrap());
        let symbols = body["data"]["symbols"].as_array().unwrap();
        assert_eq!(symbols.len(), 8);
        assert_eq!(symbols[0], "AAPL");
        assert!(symbols.iter().any(|s| s == "INFY.NS"));
    }

    #[tokio::test]
    async fn test_get_history() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers/AAPL/history").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert!(body["success"].as_bool().unwrap());
        assert_eq!(body["data"]["symbol"], "AAPL");
        assert_eq!(body["data"]["total_rows"], 10);

        let bars = body["data"]["bars"].as_array().unwrap();
        assert_eq!(bars.len(), 10);
        assert_eq!(bars[0]["date"], "2024-01-08");
        assert_eq!(bars[9]["date"], "2024-01-19");
        // The unfinalized last session has no close, but stays in the table.
        assert!(bars[9]["close"].is_null());
        assert_eq!(bars[0]["close"], 100.0);
    }

    #[tokio::test]
    async fn test_get_history_tail() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers/AAPL/history?tail=3").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let bars = body["data"]["bars"].as_array().unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0]["date"], "2024-01-17");
        // total_rows still reports the full table
        assert_eq!(body["data"]["total_rows"], 10);
    }

    #[tokio::test]
    async fn test_history_tail_zero_is_rejected() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers/AAPL/history?tail=0").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_not_found() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers/NVDA/history").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert!(!body["success"].as_bool().unwrap());
        assert_eq!(body["code"], "UNKNOWN_TICKER");
    }

    #[tokio::test]
    async fn test_empty_provider_reports_no_data() {
        let app = setup_empty_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers/GME/history").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "NO_DATA");
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("try another symbol"));
    }

    #[tokio::test]
    async fn test_lookup_trading_day() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers/AAPL/history/2024-01-10").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["date"], "2024-01-10");
        assert_eq!(body["data"]["open"], 101.5);
        assert_eq!(body["data"]["close"], 102.0);
        assert_eq!(body["data"]["high"], 103.0);
        assert_eq!(body["data"]["low"], 101.0);
        // the embedded bar carries the full raw row for the filtered-row
        // table, not just the rounded display metrics
        let bar = &body["data"]["bar"];
        assert_eq!(bar["date"], "2024-01-10");
        assert_eq!(bar["open"], 101.5);
        assert_eq!(bar["high"], 103.0);
        assert_eq!(bar["low"], 101.0);
        assert_eq!(bar["close"], 102.0);
        assert_eq!(bar["volume"], 10_002);
    }

    #[tokio::test]
    async fn test_lookup_weekend_is_distinct_miss() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Saturday between two weeks that both have data.
        let response = server.get("/api/v1/tickers/AAPL/history/2024-01-13").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "NO_TRADING_DATA");
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("holiday or weekend"));
    }

    #[tokio::test]
    async fn test_price_chart_splits_series() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers/TSLA/chart").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let data = &body["data"];
        assert_eq!(data["dates"].as_array().unwrap().len(), 10);
        assert_eq!(data["open"].as_array().unwrap().len(), 10);
        // the bar without a close is absent from the close series
        assert_eq!(data["close"].as_array().unwrap().len(), 9);
        assert_eq!(data["close_dates"].as_array().unwrap().len(), 9);
        assert_eq!(data["close_dates"][8], "2024-01-18");
    }

    #[tokio::test]
    async fn test_forecast_extends_exactly_one_year() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers/AAPL/forecast?years=1").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let points = body["data"]["points"].as_array().unwrap();
        // 9 training rows (the close-less bar is dropped) plus 365 days.
        assert_eq!(points.len(), 374);
        assert_eq!(points[0]["ds"], "2024-01-08");
        assert_eq!(points[373]["ds"], "2025-01-17");
        assert_eq!(body["data"]["horizon_days"], 365);

        let tail = body["data"]["tail"].as_array().unwrap();
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[4]["ds"], "2025-01-17");

        for p in points {
            let yhat = p["yhat"].as_f64().unwrap();
            assert!(p["yhat_lower"].as_f64().unwrap() <= yhat);
            assert!(yhat <= p["yhat_upper"].as_f64().unwrap());
        }
    }

    #[tokio::test]
    async fn test_forecast_years_out_of_range_rejected() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers/AAPL/forecast?years=7").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server.get("/api/v1/tickers/AAPL/forecast?years=0").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_forecast_chart_carries_history_overlay() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/tickers/MSFT/forecast/chart?years=1")
            .await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let data = &body["data"];
        assert_eq!(data["symbol"], "MSFT");
        assert_eq!(data["dates"].as_array().unwrap().len(), 374);
        assert_eq!(data["yhat"].as_array().unwrap().len(), 374);
        // observed closes only, the close-less bar is not charted
        assert_eq!(data["history_dates"].as_array().unwrap().len(), 9);
        assert_eq!(data["history_values"].as_array().unwrap().len(), 9);
        assert_eq!(data["history_values"][0], 100.0);
    }

    #[tokio::test]
    async fn test_forecast_components_decomposition() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/tickers/GOOG/forecast/components?years=2")
            .await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let data = &body["data"];
        // 9 training rows plus 2 * 365 days.
        let n = 9 + 730;
        assert_eq!(data["dates"].as_array().unwrap().len(), n);
        assert_eq!(data["trend"].as_array().unwrap().len(), n);
        assert_eq!(data["weekly"].as_array().unwrap().len(), n);
        assert_eq!(data["yearly"].as_array().unwrap().len(), n);
    }

    /// Provider that counts outbound fetches, to observe the cache.
    #[derive(Debug, Default)]
    struct CountingProvider {
        fetches: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl MarketDataProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch_daily(
            &self,
            _ticker: Ticker,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<PriceBar>, ProviderError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(mock_bars())
        }
    }

    #[tokio::test]
    async fn test_history_is_cached_per_ticker() {
        let provider = Arc::new(CountingProvider::default());
        let state = setup_test_app_state(provider.clone());
        let server = TestServer::new(crate::router::create_router(state)).unwrap();

        server
            .get("/api/v1/tickers/AAPL/history")
            .await
            .assert_status(StatusCode::OK);
        server
            .get("/api/v1/tickers/AAPL/history")
            .await
            .assert_status(StatusCode::OK);
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);

        // A different ticker misses the cache.
        server
            .get("/api/v1/tickers/GME/history")
            .await
            .assert_status(StatusCode::OK);
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status(StatusCode::OK);
        let doc: serde_json::Value = response.json();
        assert!(doc["paths"]["/api/v1/tickers/{symbol}/forecast"].is_object());
    }
}
