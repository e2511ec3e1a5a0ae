#[cfg(test)]
pub mod test_utils {
    use crate::config::build_app_state;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use async_trait::async_trait;
    use axum::Router;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use model::{MarketDataProvider, PriceBar, ProviderError, Ticker};

    /// Deterministic in-memory provider: two trading weeks of January 2024
    /// (Mon 2024-01-08 .. Fri 2024-01-19, weekends absent), closes ramping
    /// 1.0 per day from 100.0. The last bar has no close, standing in for
    /// an unfinalized session.
    #[derive(Debug)]
    pub struct MockProvider;

    pub fn mock_bars() -> Vec<PriceBar> {
        let days = [8, 9, 10, 11, 12, 15, 16, 17, 18, 19];
        days.iter()
            .enumerate()
            .map(|(i, &day)| {
                let close = 100.0 + i as f64;
                PriceBar {
                    date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close: if day == 19 { None } else { Some(close) },
                    volume: 10_000 + i as u64,
                }
            })
            .collect()
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn fetch_daily(
            &self,
            _ticker: Ticker,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<PriceBar>, ProviderError> {
            Ok(mock_bars())
        }
    }

    /// Provider that always answers with no rows, for the no-data paths.
    #[derive(Debug)]
    pub struct EmptyProvider;

    #[async_trait]
    impl MarketDataProvider for EmptyProvider {
        fn name(&self) -> &str {
            "empty"
        }

        async fn fetch_daily(
            &self,
            _ticker: Ticker,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<PriceBar>, ProviderError> {
            Ok(vec![])
        }
    }

    /// Create AppState for testing, backed by the given provider.
    pub fn setup_test_app_state(provider: Arc<dyn MarketDataProvider>) -> AppState {
        build_app_state(provider, Duration::from_secs(60))
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        let _ = init_test_tracing();
        create_router(setup_test_app_state(Arc::new(MockProvider)))
    }

    /// Same app, but with a provider that returns no data.
    pub fn setup_empty_test_app() -> Router {
        let _ = init_test_tracing();
        create_router(setup_test_app_state(Arc::new(EmptyProvider)))
    }
}
