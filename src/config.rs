use anyhow::Result;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use model::{MarketDataProvider, YahooFinanceProvider};

use crate::schemas::AppState;

const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const CACHE_CAPACITY: u64 = 64;

/// Initialize application configuration and state.
///
/// The composition root: builds the Yahoo Finance provider and the
/// per-ticker cache, with the TTL taken from `STOCKCAST_CACHE_TTL_SECS`
/// (seconds, default 300).
pub async fn initialize_app_state() -> Result<AppState> {
    dotenvy::dotenv().ok();

    let ttl_secs = std::env::var("STOCKCAST_CACHE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_CACHE_TTL_SECS);

    let provider: Arc<dyn MarketDataProvider> = Arc::new(YahooFinanceProvider::new());
    tracing::info!(provider = provider.name(), ttl_secs, "initializing app state");

    Ok(build_app_state(provider, Duration::from_secs(ttl_secs)))
}

/// Build state from explicit parts. Tests use this to inject a mock
/// provider and a short TTL.
pub fn build_app_state(
    provider: Arc<dyn MarketDataProvider>,
    cache_ttl: Duration,
) -> AppState {
    let cache = Cache::builder()
        .max_capacity(CACHE_CAPACITY)
        .time_to_live(cache_ttl)
        .build();

    AppState { provider, cache }
}
