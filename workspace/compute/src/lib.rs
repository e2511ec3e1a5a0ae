pub mod error;
pub mod forecast;
pub mod frame;

pub use error::{ComputeError, Result};
pub use forecast::{FittedForecaster, SeasonalTrendForecaster};
pub use frame::training_frame;

/// Forecast horizon in days for a requested number of years.
///
/// Deterministically `years * 365`; leap days are deliberately not
/// accounted for.
pub fn horizon_days(years: u8) -> u32 {
    u32::from(years) * 365
}

/// Returns the default pre-configured forecaster used everywhere the
/// application fits a model.
pub fn default_forecaster() -> SeasonalTrendForecaster {
    SeasonalTrendForecaster::default()
}
