use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// Error from Polars Series operations
    #[error("Series error: {0}")]
    Series(String),

    /// Error from forecast computation
    #[error("Forecast computation error: {0}")]
    ForecastComputation(String),

    /// Error from date operations
    #[error("Date error: {0}")]
    Date(String),

    /// Runtime error for unexpected situations
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<polars::error::PolarsError> for ComputeError {
    fn from(error: polars::error::PolarsError) -> Self {
        let compute_error = match error {
            polars::error::PolarsError::NoData(_) => {
                ComputeError::DataFrame(format!("No data: {}", error))
            }
            polars::error::PolarsError::ShapeMismatch(_) => {
                ComputeError::DataFrame(format!("Shape mismatch: {}", error))
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                ComputeError::DataFrame(format!("Schema mismatch: {}", error))
            }
            polars::error::PolarsError::ColumnNotFound(_) => {
                ComputeError::DataFrame(format!("Column not found: {}", error))
            }
            _ => ComputeError::Series(format!("Series error: {}", error)),
        };
        error!(?compute_error, "polars error");
        compute_error
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
