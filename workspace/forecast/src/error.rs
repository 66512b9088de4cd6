use thiserror::Error;

/// Error types for the forecast module
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),
}

impl From<polars::error::PolarsError> for ForecastError {
    fn from(error: polars::error::PolarsError) -> Self {
        ForecastError::DataFrame(error.to_string())
    }
}

/// Type alias for Result with ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;
