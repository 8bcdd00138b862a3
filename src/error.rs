use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// A row date did not match the configured date parser pattern.
    #[error("row {row}: cannot parse date `{value}` with pattern `{pattern}`")]
    Parse {
        row: usize,
        value: String,
        pattern: String,
    },

    /// Unknown enum value, invalid format pattern or malformed configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
