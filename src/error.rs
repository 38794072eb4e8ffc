use thiserror::Error;

use crate::spec::PlotKind;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid data shape: {0}")]
    InvalidDataShape(String),

    #[error("unrecognized plot kind: {0}")]
    UnrecognizedKind(String),

    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    #[error("{kind} series is missing required key '{key}'")]
    MissingKey { kind: PlotKind, key: String },

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("visualization error: {0}")]
    Visualization(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

// plotters drawing errors
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Visualization(format!("plot drawing failed: {}", err))
    }
}
