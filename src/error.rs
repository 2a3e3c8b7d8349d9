use thiserror::Error;

/// Fatal transport failure. Anything else is answered in-band.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    NotPositiveInteger { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}
