use std::io;
use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised while parsing or validating core domain values.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = StdResult<T, CoreError>;
