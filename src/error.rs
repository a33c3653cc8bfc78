//! Error types for marticle operations.
//!
//! Parsing itself never fails: malformed markup and unresolvable media degrade
//! to fallback components. These errors surface from the I/O shells (CLI, WASM)
//! and from markup serialization, which the parser logs and recovers from.

use thiserror::Error;

/// Errors that can occur around article parsing.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("markup serialization failed: {0}")]
    Serialize(std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid article data: {0}")]
    InvalidArticle(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
