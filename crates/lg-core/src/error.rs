//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The error type for `lg-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid simulation time: {0}")]
    InvalidTime(f64),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `lg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
