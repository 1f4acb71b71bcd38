//! Consent error types.

use thiserror::Error;

/// Consent errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Text did not name one of the four authorization statuses.
    #[error("unknown authorization status: {0}")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, Error>;
