//! Error types for unit handling.

use thiserror::Error;

/// Result type alias using UnitsError.
pub type UnitsResult<T> = Result<T, UnitsError>;

/// Errors raised while interpreting or converting units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("Unrecognised units: {0}")]
    UnknownUnits(String),

    #[error("Units '{from}' are not convertible to '{to}'")]
    Incompatible { from: String, to: String },

    #[error("Conversion requires units but none are set")]
    MissingUnits,
}
