//! Error types for grid mapping operations.

use cf_common::UnitsError;
use thiserror::Error;

/// Result type alias using GridMappingError.
pub type GridMappingResult<T> = Result<T, GridMappingError>;

/// Primary error type for grid mapping construction and conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridMappingError {
    // === Angular value conversion ===
    #[error(
        "PROJ data input not valid: {0}. Ensure a valid PROJ value and optionally units are supplied."
    )]
    MalformedAngle(String),

    #[error("Input data must have size 1, got size: {0}")]
    NotScalar(usize),

    #[error("Must provide data with units for unambiguous conversion.")]
    MissingUnits,

    #[error("Unrecognised angular units set on the data. Valid options are: {valid} and radians but got: {units}")]
    UnrecognisedAngularUnits { units: String, valid: String },

    #[error("Angular value {0} is not finite and has no PROJ representation")]
    NonFiniteAngle(String),

    // === Proj-string assembly ===
    #[error("Can't create proj-string due to non-representable value for key {key}: {reason}")]
    NonRepresentable { key: String, reason: String },

    // === Catalog and parameters ===
    #[error("Unsupported grid mapping: {0}")]
    UnsupportedGridMapping(String),

    #[error("Unrecognised map parameter provided for the grid mapping: {0}")]
    UnrecognisedParameter(String),

    #[error("Map parameter '{parameter}' does not apply to the {grid_mapping} grid mapping")]
    NotApplicable {
        parameter: String,
        grid_mapping: String,
    },

    #[error("Missing required map parameter '{parameter}' for the {grid_mapping} grid mapping")]
    MissingParameter {
        parameter: String,
        grid_mapping: String,
    },

    #[error("Invalid value for map parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    #[error(transparent)]
    Units(#[from] UnitsError),
}

impl GridMappingError {
    pub(crate) fn invalid(parameter: &str, message: impl Into<String>) -> Self {
        GridMappingError::InvalidParameter {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }
}
