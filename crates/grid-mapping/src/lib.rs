//! CF Conventions grid mappings and their PROJ representation.
//!
//! Converts angular values between PROJ text notation and unit-tagged data,
//! validates grid mapping parameters against a catalog of the CF grid
//! mappings, and assembles PROJ proj-strings.
//!
//! ```
//! use grid_mapping::{decode_proj_angle, encode_proj_angle, AngularContext};
//!
//! let lat = decode_proj_angle("0.5R", AngularContext::Unspecified).unwrap();
//! assert_eq!(encode_proj_angle(&lat).unwrap(), "0.5R");
//! ```

pub mod angular;
pub mod catalog;
pub mod error;
pub mod geostationary;
pub mod mapping;
pub mod parameter;
pub mod proj_string;

pub use angular::{decode_proj_angle, encode_proj_angle, AngularContext};
pub use catalog::{Category, GridMappingKind, MapParameter, ParameterDefault, ParameterKind};
pub use error::{GridMappingError, GridMappingResult};
pub use geostationary::SweepAxis;
pub use mapping::{GridMapping, GridMappingBuilder};
pub use parameter::{validate_map_parameter, AttributeValue, ParameterValue};
pub use proj_string::{make_proj_string_comp, ProjStringBuilder, ProjValue};
