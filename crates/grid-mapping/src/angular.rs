//! Conversion between PROJ angular values and CF unit-tagged data.
//!
//! PROJ writes latitudes and longitudes as decimal degrees, optionally
//! suffixed to state the unit explicitly:
//!
//! ```text
//! 90        decimal degrees (implicit)
//! 90.0D     decimal degrees ('d', 'D' and '°' are equivalent)
//! 1.5R      radians ('r' and 'R' are equivalent)
//! ```
//!
//! CF on the other hand tags values with a units string, and latitude and
//! longitude values must use the directional forms `degrees_north` and
//! `degrees_east`. The [`AngularContext`] passed when decoding selects which
//! of those a value receives.
//!
//! Encoding always produces the canonical PROJ form: a bare numeral for any
//! degree unit and an `R` suffix for radians. The degree suffixes are
//! accepted when decoding but never written.
//!
//! See <https://proj.org/en/9.2/usage/projections.html#projection-units>.

use crate::error::{GridMappingError, GridMappingResult};
use cf_common::units::{DEGREES_UNITS, RADIANS};
use cf_common::{Data, Number, Units};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// A PROJ angular value: signed decimal numeral plus an optional one
/// character unit suffix. No exponent, no leading '+', no whitespace.
static PROJ_ANGLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?[0-9]+(\.[0-9]*)?)([rRdD°]?)$").unwrap());

/// The physical meaning of an angular value being decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngularContext {
    /// A latitude; decoded values are in `degrees_north`.
    #[serde(alias = "lat")]
    Latitude,
    /// A longitude; decoded values are in `degrees_east`.
    #[serde(alias = "lon")]
    Longitude,
    /// Any other angle; decoded values are in `degrees` or `radians`.
    #[default]
    Unspecified,
}

impl AngularContext {
    /// CF units for a value in decimal degrees in this context.
    pub fn degree_units(&self) -> Units {
        match self {
            AngularContext::Latitude => Units::degrees_north(),
            AngularContext::Longitude => Units::degrees_east(),
            // CF permits plain 'degrees' for angles that are not true
            // latitudes or longitudes (e.g. transformed grid coordinates)
            AngularContext::Unspecified => Units::degrees(),
        }
    }

    /// Whether values must carry a directional degree unit.
    pub fn is_directional(&self) -> bool {
        !matches!(self, AngularContext::Unspecified)
    }
}

impl FromStr for AngularContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lat" | "latitude" => Ok(AngularContext::Latitude),
            "lon" | "longitude" => Ok(AngularContext::Longitude),
            "" | "none" | "unspecified" => Ok(AngularContext::Unspecified),
            other => Err(format!(
                "unknown angular context '{}', expected lat, lon or none",
                other
            )),
        }
    }
}

impl fmt::Display for AngularContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AngularContext::Latitude => "lat",
            AngularContext::Longitude => "lon",
            AngularContext::Unspecified => "none",
        };
        f.write_str(name)
    }
}

/// Decode a PROJ angular value into CF data.
///
/// A numeral containing a decimal point gives a float value, otherwise an
/// integer. Radians are converted to degrees when `context` is latitude or
/// longitude, so that the directional degree unit can be applied; with no
/// context they are left in radians to avoid introducing rounding error.
///
/// # Errors
///
/// [`GridMappingError::MalformedAngle`] if `text` is not entirely a valid
/// PROJ angular value.
pub fn decode_proj_angle(text: &str, context: AngularContext) -> GridMappingResult<Data> {
    let malformed = || GridMappingError::MalformedAngle(text.to_string());

    let caps = PROJ_ANGLE_REGEX.captures(text).ok_or_else(malformed)?;
    let numeral = &caps[1];
    let is_float = caps.get(2).is_some();
    let suffix = &caps[3];

    let value = if is_float {
        // Numerals beyond f64 range parse to infinity
        let float = numeral.parse::<f64>().map_err(|_| malformed())?;
        if !float.is_finite() {
            return Err(malformed());
        }
        Number::Float(float)
    } else {
        // Out of range integers are rejected rather than rounded
        Number::Int(numeral.parse::<i64>().map_err(|_| malformed())?)
    };

    match suffix {
        "r" | "R" => {
            if context.is_directional() {
                let degrees = Units::conform(value.as_f64(), &Units::radians(), &Units::degrees())?;
                trace!(input = %text, %context, degrees, "Converted PROJ radians to degrees");
                Ok(Data::new(degrees, context.degree_units()))
            } else {
                Ok(Data::new(value, Units::radians()))
            }
        }
        "" | "d" | "D" | "°" => Ok(Data::new(value, context.degree_units())),
        _ => Err(malformed()),
    }
}

/// Encode single-valued angular CF data as a PROJ angular value.
///
/// Any recognised spelling of decimal degrees gives a bare numeral, since
/// decimal degrees are PROJ's default; radians give the numeral suffixed
/// with `R`.
///
/// # Errors
///
/// - [`GridMappingError::NotScalar`] if `data` does not hold exactly one value
/// - [`GridMappingError::MissingUnits`] if `data` has no units
/// - [`GridMappingError::UnrecognisedAngularUnits`] for any other units
/// - [`GridMappingError::NonFiniteAngle`] for NaN or infinite values
pub fn encode_proj_angle(data: &Data) -> GridMappingResult<String> {
    let value = data
        .item()
        .ok_or_else(|| GridMappingError::NotScalar(data.size()))?;

    let units = match data.units().as_str() {
        Some(units) if !units.is_empty() => units,
        _ => return Err(GridMappingError::MissingUnits),
    };

    if !value.as_f64().is_finite() {
        return Err(GridMappingError::NonFiniteAngle(value.to_string()));
    }

    if DEGREES_UNITS.contains(&units) {
        Ok(value.to_string())
    } else if units == RADIANS {
        Ok(format!("{}R", value))
    } else {
        Err(GridMappingError::UnrecognisedAngularUnits {
            units: units.to_string(),
            valid: DEGREES_UNITS.join(", "),
        })
    }
}
