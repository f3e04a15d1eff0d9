//! CF unit strings and the conversions grid mapping parameters need.
//!
//! Only two families matter for grid mappings: lengths (false eastings,
//! axes, perspective heights) and plane angles (origins, parallels,
//! azimuths). Units outside those families are carried verbatim and can only
//! be compared for equality.

use crate::error::{UnitsError, UnitsResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The plain CF unit for decimal degrees.
pub const DEGREES: &str = "degrees";
/// CF unit for latitude values.
pub const DEGREES_NORTH: &str = "degrees_north";
/// CF unit for longitude values.
pub const DEGREES_EAST: &str = "degrees_east";
/// CF unit for radians.
pub const RADIANS: &str = "radians";
/// CF unit for metres.
pub const METRES: &str = "m";

/// Every spelling of decimal degrees accepted on angular values.
///
/// Plain degrees, then the latitude forms of CF section 4.1, then the
/// longitude forms of CF section 4.2.
pub const DEGREES_UNITS: [&str; 14] = [
    "degree",
    "degrees",
    "degree_north",
    "degree_N",
    "degreeN",
    "degrees_north",
    "degrees_N",
    "degreesN",
    "degree_east",
    "degree_E",
    "degreeE",
    "degrees_east",
    "degrees_E",
    "degreesE",
];

const RADIANS_UNITS: [&str; 2] = ["radian", RADIANS];

const METRE_UNITS: [&str; 5] = [METRES, "metre", "metres", "meter", "meters"];

const KILOMETRE_UNITS: [&str; 5] = ["km", "kilometre", "kilometres", "kilometer", "kilometers"];

/// Physical dimension of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitFamily {
    Length,
    Angle,
}

/// A CF units string, or the absence of units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Units(Option<String>);

impl Units {
    pub fn new(units: impl Into<String>) -> Self {
        Self(Some(units.into()))
    }

    /// Units for a dimensionless value.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn degrees() -> Self {
        Self::new(DEGREES)
    }

    pub fn degrees_north() -> Self {
        Self::new(DEGREES_NORTH)
    }

    pub fn degrees_east() -> Self {
        Self::new(DEGREES_EAST)
    }

    pub fn radians() -> Self {
        Self::new(RADIANS)
    }

    pub fn metres() -> Self {
        Self::new(METRES)
    }

    /// The units string, if set.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// True for any recognised spelling of decimal degrees.
    pub fn is_degrees(&self) -> bool {
        self.as_str().is_some_and(|u| DEGREES_UNITS.contains(&u))
    }

    /// True for the latitude spellings of decimal degrees.
    pub fn is_degrees_north(&self) -> bool {
        self.as_str().is_some_and(|u| DEGREES_UNITS[2..8].contains(&u))
    }

    /// True for the longitude spellings of decimal degrees.
    pub fn is_degrees_east(&self) -> bool {
        self.as_str().is_some_and(|u| DEGREES_UNITS[8..].contains(&u))
    }

    pub fn is_radians(&self) -> bool {
        self.as_str().is_some_and(|u| RADIANS_UNITS.contains(&u))
    }

    /// The physical family of these units, if recognised.
    pub fn family(&self) -> Option<UnitFamily> {
        self.scale().map(|(family, _)| family)
    }

    /// Family and multiplier to the family's reference unit
    /// (metres for lengths, decimal degrees for angles).
    fn scale(&self) -> Option<(UnitFamily, f64)> {
        let units = self.as_str()?;
        if DEGREES_UNITS.contains(&units) {
            Some((UnitFamily::Angle, 1.0))
        } else if RADIANS_UNITS.contains(&units) {
            Some((UnitFamily::Angle, 180.0 / std::f64::consts::PI))
        } else if METRE_UNITS.contains(&units) {
            Some((UnitFamily::Length, 1.0))
        } else if KILOMETRE_UNITS.contains(&units) {
            Some((UnitFamily::Length, 1000.0))
        } else {
            None
        }
    }

    /// Whether values in these units can be converted to `other`.
    pub fn equivalent(&self, other: &Units) -> bool {
        match (self.scale(), other.scale()) {
            (Some((a, _)), Some((b, _))) => a == b,
            _ => self == other,
        }
    }

    /// Convert `value` from `from` units to `to` units.
    ///
    /// Identical units return the value untouched. Radians to degrees uses
    /// the exact 180/π factor.
    pub fn conform(value: f64, from: &Units, to: &Units) -> UnitsResult<f64> {
        if from == to {
            return Ok(value);
        }

        let (from_family, from_factor) = from.checked_scale()?;
        let (to_family, to_factor) = to.checked_scale()?;

        if from_family != to_family {
            return Err(UnitsError::Incompatible {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        if from_factor == to_factor {
            Ok(value)
        } else if to_factor == 1.0 {
            Ok(value * from_factor)
        } else {
            Ok(value * from_factor / to_factor)
        }
    }

    fn checked_scale(&self) -> UnitsResult<(UnitFamily, f64)> {
        match self.as_str() {
            None => Err(UnitsError::MissingUnits),
            Some(units) => self
                .scale()
                .ok_or_else(|| UnitsError::UnknownUnits(units.to_string())),
        }
    }
}

impl From<&str> for Units {
    fn from(units: &str) -> Self {
        Units::new(units)
    }
}

impl From<String> for Units {
    fn from(units: String) -> Self {
        Units::new(units)
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or(""))
    }
}
