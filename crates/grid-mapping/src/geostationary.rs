//! Scan geometry attributes of the geostationary grid mapping.
//!
//! A geostationary imager sweeps one axis while the other stays fixed.
//! GOES-R sweeps "x"; Meteosat and Himawari sweep "y". The CF attributes
//! `sweep_angle_axis` and `fixed_angle_axis` must name opposite axes.
//!
//! Reference: GOES-R Product Definition and Users' Guide (PUG) Volume 4

use crate::error::{GridMappingError, GridMappingResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A scan axis of a geostationary imager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepAxis {
    X,
    Y,
}

impl SweepAxis {
    pub fn opposite(&self) -> Self {
        match self {
            SweepAxis::X => SweepAxis::Y,
            SweepAxis::Y => SweepAxis::X,
        }
    }
}

impl FromStr for SweepAxis {
    type Err = String;

    /// Axis names are not case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(SweepAxis::X),
            "y" | "Y" => Ok(SweepAxis::Y),
            other => Err(format!("expected 'x' or 'y', got '{}'", other)),
        }
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SweepAxis::X => "x",
            SweepAxis::Y => "y",
        })
    }
}

/// Check that the sweep and fixed axes are opposite.
pub fn validate_axes(sweep: SweepAxis, fixed: SweepAxis) -> GridMappingResult<()> {
    if sweep.opposite() == fixed {
        Ok(())
    } else {
        Err(GridMappingError::invalid(
            "sweep_angle_axis",
            "the sweep_angle_axis must be the opposite value, from 'x' and 'y', to the fixed_angle_axis",
        ))
    }
}
