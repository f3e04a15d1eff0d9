//! Unit-tagged numeric values.

use crate::error::UnitsResult;
use crate::number::Number;
use crate::units::Units;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// One or more numeric values sharing a single set of units.
///
/// Grid mapping parameters are scalars, so most callers work through
/// [`Data::item`], but the size is tracked so that non-scalar input can be
/// rejected rather than truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    values: Vec<Number>,
    #[serde(default)]
    units: Units,
}

impl Data {
    /// Create scalar data.
    pub fn new(value: impl Into<Number>, units: impl Into<Units>) -> Self {
        Self {
            values: vec![value.into()],
            units: units.into(),
        }
    }

    /// Create data from several values.
    pub fn from_values(values: Vec<Number>, units: impl Into<Units>) -> Self {
        Self {
            values,
            units: units.into(),
        }
    }

    /// Create scalar data without units.
    pub fn unitless(value: impl Into<Number>) -> Self {
        Self::new(value, Units::none())
    }

    /// Number of values held.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[Number] {
        &self.values
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    /// The single value, or `None` unless exactly one value is held.
    pub fn item(&self) -> Option<Number> {
        match self.values.as_slice() {
            [value] => Some(*value),
            _ => None,
        }
    }

    /// Replace the units without touching the values.
    pub fn with_units(mut self, units: impl Into<Units>) -> Self {
        self.units = units.into();
        self
    }

    /// Convert the values to other units.
    ///
    /// Converting to the units already held is a no-op and keeps integer
    /// values integral; any real conversion yields floats.
    pub fn to_units(&self, units: &Units) -> UnitsResult<Data> {
        if &self.units == units {
            return Ok(self.clone());
        }

        let values = self
            .values
            .iter()
            .map(|v| Units::conform(v.as_f64(), &self.units, units).map(Number::Float))
            .collect::<UnitsResult<Vec<_>>>()?;

        trace!(from = %self.units, to = %units, size = values.len(), "Converted data units");

        Ok(Data {
            values,
            units: units.clone(),
        })
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.values.as_slice() {
            [value] => write!(f, "{}", value)?,
            values => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")?;
            }
        }
        if let Some(units) = self.units.as_str() {
            write!(f, " {}", units)?;
        }
        Ok(())
    }
}
