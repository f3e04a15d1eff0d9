//! Validation of map parameter values.
//!
//! Values arrive as CF attribute values: bare numbers, PROJ angular text,
//! lists of numbers, or unit-tagged data. Each is checked against what the
//! parameter measures and stored as unit-tagged data:
//!
//! - bare numbers and unitless data take the parameter's default units
//! - lengths must be in a length unit and are stored in metres
//! - angles must be in a degree unit or radians and keep the units given;
//!   latitudes refuse the eastward degree spellings and longitudes the
//!   northward ones
//! - scale factors must be unitless
//! - PROJ text is decoded with the parameter's latitude/longitude context

use crate::angular::decode_proj_angle;
use crate::catalog::{MapParameter, ParameterKind};
use crate::error::{GridMappingError, GridMappingResult};
use crate::geostationary::SweepAxis;
use cf_common::{Data, Number, Units};
use serde::{Deserialize, Serialize};

/// A raw CF attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(Number),
    Text(String),
    List(Vec<Number>),
    Data(Data),
}

impl From<Number> for AttributeValue {
    fn from(n: Number) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Number(Number::Float(v))
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Number(Number::Int(v))
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<Data> for AttributeValue {
    fn from(data: Data) -> Self {
        AttributeValue::Data(data)
    }
}

impl From<Vec<Number>> for AttributeValue {
    fn from(values: Vec<Number>) -> Self {
        AttributeValue::List(values)
    }
}

/// A validated map parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Scalar(Data),
    /// First and second standard parallel
    Pair(Option<Data>, Option<Data>),
    Axis(SweepAxis),
}

impl ParameterValue {
    /// The scalar data, if this is a scalar value.
    pub fn as_scalar(&self) -> Option<&Data> {
        match self {
            ParameterValue::Scalar(data) => Some(data),
            _ => None,
        }
    }

    /// Whether the value is absent or numerically zero.
    pub fn is_zero(&self) -> bool {
        let zero = |d: &Data| d.item().map_or(true, |n| n.is_zero());
        match self {
            ParameterValue::Scalar(data) => zero(data),
            ParameterValue::Pair(a, b) => a.as_ref().map_or(true, zero) && b.as_ref().map_or(true, zero),
            ParameterValue::Axis(_) => false,
        }
    }
}

/// Validate `value` for `parameter`.
pub fn validate_map_parameter(
    parameter: MapParameter,
    value: &AttributeValue,
) -> GridMappingResult<ParameterValue> {
    let name = parameter.cf_name();
    let kind = parameter.kind();

    if kind == ParameterKind::Axis {
        return match value {
            AttributeValue::Text(text) => text
                .parse::<SweepAxis>()
                .map(ParameterValue::Axis)
                .map_err(|e| GridMappingError::invalid(name, e)),
            other => Err(GridMappingError::invalid(
                name,
                format!("expected 'x' or 'y', got {:?}", other),
            )),
        };
    }

    if parameter == MapParameter::StandardParallel {
        return validate_standard_parallel(value);
    }

    validate_scalar(name, kind, value).map(ParameterValue::Scalar)
}

/// Standard parallels take one or two values.
fn validate_standard_parallel(value: &AttributeValue) -> GridMappingResult<ParameterValue> {
    let name = MapParameter::StandardParallel.cf_name();
    let kind = ParameterKind::Latitude;

    let parts: Vec<AttributeValue> = match value {
        AttributeValue::List(values) => values.iter().copied().map(AttributeValue::Number).collect(),
        AttributeValue::Data(data) if data.size() > 1 => data
            .values()
            .iter()
            .map(|v| AttributeValue::Data(Data::new(*v, data.units().clone())))
            .collect(),
        single => vec![single.clone()],
    };

    match parts.as_slice() {
        [first] => Ok(ParameterValue::Pair(
            Some(validate_scalar(name, kind, first)?),
            None,
        )),
        [first, second] => Ok(ParameterValue::Pair(
            Some(validate_scalar(name, kind, first)?),
            Some(validate_scalar(name, kind, second)?),
        )),
        _ => Err(GridMappingError::invalid(
            name,
            format!("expected one or two values, got {}", parts.len()),
        )),
    }
}

fn validate_scalar(name: &str, kind: ParameterKind, value: &AttributeValue) -> GridMappingResult<Data> {
    match value {
        AttributeValue::Number(n) => Ok(Data::new(*n, kind.default_units())),
        AttributeValue::Text(text) => match kind.angular_context() {
            Some(context) => decode_proj_angle(text, context),
            None => Err(GridMappingError::invalid(
                name,
                format!("expected a number, got '{}'", text),
            )),
        },
        AttributeValue::List(values) => match values.as_slice() {
            [n] => Ok(Data::new(*n, kind.default_units())),
            _ => Err(GridMappingError::invalid(
                name,
                format!("must be scalar, got size {}", values.len()),
            )),
        },
        AttributeValue::Data(data) => validate_data(name, kind, data),
    }
}

fn validate_data(name: &str, kind: ParameterKind, data: &Data) -> GridMappingResult<Data> {
    if data.size() != 1 {
        return Err(GridMappingError::invalid(
            name,
            format!("must be scalar, got size {}", data.size()),
        ));
    }

    if !data.units().is_set() {
        return Ok(data.clone().with_units(kind.default_units()));
    }

    let units = data.units();
    match kind {
        ParameterKind::Length => {
            if !units.equivalent(&Units::metres()) {
                return Err(GridMappingError::invalid(
                    name,
                    format!("units '{}' are not a distance", units),
                ));
            }
            Ok(data.to_units(&Units::metres())?)
        }
        ParameterKind::Latitude if units.is_degrees_east() => Err(GridMappingError::invalid(
            name,
            format!("units '{}' are for longitudes, not latitudes", units),
        )),
        ParameterKind::Longitude if units.is_degrees_north() => Err(GridMappingError::invalid(
            name,
            format!("units '{}' are for latitudes, not longitudes", units),
        )),
        ParameterKind::Latitude | ParameterKind::Longitude | ParameterKind::Angle => {
            if units.is_radians() {
                Ok(data.clone().with_units(Units::radians()))
            } else if units.is_degrees() {
                Ok(data.clone())
            } else {
                Err(GridMappingError::invalid(
                    name,
                    format!("units '{}' are not angular", units),
                ))
            }
        }
        ParameterKind::Scale => {
            if units.as_str() == Some("1") {
                Ok(data.clone().with_units(Units::none()))
            } else {
                Err(GridMappingError::invalid(
                    name,
                    format!("must be unitless, got units '{}'", units),
                ))
            }
        }
        ParameterKind::Axis => Err(GridMappingError::invalid(name, "expected 'x' or 'y'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(parameter: MapParameter, value: impl Into<AttributeValue>) -> GridMappingResult<Data> {
        match validate_map_parameter(parameter, &value.into())? {
            ParameterValue::Scalar(data) => Ok(data),
            other => panic!("expected scalar, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_numbers_take_default_units() {
        assert_eq!(
            scalar(MapParameter::FalseEasting, 500000.0).unwrap(),
            Data::new(500000.0, "m")
        );
        assert_eq!(
            scalar(MapParameter::LatitudeOfProjectionOrigin, 60_i64).unwrap(),
            Data::new(60, "degrees_north")
        );
        assert_eq!(
            scalar(MapParameter::LongitudeOfCentralMeridian, -95.0).unwrap(),
            Data::new(-95.0, "degrees_east")
        );
        assert_eq!(
            scalar(MapParameter::AzimuthOfCentralLine, 30.0).unwrap(),
            Data::new(30.0, "degrees")
        );
        assert_eq!(
            scalar(MapParameter::ScaleFactorAtProjectionOrigin, 0.9996).unwrap(),
            Data::unitless(0.9996)
        );
    }

    #[test]
    fn test_proj_text_uses_parameter_context() {
        assert_eq!(
            scalar(MapParameter::LongitudeOfProjectionOrigin, "-75").unwrap(),
            Data::new(-75, "degrees_east")
        );
        assert_eq!(
            scalar(MapParameter::AzimuthOfCentralLine, "0.5R").unwrap(),
            Data::new(0.5, "radians")
        );
        assert!(matches!(
            scalar(MapParameter::LatitudeOfProjectionOrigin, "north"),
            Err(GridMappingError::MalformedAngle(_))
        ));
        assert!(matches!(
            scalar(MapParameter::FalseEasting, "100"),
            Err(GridMappingError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_lengths_convert_to_metres() {
        let height = scalar(
            MapParameter::PerspectivePointHeight,
            Data::new(35786.023, "km"),
        )
        .unwrap();
        assert_eq!(height.units(), &Units::metres());
        assert!((height.item().unwrap().as_f64() - 35786023.0).abs() < 1e-6);

        assert!(matches!(
            scalar(MapParameter::FalseNorthing, Data::new(1.0, "degrees")),
            Err(GridMappingError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_angles_keep_units() {
        assert_eq!(
            scalar(MapParameter::LatitudeOfProjectionOrigin, Data::new(1.0, "radian")).unwrap(),
            Data::new(1.0, "radians")
        );
        assert_eq!(
            scalar(MapParameter::LatitudeOfProjectionOrigin, Data::new(45, "degreesN")).unwrap(),
            Data::new(45, "degreesN")
        );
        assert!(scalar(MapParameter::LatitudeOfProjectionOrigin, Data::new(45, "m")).is_err());
    }

    #[test]
    fn test_directional_units_must_match() {
        assert!(matches!(
            scalar(MapParameter::LatitudeOfProjectionOrigin, Data::new(45, "degrees_east")),
            Err(GridMappingError::InvalidParameter { .. })
        ));
        assert!(matches!(
            scalar(MapParameter::LongitudeOfCentralMeridian, Data::new(-95, "degreesN")),
            Err(GridMappingError::InvalidParameter { .. })
        ));
        assert!(matches!(
            validate_map_parameter(
                MapParameter::StandardParallel,
                &AttributeValue::Data(Data::new(25.0, "degree_E"))
            ),
            Err(GridMappingError::InvalidParameter { .. })
        ));

        // Plain degrees suit either direction, as do other angles
        assert!(scalar(MapParameter::LatitudeOfProjectionOrigin, Data::new(45, "degrees")).is_ok());
        assert!(scalar(MapParameter::AzimuthOfCentralLine, Data::new(30, "degrees_east")).is_ok());
    }

    #[test]
    fn test_scale_must_be_unitless() {
        assert!(scalar(MapParameter::ScaleFactorAtCentralMeridian, Data::new(1.0, "m")).is_err());
        assert_eq!(
            scalar(MapParameter::ScaleFactorAtCentralMeridian, Data::new(1.0, "1")).unwrap(),
            Data::unitless(1.0)
        );
    }

    #[test]
    fn test_non_scalar_rejected() {
        let pair = Data::from_values(vec![Number::Int(1), Number::Int(2)], "m");
        assert!(scalar(MapParameter::FalseEasting, pair).is_err());
        assert!(scalar(MapParameter::FalseEasting, vec![Number::Int(1), Number::Int(2)]).is_err());
    }

    #[test]
    fn test_standard_parallel_forms() {
        let value = validate_map_parameter(
            MapParameter::StandardParallel,
            &AttributeValue::List(vec![Number::Float(33.0), Number::Float(45.0)]),
        )
        .unwrap();
        assert_eq!(
            value,
            ParameterValue::Pair(
                Some(Data::new(33.0, "degrees_north")),
                Some(Data::new(45.0, "degrees_north"))
            )
        );

        let value =
            validate_map_parameter(MapParameter::StandardParallel, &AttributeValue::from(25.0))
                .unwrap();
        assert_eq!(
            value,
            ParameterValue::Pair(Some(Data::new(25.0, "degrees_north")), None)
        );

        let data = Data::from_values(vec![Number::Float(0.5), Number::Float(0.75)], "radians");
        let value =
            validate_map_parameter(MapParameter::StandardParallel, &AttributeValue::Data(data))
                .unwrap();
        assert_eq!(
            value,
            ParameterValue::Pair(
                Some(Data::new(0.5, "radians")),
                Some(Data::new(0.75, "radians"))
            )
        );

        let three = AttributeValue::List(vec![Number::Int(1), Number::Int(2), Number::Int(3)]);
        assert!(validate_map_parameter(MapParameter::StandardParallel, &three).is_err());
    }

    #[test]
    fn test_axis_values() {
        assert_eq!(
            validate_map_parameter(MapParameter::SweepAngleAxis, &AttributeValue::from("X")).unwrap(),
            ParameterValue::Axis(SweepAxis::X)
        );
        assert!(validate_map_parameter(MapParameter::FixedAngleAxis, &AttributeValue::from(1.0)).is_err());
    }

    #[test]
    fn test_is_zero() {
        assert!(ParameterValue::Scalar(Data::new(0.0, "degrees_east")).is_zero());
        assert!(!ParameterValue::Scalar(Data::new(-45, "degrees_east")).is_zero());
        assert!(ParameterValue::Pair(Some(Data::new(0, "degrees_north")), None).is_zero());
    }
}
