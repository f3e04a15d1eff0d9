//! Grid mapping instances and their proj-strings.

use crate::catalog::{
    GridMappingKind, MapParameter, ParameterDefault, ParameterKind, DESCRIPTIVE_ATTRIBUTES,
    FIGURE_ATTRIBUTES,
};
use crate::angular::{decode_proj_angle, AngularContext};
use crate::error::{GridMappingError, GridMappingResult};
use crate::geostationary::{validate_axes, SweepAxis};
use crate::parameter::{validate_map_parameter, AttributeValue, ParameterValue};
use crate::proj_string::{ProjStringBuilder, ProjValue};
use cf_common::{Data, EarthFigure, Units};
use num_traits::ToPrimitive;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, warn};

/// A CF grid mapping: one catalog entry with validated parameter values
/// and a figure of the Earth.
///
/// The proj-string is rendered once when the mapping is built, so every
/// `GridMapping` has one. Two grid mappings are equal when their
/// proj-strings are.
#[derive(Debug, Clone)]
pub struct GridMapping {
    kind: GridMappingKind,
    figure: EarthFigure,
    parameters: BTreeMap<MapParameter, ParameterValue>,
    proj_string: String,
}

impl GridMapping {
    /// A grid mapping with every parameter at its default.
    ///
    /// Fails for kinds with required parameters; use [`GridMapping::builder`]
    /// for those.
    pub fn new(kind: GridMappingKind) -> GridMappingResult<Self> {
        Self::builder(kind).build()
    }

    pub fn builder(kind: GridMappingKind) -> GridMappingBuilder {
        GridMappingBuilder::new(kind)
    }

    /// Build a grid mapping from CF grid mapping variable attributes.
    ///
    /// `grid_mapping_name` selects the kind. Ellipsoid and prime meridian
    /// attributes set the figure; descriptive attributes such as `crs_wkt`
    /// are accepted and ignored.
    pub fn from_cf_attributes<'a, I, K>(attributes: I) -> GridMappingResult<Self>
    where
        I: IntoIterator<Item = (&'a K, &'a AttributeValue)>,
        K: AsRef<str> + ?Sized + 'a,
    {
        let attributes: Vec<(&str, &AttributeValue)> = attributes
            .into_iter()
            .map(|(k, v)| (k.as_ref(), v))
            .collect();

        let name = attributes
            .iter()
            .find(|(k, _)| *k == "grid_mapping_name")
            .map(|(_, v)| *v)
            .ok_or_else(|| GridMappingError::MissingParameter {
                parameter: "grid_mapping_name".to_string(),
                grid_mapping: "unknown".to_string(),
            })?;

        let kind = match name {
            AttributeValue::Text(name) => GridMappingKind::from_grid_mapping_name(name)?,
            other => {
                return Err(GridMappingError::invalid(
                    "grid_mapping_name",
                    format!("expected a name, got {:?}", other),
                ))
            }
        };

        let mut builder = GridMappingBuilder::new(kind);
        for (key, value) in attributes {
            if key != "grid_mapping_name" {
                builder.set(key, value)?;
            }
        }
        builder.build()
    }

    pub fn kind(&self) -> GridMappingKind {
        self.kind
    }

    pub fn grid_mapping_name(&self) -> &'static str {
        self.kind.grid_mapping_name()
    }

    pub fn proj_id(&self) -> &'static str {
        self.kind.proj_id()
    }

    pub fn figure(&self) -> &EarthFigure {
        &self.figure
    }

    /// The value of a map parameter.
    pub fn parameter(&self, parameter: MapParameter) -> Option<&ParameterValue> {
        self.parameters.get(&parameter)
    }

    /// Map parameters in catalog order.
    pub fn parameters(&self) -> impl Iterator<Item = (MapParameter, &ParameterValue)> {
        self.kind
            .parameters()
            .iter()
            .filter_map(|(p, _)| self.parameters.get(p).map(|v| (*p, v)))
    }

    /// The PROJ proj-string defining the projection.
    pub fn proj_string(&self) -> &str {
        &self.proj_string
    }

    fn render_proj_string(&self) -> GridMappingResult<String> {
        let mut proj = ProjStringBuilder::new(self.kind.proj_id());
        if self.kind == GridMappingKind::RotatedLatitudeLongitude {
            proj.push("o_proj", "latlon");
        }

        for (parameter, value) in self.parameters() {
            if !self.writes_term(parameter) {
                continue;
            }
            let keys = parameter.proj_keys();
            match value {
                ParameterValue::Scalar(data) => {
                    if let Some(key) = keys.first() {
                        let value = if parameter == MapParameter::GridNorthPoleLongitude {
                            ProjValue::Angle(central_meridian_of_pole(data)?)
                        } else {
                            proj_value(parameter.kind(), data)?
                        };
                        proj.push(*key, value);
                    }
                }
                ParameterValue::Pair(first, second) => {
                    for (key, slot) in keys.iter().zip([first, second]) {
                        if let Some(data) = slot {
                            proj.push(*key, ProjValue::Angle(data.clone()));
                        }
                    }
                }
                ParameterValue::Axis(axis) => {
                    if let Some(key) = keys.first() {
                        proj.push(*key, axis.to_string());
                    }
                }
            }
        }

        push_figure_terms(&mut proj, &self.figure);
        proj.build()
    }

    /// Polar stereographic writes `lon_0` from whichever of its two
    /// longitudes is set; they cannot both be non-zero.
    fn writes_term(&self, parameter: MapParameter) -> bool {
        let vertical_set = self
            .parameters
            .get(&MapParameter::StraightVerticalLongitudeFromPole)
            .is_some_and(|v| !v.is_zero());
        match parameter {
            MapParameter::LongitudeOfProjectionOrigin
                if self.kind == GridMappingKind::PolarStereographic =>
            {
                !vertical_set
            }
            MapParameter::StraightVerticalLongitudeFromPole => vertical_set,
            _ => true,
        }
    }
}

/// The `ob_tran` central meridian for a grid north pole longitude, which
/// lies 180 degrees from the pole.
fn central_meridian_of_pole(pole_longitude: &Data) -> GridMappingResult<Data> {
    let degrees = pole_longitude.to_units(&Units::degrees_east())?;
    let value = degrees
        .item()
        .and_then(|n| n.to_f64())
        .ok_or(GridMappingError::NotScalar(degrees.size()))?;
    Ok(Data::new(value + 180.0, Units::degrees_east()))
}

fn proj_value(kind: ParameterKind, data: &Data) -> GridMappingResult<ProjValue> {
    if kind.is_angular() {
        Ok(ProjValue::Angle(data.clone()))
    } else {
        data.item()
            .map(ProjValue::Number)
            .ok_or(GridMappingError::NotScalar(data.size()))
    }
}

fn push_figure_terms(proj: &mut ProjStringBuilder, figure: &EarthFigure) {
    if let Some(radius) = figure.earth_radius {
        proj.push("R", radius);
    } else if let Some(ellipsoid) = figure.known_ellipsoid() {
        proj.push("ellps", ellipsoid.proj_id());
    } else {
        if let Some(name) = &figure.reference_ellipsoid_name {
            warn!(ellipsoid = %name, "No PROJ definition for ellipsoid, writing its axes instead");
        }
        proj.push("a", figure.semi_major_axis);
        proj.push("b", figure.semi_minor_axis);
    }

    if !figure.is_greenwich() {
        match &figure.prime_meridian_name {
            Some(name) => proj.push("pm", name.to_lowercase()),
            None => proj.push("pm", figure.longitude_of_prime_meridian),
        }
    }
}

impl PartialEq for GridMapping {
    fn eq(&self, other: &Self) -> bool {
        self.proj_string == other.proj_string
    }
}

impl Eq for GridMapping {}

impl Hash for GridMapping {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.proj_string.hash(state);
    }
}

impl fmt::Display for GridMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<CF {}: {} {}>",
            self.kind.category(),
            self.kind.display_name(),
            self.proj_string
        )
    }
}

/// Incremental construction of a [`GridMapping`].
#[derive(Debug, Clone)]
pub struct GridMappingBuilder {
    kind: GridMappingKind,
    figure: EarthFigure,
    given: BTreeMap<MapParameter, ParameterValue>,
    ellipsoid_named: bool,
    axes_given: bool,
    meridian_named: bool,
    meridian_longitude_given: bool,
}

impl GridMappingBuilder {
    pub fn new(kind: GridMappingKind) -> Self {
        Self {
            kind,
            figure: EarthFigure::default(),
            given: BTreeMap::new(),
            ellipsoid_named: false,
            axes_given: false,
            meridian_named: false,
            meridian_longitude_given: false,
        }
    }

    /// Replace the whole figure of the Earth.
    pub fn figure(mut self, figure: EarthFigure) -> Self {
        self.figure = figure;
        self.ellipsoid_named = true;
        self.meridian_named = true;
        self
    }

    /// Set an attribute by CF name, consuming the builder.
    pub fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> GridMappingResult<Self> {
        self.set(name, &value.into())?;
        Ok(self)
    }

    /// Set an attribute by CF name.
    ///
    /// Map parameters must apply to this kind of grid mapping. Ellipsoid and
    /// prime meridian attributes apply to any kind.
    pub fn set(&mut self, name: &str, value: &AttributeValue) -> GridMappingResult<()> {
        if let Some(parameter) = MapParameter::from_cf_name(name) {
            if !self.kind.accepts(parameter) {
                return Err(GridMappingError::NotApplicable {
                    parameter: name.to_string(),
                    grid_mapping: self.kind.grid_mapping_name().to_string(),
                });
            }
            let value = validate_map_parameter(parameter, value)?;
            self.given.insert(parameter, value);
            Ok(())
        } else if FIGURE_ATTRIBUTES.contains(&name) {
            self.set_figure_attribute(name, value)
        } else if DESCRIPTIVE_ATTRIBUTES.contains(&name) {
            debug!(attribute = %name, "Ignoring descriptive grid mapping attribute");
            Ok(())
        } else {
            Err(GridMappingError::UnrecognisedParameter(name.to_string()))
        }
    }

    fn set_figure_attribute(&mut self, name: &str, value: &AttributeValue) -> GridMappingResult<()> {
        match name {
            "reference_ellipsoid_name" => {
                self.figure.reference_ellipsoid_name = Some(text_attribute(name, value)?);
                self.ellipsoid_named = true;
            }
            "prime_meridian_name" => {
                self.figure.prime_meridian_name = Some(text_attribute(name, value)?);
                self.meridian_named = true;
            }
            "semi_major_axis" => {
                self.figure.semi_major_axis = length_attribute(name, value)?;
                self.axes_given = true;
            }
            "semi_minor_axis" => {
                self.figure.semi_minor_axis = length_attribute(name, value)?;
                self.axes_given = true;
            }
            "earth_radius" => {
                self.figure.earth_radius = Some(length_attribute(name, value)?);
            }
            "inverse_flattening" => {
                self.figure.inverse_flattening = number_attribute(name, value)?;
            }
            "longitude_of_prime_meridian" => {
                self.figure.longitude_of_prime_meridian = degrees_attribute(name, value)?;
                self.meridian_longitude_given = true;
            }
            _ => return Err(GridMappingError::UnrecognisedParameter(name.to_string())),
        }
        Ok(())
    }

    /// Apply defaults, check cross-parameter constraints and render the
    /// proj-string. Values that cannot be written to a proj-string, such as
    /// a prime meridian name containing whitespace, fail here.
    pub fn build(mut self) -> GridMappingResult<GridMapping> {
        let kind = self.kind;
        let mut parameters = BTreeMap::new();

        for (parameter, default) in kind.parameters() {
            let value = match self.given.remove(parameter) {
                Some(value) => value,
                None => default_value(kind, *parameter, *default)?,
            };
            parameters.insert(*parameter, value);
        }

        // Explicit axes without a name describe a custom ellipsoid
        if self.axes_given && !self.ellipsoid_named {
            self.figure.reference_ellipsoid_name = None;
        }
        if self.meridian_longitude_given && !self.meridian_named {
            self.figure.prime_meridian_name = None;
        }

        match kind {
            GridMappingKind::Geostationary => {
                let axis = |p: MapParameter| match parameters.get(&p) {
                    Some(ParameterValue::Axis(axis)) => Ok(*axis),
                    _ => Err(GridMappingError::invalid(p.cf_name(), "expected 'x' or 'y'")),
                };
                validate_axes(
                    axis(MapParameter::SweepAngleAxis)?,
                    axis(MapParameter::FixedAngleAxis)?,
                )?;
            }
            GridMappingKind::PolarStereographic => {
                let set = |p: MapParameter| parameters.get(&p).is_some_and(|v| !v.is_zero());
                if set(MapParameter::LongitudeOfProjectionOrigin)
                    && set(MapParameter::StraightVerticalLongitudeFromPole)
                {
                    return Err(GridMappingError::invalid(
                        "straight_vertical_longitude_from_pole",
                        "only one of 'longitude_of_projection_origin' and \
                         'straight_vertical_longitude_from_pole' can be set",
                    ));
                }
            }
            _ => {}
        }

        let mut mapping = GridMapping {
            kind,
            figure: self.figure,
            parameters,
            proj_string: String::new(),
        };
        mapping.proj_string = mapping.render_proj_string()?;

        debug!(
            grid_mapping = %kind,
            parameters = mapping.parameters.len(),
            proj_string = %mapping.proj_string,
            "Built grid mapping"
        );

        Ok(mapping)
    }
}

fn default_value(
    kind: GridMappingKind,
    parameter: MapParameter,
    default: ParameterDefault,
) -> GridMappingResult<ParameterValue> {
    let units = parameter.kind().default_units();
    match default {
        ParameterDefault::Required => Err(GridMappingError::MissingParameter {
            parameter: parameter.cf_name().to_string(),
            grid_mapping: kind.grid_mapping_name().to_string(),
        }),
        ParameterDefault::Value(v) => Ok(ParameterValue::Scalar(Data::new(v, units))),
        ParameterDefault::Pair(first, second) => Ok(ParameterValue::Pair(
            first.map(|v| Data::new(v, units.clone())),
            second.map(|v| Data::new(v, units.clone())),
        )),
        ParameterDefault::Axis(axis) => axis
            .parse::<SweepAxis>()
            .map(ParameterValue::Axis)
            .map_err(|e| GridMappingError::invalid(parameter.cf_name(), e)),
    }
}

fn text_attribute(name: &str, value: &AttributeValue) -> GridMappingResult<String> {
    match value {
        AttributeValue::Text(text) => Ok(text.clone()),
        other => Err(GridMappingError::invalid(
            name,
            format!("expected a name, got {:?}", other),
        )),
    }
}

fn scalar_attribute(name: &str, value: &AttributeValue) -> GridMappingResult<Data> {
    let data = match value {
        AttributeValue::Number(n) => Data::unitless(*n),
        AttributeValue::List(values) => Data::from_values(values.clone(), Units::none()),
        AttributeValue::Data(data) => data.clone(),
        AttributeValue::Text(text) => {
            return Err(GridMappingError::invalid(
                name,
                format!("expected a number, got '{}'", text),
            ))
        }
    };
    if data.size() != 1 {
        return Err(GridMappingError::invalid(
            name,
            format!("must be scalar, got size {}", data.size()),
        ));
    }
    Ok(data)
}

fn number_attribute(name: &str, value: &AttributeValue) -> GridMappingResult<f64> {
    let data = scalar_attribute(name, value)?;
    if data.units().is_set() {
        return Err(GridMappingError::invalid(name, "must be unitless"));
    }
    Ok(item(&data))
}

fn length_attribute(name: &str, value: &AttributeValue) -> GridMappingResult<f64> {
    let data = scalar_attribute(name, value)?;
    if !data.units().is_set() {
        return Ok(item(&data));
    }
    if !data.units().equivalent(&Units::metres()) {
        return Err(GridMappingError::invalid(
            name,
            format!("units '{}' are not a distance", data.units()),
        ));
    }
    Ok(item(&data.to_units(&Units::metres())?))
}

fn degrees_attribute(name: &str, value: &AttributeValue) -> GridMappingResult<f64> {
    if let AttributeValue::Text(text) = value {
        let data = decode_proj_angle(text, AngularContext::Longitude)?;
        return Ok(item(&data));
    }
    let data = scalar_attribute(name, value)?;
    if !data.units().is_set() {
        return Ok(item(&data));
    }
    if !data.units().equivalent(&Units::degrees()) {
        return Err(GridMappingError::invalid(
            name,
            format!("units '{}' are not angular", data.units()),
        ));
    }
    Ok(item(&data.to_units(&Units::degrees_east())?))
}

fn item(data: &Data) -> f64 {
    data.item().and_then(|n| n.to_f64()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mercator() {
        let merc = GridMapping::new(GridMappingKind::Mercator).unwrap();
        assert_eq!(
            merc.proj_string(),
            "+proj=merc +lat_1=0.0 +lon_0=0.0 +k_0=1.0 +x_0=0.0 +y_0=0.0 +ellps=WGS84"
        );
    }

    #[test]
    fn test_display() {
        let ortho = GridMapping::new(GridMappingKind::Orthographic).unwrap();
        assert_eq!(
            ortho.to_string(),
            "<CF AzimuthalGridMapping: Orthographic +proj=ortho +lon_0=0.0 +lat_0=0.0 +x_0=0.0 +y_0=0.0 +ellps=WGS84>"
        );
    }

    #[test]
    fn test_required_parameter_missing() {
        let err = GridMapping::new(GridMappingKind::LambertConformalConic).unwrap_err();
        assert_eq!(
            err,
            GridMappingError::MissingParameter {
                parameter: "standard_parallel".to_string(),
                grid_mapping: "lambert_conformal_conic".to_string(),
            }
        );
    }

    #[test]
    fn test_not_applicable_and_unknown() {
        let err = GridMapping::builder(GridMappingKind::Mercator)
            .with("perspective_point_height", 1000.0)
            .unwrap_err();
        assert!(matches!(err, GridMappingError::NotApplicable { .. }));

        let err = GridMapping::builder(GridMappingKind::Mercator)
            .with("false_eastings", 1000.0)
            .unwrap_err();
        assert_eq!(
            err,
            GridMappingError::UnrecognisedParameter("false_eastings".to_string())
        );
    }

    #[test]
    fn test_equality_by_proj_string() {
        let a = GridMapping::builder(GridMappingKind::Stereographic)
            .with("latitude_of_projection_origin", 90.0)
            .unwrap()
            .build()
            .unwrap();
        let b = GridMapping::builder(GridMappingKind::Stereographic)
            .with("latitude_of_projection_origin", "90.0")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, GridMapping::new(GridMappingKind::Stereographic).unwrap());
    }

    #[test]
    fn test_unwritable_figure_fails_build() {
        let err = GridMapping::builder(GridMappingKind::Mercator)
            .with("prime_meridian_name", "my meridian")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, GridMappingError::NonRepresentable { ref key, .. } if key == "pm"));
    }

    #[test]
    fn test_pole_longitude_becomes_central_meridian() {
        let lon_0 = central_meridian_of_pole(&Data::new(-162, "degrees_east")).unwrap();
        assert_eq!(lon_0, Data::new(18.0, "degrees_east"));

        let lon_0 =
            central_meridian_of_pole(&Data::new(std::f64::consts::PI, "radians")).unwrap();
        assert!((lon_0.item().unwrap().as_f64() - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_axes_drop_default_ellipsoid() {
        let mapping = GridMapping::builder(GridMappingKind::Sinusoidal)
            .with("semi_major_axis", 6371007.181)
            .unwrap()
            .with("semi_minor_axis", 6371007.181)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(mapping.figure().reference_ellipsoid_name, None);
        assert_eq!(
            mapping.proj_string(),
            "+proj=sinu +lon_0=0.0 +x_0=0.0 +y_0=0.0 +a=6371007.181 +b=6371007.181"
        );
    }
}
