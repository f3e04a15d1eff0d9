//! Catalog of the grid mappings defined by the CF Conventions, Appendix F.
//!
//! Each [`GridMappingKind`] is a row of a constant table: its CF
//! `grid_mapping_name`, PROJ projection id, classification and the map
//! parameters it accepts together with their defaults. Defaults follow the
//! values PROJ reports for a minimal definition of each projection.
//!
//! See <https://cfconventions.org/Data/cf-conventions/cf-conventions-1.10/cf-conventions.html#appendix-grid-mappings>.

use crate::angular::AngularContext;
use crate::error::{GridMappingError, GridMappingResult};
use cf_common::Units;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometric classification of a grid mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Azimuthal,
    Conic,
    Cylindrical,
    LatLon,
    /// Azimuthal with a perspective view point
    Perspective,
    Unclassified,
}

impl Category {
    /// Class-style label, e.g. `ConicGridMapping`.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Azimuthal => "AzimuthalGridMapping",
            Category::Conic => "ConicGridMapping",
            Category::Cylindrical => "CylindricalGridMapping",
            Category::LatLon => "LatLonGridMapping",
            Category::Perspective => "PerspectiveGridMapping",
            Category::Unclassified => "GridMapping",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a map parameter measures, which fixes its default units and the
/// units it may be given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// A distance, stored in metres
    Length,
    /// A latitude, `degrees_north` by default
    Latitude,
    /// A longitude, `degrees_east` by default
    Longitude,
    /// Any other angle, `degrees` by default
    Angle,
    /// A dimensionless scale factor
    Scale,
    /// One of the axis names "x" or "y"
    Axis,
}

impl ParameterKind {
    /// Units assumed for a bare number.
    pub fn default_units(&self) -> Units {
        match self {
            ParameterKind::Length => Units::metres(),
            ParameterKind::Latitude => Units::degrees_north(),
            ParameterKind::Longitude => Units::degrees_east(),
            ParameterKind::Angle => Units::degrees(),
            ParameterKind::Scale | ParameterKind::Axis => Units::none(),
        }
    }

    /// Context used when decoding PROJ text for this kind of parameter.
    pub fn angular_context(&self) -> Option<AngularContext> {
        match self {
            ParameterKind::Latitude => Some(AngularContext::Latitude),
            ParameterKind::Longitude => Some(AngularContext::Longitude),
            ParameterKind::Angle => Some(AngularContext::Unspecified),
            _ => None,
        }
    }

    pub fn is_angular(&self) -> bool {
        self.angular_context().is_some()
    }
}

/// A CF map parameter attribute used by at least one grid mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapParameter {
    AzimuthOfCentralLine,
    FalseEasting,
    FalseNorthing,
    FixedAngleAxis,
    GridNorthPoleLatitude,
    GridNorthPoleLongitude,
    LatitudeOfProjectionOrigin,
    LongitudeOfCentralMeridian,
    LongitudeOfProjectionOrigin,
    NorthPoleGridLongitude,
    PerspectivePointHeight,
    ScaleFactorAtCentralMeridian,
    ScaleFactorAtProjectionOrigin,
    StandardParallel,
    StraightVerticalLongitudeFromPole,
    SweepAngleAxis,
}

impl MapParameter {
    pub const ALL: [MapParameter; 16] = [
        MapParameter::AzimuthOfCentralLine,
        MapParameter::FalseEasting,
        MapParameter::FalseNorthing,
        MapParameter::FixedAngleAxis,
        MapParameter::GridNorthPoleLatitude,
        MapParameter::GridNorthPoleLongitude,
        MapParameter::LatitudeOfProjectionOrigin,
        MapParameter::LongitudeOfCentralMeridian,
        MapParameter::LongitudeOfProjectionOrigin,
        MapParameter::NorthPoleGridLongitude,
        MapParameter::PerspectivePointHeight,
        MapParameter::ScaleFactorAtCentralMeridian,
        MapParameter::ScaleFactorAtProjectionOrigin,
        MapParameter::StandardParallel,
        MapParameter::StraightVerticalLongitudeFromPole,
        MapParameter::SweepAngleAxis,
    ];

    /// The CF attribute name.
    pub fn cf_name(&self) -> &'static str {
        match self {
            MapParameter::AzimuthOfCentralLine => "azimuth_of_central_line",
            MapParameter::FalseEasting => "false_easting",
            MapParameter::FalseNorthing => "false_northing",
            MapParameter::FixedAngleAxis => "fixed_angle_axis",
            MapParameter::GridNorthPoleLatitude => "grid_north_pole_latitude",
            MapParameter::GridNorthPoleLongitude => "grid_north_pole_longitude",
            MapParameter::LatitudeOfProjectionOrigin => "latitude_of_projection_origin",
            MapParameter::LongitudeOfCentralMeridian => "longitude_of_central_meridian",
            MapParameter::LongitudeOfProjectionOrigin => "longitude_of_projection_origin",
            MapParameter::NorthPoleGridLongitude => "north_pole_grid_longitude",
            MapParameter::PerspectivePointHeight => "perspective_point_height",
            MapParameter::ScaleFactorAtCentralMeridian => "scale_factor_at_central_meridian",
            MapParameter::ScaleFactorAtProjectionOrigin => "scale_factor_at_projection_origin",
            MapParameter::StandardParallel => "standard_parallel",
            MapParameter::StraightVerticalLongitudeFromPole => {
                "straight_vertical_longitude_from_pole"
            }
            MapParameter::SweepAngleAxis => "sweep_angle_axis",
        }
    }

    /// Look up a CF attribute name.
    pub fn from_cf_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.cf_name() == name)
    }

    /// PROJ keys the parameter is written to. Standard parallels occupy two
    /// keys. The fixed angle axis follows from the sweep axis and has none.
    pub fn proj_keys(&self) -> &'static [&'static str] {
        match self {
            MapParameter::AzimuthOfCentralLine => &["alpha"],
            MapParameter::FalseEasting => &["x_0"],
            MapParameter::FalseNorthing => &["y_0"],
            MapParameter::LatitudeOfProjectionOrigin => &["lat_0"],
            MapParameter::LongitudeOfCentralMeridian
            | MapParameter::LongitudeOfProjectionOrigin => &["lon_0"],
            MapParameter::PerspectivePointHeight => &["h"],
            MapParameter::ScaleFactorAtCentralMeridian
            | MapParameter::ScaleFactorAtProjectionOrigin => &["k_0"],
            MapParameter::StandardParallel => &["lat_1", "lat_2"],
            MapParameter::SweepAngleAxis => &["sweep"],
            MapParameter::GridNorthPoleLatitude => &["o_lat_p"],
            MapParameter::GridNorthPoleLongitude
            | MapParameter::StraightVerticalLongitudeFromPole => &["lon_0"],
            MapParameter::NorthPoleGridLongitude => &["o_lon_p"],
            MapParameter::FixedAngleAxis => &[],
        }
    }

    pub fn kind(&self) -> ParameterKind {
        match self {
            MapParameter::FalseEasting
            | MapParameter::FalseNorthing
            | MapParameter::PerspectivePointHeight => ParameterKind::Length,
            MapParameter::GridNorthPoleLatitude
            | MapParameter::LatitudeOfProjectionOrigin
            | MapParameter::StandardParallel => ParameterKind::Latitude,
            MapParameter::GridNorthPoleLongitude
            | MapParameter::LongitudeOfCentralMeridian
            | MapParameter::LongitudeOfProjectionOrigin
            | MapParameter::NorthPoleGridLongitude
            | MapParameter::StraightVerticalLongitudeFromPole => ParameterKind::Longitude,
            MapParameter::AzimuthOfCentralLine => ParameterKind::Angle,
            MapParameter::ScaleFactorAtCentralMeridian
            | MapParameter::ScaleFactorAtProjectionOrigin => ParameterKind::Scale,
            MapParameter::FixedAngleAxis | MapParameter::SweepAngleAxis => ParameterKind::Axis,
        }
    }
}

impl fmt::Display for MapParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cf_name())
    }
}

/// CF attributes describing the ellipsoid and prime meridian. Any grid
/// mapping may carry them.
pub const FIGURE_ATTRIBUTES: [&str; 7] = [
    "earth_radius",
    "inverse_flattening",
    "longitude_of_prime_meridian",
    "prime_meridian_name",
    "reference_ellipsoid_name",
    "semi_major_axis",
    "semi_minor_axis",
];

/// Other CF grid mapping attributes (Table F.1) that carry no map parameter
/// and play no part in the proj-string.
pub const DESCRIPTIVE_ATTRIBUTES: [&str; 7] = [
    "crs_wkt",
    "geographic_crs_name",
    "geoid_name",
    "geopotential_datum_name",
    "horizontal_datum_name",
    "projected_crs_name",
    "towgs84",
];

/// Default applied to a map parameter that is not given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterDefault {
    /// Must be supplied
    Required,
    /// A number in the parameter's default units
    Value(f64),
    /// First and second standard parallel; `None` leaves a slot unset
    Pair(Option<f64>, Option<f64>),
    /// An axis name
    Axis(&'static str),
}

type Schema = &'static [(MapParameter, ParameterDefault)];

use MapParameter as P;
use ParameterDefault::{Axis, Pair, Required, Value};

const FALSE_ORIGIN: [(MapParameter, ParameterDefault); 2] =
    [(P::FalseEasting, Value(0.0)), (P::FalseNorthing, Value(0.0))];

const ALBERS_EQUAL_AREA: Schema = &[
    (P::StandardParallel, Pair(Some(0.0), Some(0.0))),
    (P::LongitudeOfCentralMeridian, Value(0.0)),
    (P::LatitudeOfProjectionOrigin, Value(0.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
];

const AZIMUTHAL: Schema = &[
    (P::LongitudeOfProjectionOrigin, Value(0.0)),
    (P::LatitudeOfProjectionOrigin, Value(0.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
];

const GEOSTATIONARY: Schema = &[
    (P::PerspectivePointHeight, Required),
    (P::LongitudeOfProjectionOrigin, Value(0.0)),
    (P::LatitudeOfProjectionOrigin, Value(0.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
    (P::SweepAngleAxis, Axis("y")),
    (P::FixedAngleAxis, Axis("x")),
];

const LAMBERT_CONFORMAL_CONIC: Schema = &[
    (P::StandardParallel, Required),
    (P::LongitudeOfCentralMeridian, Value(0.0)),
    (P::LatitudeOfProjectionOrigin, Value(0.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
];

const LAMBERT_CYLINDRICAL_EQUAL_AREA: Schema = &[
    (P::StandardParallel, Pair(Some(0.0), None)),
    (P::LongitudeOfCentralMeridian, Value(0.0)),
    (P::ScaleFactorAtProjectionOrigin, Value(1.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
];

const MERCATOR: Schema = &[
    (P::StandardParallel, Pair(Some(0.0), None)),
    (P::LongitudeOfProjectionOrigin, Value(0.0)),
    (P::ScaleFactorAtProjectionOrigin, Value(1.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
];

const OBLIQUE_MERCATOR: Schema = &[
    (P::AzimuthOfCentralLine, Value(0.0)),
    (P::LatitudeOfProjectionOrigin, Value(0.0)),
    (P::LongitudeOfProjectionOrigin, Value(0.0)),
    (P::ScaleFactorAtProjectionOrigin, Value(1.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
];

const POLAR_STEREOGRAPHIC: Schema = &[
    (P::LatitudeOfProjectionOrigin, Value(0.0)),
    (P::LongitudeOfProjectionOrigin, Value(0.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
    (P::StandardParallel, Pair(Some(0.0), Some(0.0))),
    (P::StraightVerticalLongitudeFromPole, Value(0.0)),
    (P::ScaleFactorAtProjectionOrigin, Value(1.0)),
];

const ROTATED_LATITUDE_LONGITUDE: Schema = &[
    (P::GridNorthPoleLatitude, Required),
    (P::GridNorthPoleLongitude, Required),
    (P::NorthPoleGridLongitude, Value(0.0)),
];

const SINUSOIDAL: Schema = &[
    (P::LongitudeOfProjectionOrigin, Value(0.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
];

const STEREOGRAPHIC: Schema = &[
    (P::LongitudeOfProjectionOrigin, Value(0.0)),
    (P::LatitudeOfProjectionOrigin, Value(0.0)),
    (P::ScaleFactorAtProjectionOrigin, Value(1.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
];

const TRANSVERSE_MERCATOR: Schema = &[
    (P::ScaleFactorAtCentralMeridian, Value(1.0)),
    (P::LongitudeOfCentralMeridian, Value(0.0)),
    (P::LatitudeOfProjectionOrigin, Value(0.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
];

const VERTICAL_PERSPECTIVE: Schema = &[
    (P::PerspectivePointHeight, Required),
    (P::LongitudeOfProjectionOrigin, Value(0.0)),
    (P::LatitudeOfProjectionOrigin, Value(0.0)),
    FALSE_ORIGIN[0],
    FALSE_ORIGIN[1],
];

/// A grid mapping recognised by the CF Conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMappingKind {
    #[serde(rename = "albers_conical_equal_area")]
    AlbersEqualArea,
    AzimuthalEquidistant,
    Geostationary,
    LambertAzimuthalEqualArea,
    LambertConformalConic,
    LambertCylindricalEqualArea,
    Mercator,
    ObliqueMercator,
    Orthographic,
    PolarStereographic,
    RotatedLatitudeLongitude,
    LatitudeLongitude,
    Sinusoidal,
    Stereographic,
    TransverseMercator,
    VerticalPerspective,
}

impl GridMappingKind {
    pub const ALL: [GridMappingKind; 16] = [
        GridMappingKind::AlbersEqualArea,
        GridMappingKind::AzimuthalEquidistant,
        GridMappingKind::Geostationary,
        GridMappingKind::LambertAzimuthalEqualArea,
        GridMappingKind::LambertConformalConic,
        GridMappingKind::LambertCylindricalEqualArea,
        GridMappingKind::Mercator,
        GridMappingKind::ObliqueMercator,
        GridMappingKind::Orthographic,
        GridMappingKind::PolarStereographic,
        GridMappingKind::RotatedLatitudeLongitude,
        GridMappingKind::LatitudeLongitude,
        GridMappingKind::Sinusoidal,
        GridMappingKind::Stereographic,
        GridMappingKind::TransverseMercator,
        GridMappingKind::VerticalPerspective,
    ];

    /// Look up a CF `grid_mapping_name` value.
    pub fn from_grid_mapping_name(name: &str) -> GridMappingResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.grid_mapping_name() == name)
            .ok_or_else(|| GridMappingError::UnsupportedGridMapping(name.to_string()))
    }

    /// The value of the CF `grid_mapping_name` attribute.
    pub fn grid_mapping_name(&self) -> &'static str {
        match self {
            GridMappingKind::AlbersEqualArea => "albers_conical_equal_area",
            GridMappingKind::AzimuthalEquidistant => "azimuthal_equidistant",
            GridMappingKind::Geostationary => "geostationary",
            GridMappingKind::LambertAzimuthalEqualArea => "lambert_azimuthal_equal_area",
            GridMappingKind::LambertConformalConic => "lambert_conformal_conic",
            GridMappingKind::LambertCylindricalEqualArea => "lambert_cylindrical_equal_area",
            GridMappingKind::Mercator => "mercator",
            GridMappingKind::ObliqueMercator => "oblique_mercator",
            GridMappingKind::Orthographic => "orthographic",
            GridMappingKind::PolarStereographic => "polar_stereographic",
            GridMappingKind::RotatedLatitudeLongitude => "rotated_latitude_longitude",
            GridMappingKind::LatitudeLongitude => "latitude_longitude",
            GridMappingKind::Sinusoidal => "sinusoidal",
            GridMappingKind::Stereographic => "stereographic",
            GridMappingKind::TransverseMercator => "transverse_mercator",
            GridMappingKind::VerticalPerspective => "vertical_perspective",
        }
    }

    /// The PROJ projection identifier.
    pub fn proj_id(&self) -> &'static str {
        match self {
            GridMappingKind::AlbersEqualArea => "aea",
            GridMappingKind::AzimuthalEquidistant => "aeqd",
            GridMappingKind::Geostationary => "geos",
            GridMappingKind::LambertAzimuthalEqualArea => "laea",
            GridMappingKind::LambertConformalConic => "lcc",
            GridMappingKind::LambertCylindricalEqualArea => "cea",
            GridMappingKind::Mercator => "merc",
            GridMappingKind::ObliqueMercator => "omerc",
            GridMappingKind::Orthographic => "ortho",
            GridMappingKind::PolarStereographic => "ups",
            GridMappingKind::RotatedLatitudeLongitude => "ob_tran",
            GridMappingKind::LatitudeLongitude => "latlong",
            GridMappingKind::Sinusoidal => "sinu",
            GridMappingKind::Stereographic => "stere",
            GridMappingKind::TransverseMercator => "tmerc",
            GridMappingKind::VerticalPerspective => "nsper",
        }
    }

    /// Human readable name, e.g. `LambertConformalConic`.
    pub fn display_name(&self) -> &'static str {
        match self {
            GridMappingKind::AlbersEqualArea => "AlbersEqualArea",
            GridMappingKind::AzimuthalEquidistant => "AzimuthalEquidistant",
            GridMappingKind::Geostationary => "Geostationary",
            GridMappingKind::LambertAzimuthalEqualArea => "LambertAzimuthalEqualArea",
            GridMappingKind::LambertConformalConic => "LambertConformalConic",
            GridMappingKind::LambertCylindricalEqualArea => "LambertCylindricalEqualArea",
            GridMappingKind::Mercator => "Mercator",
            GridMappingKind::ObliqueMercator => "ObliqueMercator",
            GridMappingKind::Orthographic => "Orthographic",
            GridMappingKind::PolarStereographic => "PolarStereographic",
            GridMappingKind::RotatedLatitudeLongitude => "RotatedLatitudeLongitude",
            GridMappingKind::LatitudeLongitude => "LatitudeLongitude",
            GridMappingKind::Sinusoidal => "Sinusoidal",
            GridMappingKind::Stereographic => "Stereographic",
            GridMappingKind::TransverseMercator => "TransverseMercator",
            GridMappingKind::VerticalPerspective => "VerticalPerspective",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            GridMappingKind::AzimuthalEquidistant
            | GridMappingKind::LambertAzimuthalEqualArea
            | GridMappingKind::Orthographic
            | GridMappingKind::PolarStereographic
            | GridMappingKind::Stereographic => Category::Azimuthal,
            GridMappingKind::AlbersEqualArea | GridMappingKind::LambertConformalConic => {
                Category::Conic
            }
            GridMappingKind::LambertCylindricalEqualArea
            | GridMappingKind::Mercator
            | GridMappingKind::ObliqueMercator
            | GridMappingKind::TransverseMercator => Category::Cylindrical,
            GridMappingKind::RotatedLatitudeLongitude | GridMappingKind::LatitudeLongitude => {
                Category::LatLon
            }
            GridMappingKind::Geostationary | GridMappingKind::VerticalPerspective => {
                Category::Perspective
            }
            GridMappingKind::Sinusoidal => Category::Unclassified,
        }
    }

    /// Map parameters accepted, in proj-string order, with their defaults.
    pub fn parameters(&self) -> &'static [(MapParameter, ParameterDefault)] {
        match self {
            GridMappingKind::AlbersEqualArea => ALBERS_EQUAL_AREA,
            GridMappingKind::AzimuthalEquidistant
            | GridMappingKind::LambertAzimuthalEqualArea
            | GridMappingKind::Orthographic => AZIMUTHAL,
            GridMappingKind::Geostationary => GEOSTATIONARY,
            GridMappingKind::LambertConformalConic => LAMBERT_CONFORMAL_CONIC,
            GridMappingKind::LambertCylindricalEqualArea => LAMBERT_CYLINDRICAL_EQUAL_AREA,
            GridMappingKind::Mercator => MERCATOR,
            GridMappingKind::ObliqueMercator => OBLIQUE_MERCATOR,
            GridMappingKind::PolarStereographic => POLAR_STEREOGRAPHIC,
            GridMappingKind::RotatedLatitudeLongitude => ROTATED_LATITUDE_LONGITUDE,
            GridMappingKind::LatitudeLongitude => &[],
            GridMappingKind::Sinusoidal => SINUSOIDAL,
            GridMappingKind::Stereographic => STEREOGRAPHIC,
            GridMappingKind::TransverseMercator => TRANSVERSE_MERCATOR,
            GridMappingKind::VerticalPerspective => VERTICAL_PERSPECTIVE,
        }
    }

    /// Whether `parameter` applies to this grid mapping.
    pub fn accepts(&self, parameter: MapParameter) -> bool {
        self.parameters().iter().any(|(p, _)| *p == parameter)
    }

    /// Azimuthal, including perspective mappings.
    pub fn is_azimuthal(&self) -> bool {
        matches!(self.category(), Category::Azimuthal | Category::Perspective)
    }

    pub fn is_conic(&self) -> bool {
        self.category() == Category::Conic
    }

    pub fn is_cylindrical(&self) -> bool {
        self.category() == Category::Cylindrical
    }

    pub fn is_latlon(&self) -> bool {
        self.category() == Category::LatLon
    }

    pub fn is_perspective(&self) -> bool {
        self.category() == Category::Perspective
    }
}

impl fmt::Display for GridMappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.grid_mapping_name())
    }
}
