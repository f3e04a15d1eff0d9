//! Figure of the Earth: ellipsoid and prime meridian parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// WGS 84 semi-major axis (metres).
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6378137.0;
/// WGS 84 semi-minor axis (metres).
pub const WGS84_SEMI_MINOR_AXIS: f64 = 6356752.314245179;
/// WGS 84 inverse flattening.
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257223563;
/// CF name of the WGS 84 ellipsoid.
pub const WGS84_ELLIPSOID_NAME: &str = "WGS 84";
/// CF name of the default prime meridian.
pub const GREENWICH: &str = "Greenwich";

/// Ellipsoids with a built-in PROJ definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownEllipsoid {
    Wgs84,
    Grs80,
    Airy1830,
    Bessel1841,
    Clarke1866,
    International1924,
}

impl KnownEllipsoid {
    /// Look up a CF `reference_ellipsoid_name`.
    ///
    /// Accepts the spaced CF spelling ("WGS 84") as well as the PROJ id
    /// ("WGS84"), ignoring case.
    pub fn from_cf_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "WGS84" | "WGS1984" => Some(KnownEllipsoid::Wgs84),
            "GRS80" | "GRS1980" => Some(KnownEllipsoid::Grs80),
            "AIRY" | "AIRY1830" => Some(KnownEllipsoid::Airy1830),
            "BESSEL" | "BESSEL1841" => Some(KnownEllipsoid::Bessel1841),
            "CLRK66" | "CLARKE1866" => Some(KnownEllipsoid::Clarke1866),
            "INTL" | "INTERNATIONAL1924" => Some(KnownEllipsoid::International1924),
            _ => None,
        }
    }

    /// The PROJ `+ellps` identifier.
    pub fn proj_id(&self) -> &'static str {
        match self {
            KnownEllipsoid::Wgs84 => "WGS84",
            KnownEllipsoid::Grs80 => "GRS80",
            KnownEllipsoid::Airy1830 => "airy",
            KnownEllipsoid::Bessel1841 => "bessel",
            KnownEllipsoid::Clarke1866 => "clrk66",
            KnownEllipsoid::International1924 => "intl",
        }
    }
}

impl fmt::Display for KnownEllipsoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KnownEllipsoid::Wgs84 => "WGS 84",
            KnownEllipsoid::Grs80 => "GRS 1980",
            KnownEllipsoid::Airy1830 => "Airy 1830",
            KnownEllipsoid::Bessel1841 => "Bessel 1841",
            KnownEllipsoid::Clarke1866 => "Clarke 1866",
            KnownEllipsoid::International1924 => "International 1924",
        };
        write!(f, "{}", name)
    }
}

/// The ellipsoid and prime meridian attributes that may accompany any grid
/// mapping.
///
/// Defaults are the WGS 84 values. `earth_radius`, when set, describes a
/// sphere and takes precedence over the ellipsoid name; the prime meridian
/// name takes precedence over its longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarthFigure {
    pub reference_ellipsoid_name: Option<String>,
    /// Semi-major axis (metres)
    pub semi_major_axis: f64,
    /// Semi-minor axis (metres)
    pub semi_minor_axis: f64,
    pub inverse_flattening: f64,
    pub prime_meridian_name: Option<String>,
    /// Longitude of the prime meridian relative to Greenwich (degrees)
    pub longitude_of_prime_meridian: f64,
    /// Radius of a spherical Earth (metres)
    pub earth_radius: Option<f64>,
}

impl Default for EarthFigure {
    fn default() -> Self {
        Self {
            reference_ellipsoid_name: Some(WGS84_ELLIPSOID_NAME.to_string()),
            semi_major_axis: WGS84_SEMI_MAJOR_AXIS,
            semi_minor_axis: WGS84_SEMI_MINOR_AXIS,
            inverse_flattening: WGS84_INVERSE_FLATTENING,
            prime_meridian_name: Some(GREENWICH.to_string()),
            longitude_of_prime_meridian: 0.0,
            earth_radius: None,
        }
    }
}

impl EarthFigure {
    /// The built-in ellipsoid named by `reference_ellipsoid_name`, if any.
    pub fn known_ellipsoid(&self) -> Option<KnownEllipsoid> {
        self.reference_ellipsoid_name
            .as_deref()
            .and_then(KnownEllipsoid::from_cf_name)
    }

    /// Whether the prime meridian is Greenwich.
    pub fn is_greenwich(&self) -> bool {
        match self.prime_meridian_name.as_deref() {
            Some(name) => name.eq_ignore_ascii_case(GREENWICH),
            None => self.longitude_of_prime_meridian == 0.0,
        }
    }
}
