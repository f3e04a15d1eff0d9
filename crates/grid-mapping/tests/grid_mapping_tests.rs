//! Tests for the grid mapping catalog, parameter validation and proj-strings.

use cf_common::{Data, EarthFigure, Number};
use grid_mapping::{
    AttributeValue, Category, GridMapping, GridMappingError, GridMappingKind, MapParameter,
    ParameterValue, ProjStringBuilder, SweepAxis,
};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashSet};
use std::hash::{Hash, Hasher};

fn attributes(pairs: &[(&str, AttributeValue)]) -> BTreeMap<String, AttributeValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn rotated_pole(latitude: f64, longitude: f64) -> GridMapping {
    GridMapping::builder(GridMappingKind::RotatedLatitudeLongitude)
        .with("grid_north_pole_latitude", latitude)
        .unwrap()
        .with("grid_north_pole_longitude", longitude)
        .unwrap()
        .build()
        .unwrap()
}

fn hash_of(mapping: &GridMapping) -> u64 {
    let mut hasher = DefaultHasher::new();
    mapping.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_catalog_size() {
    assert_eq!(GridMappingKind::ALL.len(), 16);
    let ids: HashSet<_> = GridMappingKind::ALL.iter().map(|k| k.grid_mapping_name()).collect();
    assert_eq!(ids.len(), 16);
}

#[test]
fn test_lookup_mercator() {
    let kind = GridMappingKind::from_grid_mapping_name("mercator").unwrap();
    assert_eq!(kind, GridMappingKind::Mercator);
    assert_eq!(kind.proj_id(), "merc");
    assert_eq!(kind.category(), Category::Cylindrical);
}

#[test]
fn test_lookup_unknown() {
    let err = GridMappingKind::from_grid_mapping_name("Mercator").unwrap_err();
    assert_eq!(err, GridMappingError::UnsupportedGridMapping("Mercator".to_string()));
}

#[test]
fn test_every_kind_without_required_parameters_builds() {
    for kind in GridMappingKind::ALL {
        let required = kind
            .parameters()
            .iter()
            .any(|(_, d)| *d == grid_mapping::ParameterDefault::Required);
        assert_eq!(GridMapping::new(kind).is_ok(), !required, "{kind}");
    }
}

// ============================================================================
// Proj-strings
// ============================================================================

#[test]
fn test_default_mercator_proj_string() {
    let merc = GridMapping::new(GridMappingKind::Mercator).unwrap();
    assert_eq!(
        merc.proj_string(),
        "+proj=merc +lat_1=0.0 +lon_0=0.0 +k_0=1.0 +x_0=0.0 +y_0=0.0 +ellps=WGS84"
    );
}

#[test]
fn test_latitude_longitude_proj_string() {
    let latlon = GridMapping::new(GridMappingKind::LatitudeLongitude).unwrap();
    assert_eq!(latlon.proj_string(), "+proj=latlong +ellps=WGS84");
}

#[test]
fn test_lambert_conformal_from_cf_attributes() {
    let attrs = attributes(&[
        ("grid_mapping_name", "lambert_conformal_conic".into()),
        (
            "standard_parallel",
            AttributeValue::List(vec![Number::Float(25.0), Number::Float(25.0)]),
        ),
        ("longitude_of_central_meridian", 265.0.into()),
        ("latitude_of_projection_origin", 25.0.into()),
        ("earth_radius", 6371229.0.into()),
    ]);
    let lcc = GridMapping::from_cf_attributes(&attrs).unwrap();
    assert_eq!(lcc.kind(), GridMappingKind::LambertConformalConic);
    assert_eq!(
        lcc.proj_string(),
        "+proj=lcc +lat_1=25.0 +lat_2=25.0 +lon_0=265.0 +lat_0=25.0 +x_0=0.0 +y_0=0.0 +R=6371229.0"
    );
}

#[test]
fn test_radian_parameters_keep_r_suffix() {
    let stere = GridMapping::builder(GridMappingKind::Stereographic)
        .with("latitude_of_projection_origin", Data::new(0.5, "radians"))
        .unwrap()
        .build()
        .unwrap();
    assert!(stere.proj_string().contains("+lat_0=0.5R"));
}

#[test]
fn test_geostationary_proj_string() {
    let attrs = attributes(&[
        ("grid_mapping_name", "geostationary".into()),
        ("perspective_point_height", 35786023.0.into()),
        ("longitude_of_projection_origin", (-75.0).into()),
        ("sweep_angle_axis", "x".into()),
        ("fixed_angle_axis", "y".into()),
        ("semi_major_axis", 6378137.0.into()),
        ("semi_minor_axis", 6356752.31414.into()),
        ("inverse_flattening", 298.2572221.into()),
    ]);
    let goes = GridMapping::from_cf_attributes(&attrs).unwrap();
    assert_eq!(
        goes.parameter(MapParameter::SweepAngleAxis),
        Some(&ParameterValue::Axis(SweepAxis::X))
    );
    assert_eq!(
        goes.proj_string(),
        "+proj=geos +h=35786023.0 +lon_0=-75.0 +lat_0=0.0 +x_0=0.0 +y_0=0.0 +sweep=x \
         +a=6378137.0 +b=6356752.31414"
    );
}

#[test]
fn test_named_ellipsoid_and_prime_meridian() {
    let tmerc = GridMapping::builder(GridMappingKind::TransverseMercator)
        .with("reference_ellipsoid_name", "Airy 1830")
        .unwrap()
        .with("prime_meridian_name", "Paris")
        .unwrap()
        .build()
        .unwrap();
    let proj = tmerc.proj_string();
    assert!(proj.ends_with("+ellps=airy +pm=paris"), "{proj}");
}

#[test]
fn test_prime_meridian_longitude_without_name() {
    let sinu = GridMapping::builder(GridMappingKind::Sinusoidal)
        .with("longitude_of_prime_meridian", 2.337229)
        .unwrap()
        .build()
        .unwrap();
    assert!(sinu.proj_string().ends_with("+ellps=WGS84 +pm=2.337229"));
}

#[test]
fn test_unknown_ellipsoid_falls_back_to_axes() {
    let mapping = GridMapping::builder(GridMappingKind::Orthographic)
        .figure(EarthFigure {
            reference_ellipsoid_name: Some("Hough 1960".to_string()),
            semi_major_axis: 6378270.0,
            semi_minor_axis: 6356794.343,
            ..Default::default()
        })
        .build()
        .unwrap();
    assert!(mapping.proj_string().ends_with("+a=6378270.0 +b=6356794.343"));
}

#[test]
fn test_rotated_pole_proj_string() {
    let rotated = rotated_pole(39.25, -162.0);
    assert_eq!(
        rotated.proj_string(),
        "+proj=ob_tran +o_proj=latlon +o_lat_p=39.25 +lon_0=18.0 +o_lon_p=0.0 +ellps=WGS84"
    );
}

#[test]
fn test_polar_stereographic_vertical_longitude_written() {
    let ups = GridMapping::builder(GridMappingKind::PolarStereographic)
        .with("latitude_of_projection_origin", 90.0)
        .unwrap()
        .with("straight_vertical_longitude_from_pole", -45.0)
        .unwrap()
        .build()
        .unwrap();
    let proj = ups.proj_string();
    assert!(proj.contains("+lon_0=-45.0"), "{proj}");
    assert!(!proj.contains("+lon_0=0.0"), "{proj}");
    assert_eq!(proj.matches("+lon_0=").count(), 1);

    let origin = GridMapping::builder(GridMappingKind::PolarStereographic)
        .with("longitude_of_projection_origin", 10.0)
        .unwrap()
        .build()
        .unwrap();
    assert!(origin.proj_string().contains("+lon_0=10.0"));
}

#[test]
fn test_proj_builder_rejects_whitespace() {
    let result = ProjStringBuilder::new("merc").term("ellps", "WGS 84").build();
    assert!(matches!(result, Err(GridMappingError::NonRepresentable { .. })));
}

// ============================================================================
// Validation failures
// ============================================================================

#[test]
fn test_geostationary_requires_height() {
    let err = GridMapping::new(GridMappingKind::Geostationary).unwrap_err();
    assert_eq!(
        err,
        GridMappingError::MissingParameter {
            parameter: "perspective_point_height".to_string(),
            grid_mapping: "geostationary".to_string(),
        }
    );
}

#[test]
fn test_geostationary_axes_must_differ() {
    let err = GridMapping::builder(GridMappingKind::Geostationary)
        .with("perspective_point_height", 35786023.0)
        .unwrap()
        .with("sweep_angle_axis", "x")
        .unwrap()
        .with("fixed_angle_axis", "X")
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, GridMappingError::InvalidParameter { .. }));
}

#[test]
fn test_polar_stereographic_exclusive_longitudes() {
    let err = GridMapping::builder(GridMappingKind::PolarStereographic)
        .with("longitude_of_projection_origin", 10.0)
        .unwrap()
        .with("straight_vertical_longitude_from_pole", -45.0)
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, GridMappingError::InvalidParameter { .. }));

    let ok = GridMapping::builder(GridMappingKind::PolarStereographic)
        .with("straight_vertical_longitude_from_pole", -45.0)
        .unwrap()
        .build();
    assert!(ok.is_ok());
}

#[test]
fn test_length_in_kilometres_stored_in_metres() {
    let nsper = GridMapping::builder(GridMappingKind::VerticalPerspective)
        .with("perspective_point_height", Data::new(35786, "km"))
        .unwrap()
        .build()
        .unwrap();
    let height = nsper
        .parameter(MapParameter::PerspectivePointHeight)
        .and_then(ParameterValue::as_scalar)
        .unwrap();
    assert_eq!(height, &Data::new(35786000.0, "m"));
}

#[test]
fn test_from_cf_attributes_failures() {
    let missing = attributes(&[("false_easting", 0.0.into())]);
    assert!(matches!(
        GridMapping::from_cf_attributes(&missing),
        Err(GridMappingError::MissingParameter { .. })
    ));

    let unknown = attributes(&[
        ("grid_mapping_name", "mercator".into()),
        ("scale_factor", 1.0.into()),
    ]);
    assert_eq!(
        GridMapping::from_cf_attributes(&unknown).unwrap_err(),
        GridMappingError::UnrecognisedParameter("scale_factor".to_string())
    );

    let descriptive = attributes(&[
        ("grid_mapping_name", "mercator".into()),
        ("crs_wkt", "PROJCRS[...]".into()),
    ]);
    assert!(GridMapping::from_cf_attributes(&descriptive).is_ok());
}

// ============================================================================
// Equality and display
// ============================================================================

#[test]
fn test_equal_mappings_hash_equal() {
    let a = GridMapping::builder(GridMappingKind::Mercator)
        .with("false_easting", 0.0)
        .unwrap()
        .build()
        .unwrap();
    let b = GridMapping::new(GridMappingKind::Mercator).unwrap();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_display() {
    let lcc = GridMapping::builder(GridMappingKind::LambertConformalConic)
        .with("standard_parallel", 25.0)
        .unwrap()
        .build()
        .unwrap();
    assert!(lcc
        .to_string()
        .starts_with("<CF ConicGridMapping: LambertConformalConic +proj=lcc +lat_1=25.0 "));
}

#[test]
fn test_mapping_equals_its_clone() {
    let tmerc = GridMapping::builder(GridMappingKind::TransverseMercator)
        .with("prime_meridian_name", "Paris")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(tmerc, tmerc.clone());

    let set: HashSet<GridMapping> = [tmerc.clone(), tmerc].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_unwritable_prime_meridian_fails_build() {
    let result = GridMapping::builder(GridMappingKind::TransverseMercator)
        .with("prime_meridian_name", "my meridian")
        .unwrap()
        .build();
    assert!(matches!(
        result,
        Err(GridMappingError::NonRepresentable { ref key, .. }) if key == "pm"
    ));
}

#[test]
fn test_rotated_poles_are_distinguished() {
    let a = rotated_pole(39.25, -162.0);
    let b = rotated_pole(10.0, 20.0);
    assert_ne!(a, b);
    assert_eq!(a, rotated_pole(39.25, -162.0));

    let latlon = GridMapping::new(GridMappingKind::LatitudeLongitude).unwrap();
    assert_ne!(a, latlon);
    assert_ne!(b, latlon);

    let set: HashSet<GridMapping> = [a, b, latlon].into_iter().collect();
    assert_eq!(set.len(), 3);
}

#[test]
fn test_vertical_longitude_distinguishes_polar_stereographic() {
    let default = GridMapping::new(GridMappingKind::PolarStereographic).unwrap();
    let rotated = GridMapping::builder(GridMappingKind::PolarStereographic)
        .with("straight_vertical_longitude_from_pole", -45.0)
        .unwrap()
        .build()
        .unwrap();
    assert_ne!(default, rotated);
    assert_ne!(hash_of(&default), hash_of(&rotated));
}
