//! Common types shared across the CF grid mapping crates.
//!
//! Provides the unit-tagged physical values that grid mapping parameters are
//! stored as, the unit vocabulary they are checked against, and the WGS 84
//! reference figure used for ellipsoid defaults.

pub mod data;
pub mod error;
pub mod figure;
pub mod number;
pub mod units;

pub use data::Data;
pub use error::{UnitsError, UnitsResult};
pub use figure::{EarthFigure, KnownEllipsoid};
pub use number::Number;
pub use units::{UnitFamily, Units};
