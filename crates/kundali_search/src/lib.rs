//! Orchestration over the pure chart engine: birth data in, readings out.
//!
//! This crate provides:
//! - Birth-data parsing (ISO local date-time, fixed offset or IANA zone) to JD UT
//! - The [`Ephemeris`] collaborator trait and an approximate mean-motion model
//! - Full birth readings (D1, vargas, dasha, ashtakavarga, yogas, Manglik)
//! - Dasha trees and active-period snapshots for a birth
//! - Solar-return search (coarse scan + bisection)
//! - Varshaphala assembly with optional relocation
//! - Two-chart compatibility

pub mod birth;
pub mod compatibility;
pub mod dasha;
pub mod ephemeris;
pub mod error;
pub mod kundali;
pub mod kundali_types;
pub mod solar_return;
pub mod solar_return_types;
pub mod varshaphala;

pub use birth::{
    BirthData, BirthTimezone, GeoLocation, UNIX_EPOCH_JD, jd_from_utc, parse_local_datetime,
    utc_from_jd,
};
pub use compatibility::{Compatibility, compatibility_for_births, compatibility_from_charts};
pub use dasha::{
    dasha_for_birth, dasha_snapshot_for_birth, dasha_snapshot_with_moon, dasha_with_moon,
};
pub use ephemeris::{Ephemeris, J2000_JD, LAHIRI_J2000_DEG, MeanMotionEphemeris};
pub use error::SearchError;
pub use kundali::{chart_at, chart_for_birth, kundali_for_birth, kundali_from_positions};
pub use kundali_types::{DashaConfig, Kundali, KundaliConfig, VarshaphalaConfig};
pub use solar_return::{solar_return, solar_return_for_birth};
pub use solar_return_types::{SIDEREAL_YEAR_DAYS, SolarReturn, SolarReturnConfig};
pub use varshaphala::{AnnualReading, varshaphala_for_birth};
