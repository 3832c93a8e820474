//! Position normalizer: raw sidereal longitudes to sign, degree, nakshatra, pada.
//!
//! This is the entry point for every downstream component. Longitudes are
//! always wrapped modulo 360; only non-finite values are rejected.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::graha::Graha;
use crate::nakshatra::{Nakshatra, nakshatra_from_longitude};
use crate::rashi::{Dms, Rashi, rashi_from_longitude};
use crate::util::normalize_360;

/// Resolved sidereal positions for one instant, in [`crate::ALL_GRAHAS`] order.
///
/// This is the boundary type between an ephemeris collaborator and the
/// engine: longitudes are sidereal degrees, `lagna` is the sidereal
/// ascendant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiderealPositions {
    /// Sidereal longitudes of Surya..Ketu, degrees.
    pub longitudes: [f64; 9],
    /// Retrograde flags of Surya..Ketu.
    pub retrograde: [bool; 9],
    /// Sidereal ascendant longitude, degrees.
    pub lagna: f64,
}

impl SiderealPositions {
    /// Positions with all grahas direct except the nodes (always retrograde
    /// in mean motion).
    pub fn new(longitudes: [f64; 9], lagna: f64) -> Self {
        let mut retrograde = [false; 9];
        retrograde[Graha::Rahu.index() as usize] = true;
        retrograde[Graha::Ketu.index() as usize] = true;
        Self {
            longitudes,
            retrograde,
            lagna,
        }
    }

    /// Replace Ketu's longitude with Rahu + 180 deg.
    pub fn with_ketu_from_rahu(mut self) -> Self {
        let rahu = self.longitudes[Graha::Rahu.index() as usize];
        self.longitudes[Graha::Ketu.index() as usize] = normalize_360(rahu + 180.0);
        self
    }

    /// Longitude of one graha, wrapped to [0, 360).
    pub fn longitude(&self, graha: Graha) -> f64 {
        normalize_360(self.longitudes[graha.index() as usize])
    }

    /// Retrograde flag of one graha.
    pub fn is_retrograde(&self, graha: Graha) -> bool {
        self.retrograde[graha.index() as usize]
    }

    /// Reject NaN or infinite longitudes.
    pub fn validate(&self) -> Result<(), VedicError> {
        if !self.lagna.is_finite() {
            return Err(VedicError::InvalidInput("lagna longitude is not finite"));
        }
        if self.longitudes.iter().any(|l| !l.is_finite()) {
            return Err(VedicError::InvalidInput("graha longitude is not finite"));
        }
        Ok(())
    }
}

/// Normalized view of one longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionInfo {
    /// Longitude wrapped to [0, 360).
    pub longitude: f64,
    pub rashi: Rashi,
    /// 1-based sign number.
    pub sign: u8,
    /// Degrees within the sign, [0, 30).
    pub degrees_in_sign: f64,
    pub dms: Dms,
    pub nakshatra: Nakshatra,
    /// 1-based pada.
    pub pada: u8,
}

/// Normalize a raw sidereal longitude.
///
/// `sign = floor(lon / 30) + 1`, `degrees_in_sign = lon mod 30`,
/// `nakshatra = floor(lon / (360/27))`, `pada = floor((lon mod span) / (span/4)) + 1`.
pub fn normalize_position(sidereal_lon_deg: f64) -> PositionInfo {
    let longitude = normalize_360(sidereal_lon_deg);
    let r = rashi_from_longitude(longitude);
    let n = nakshatra_from_longitude(longitude);
    PositionInfo {
        longitude,
        rashi: r.rashi,
        sign: r.rashi.number(),
        degrees_in_sign: r.degrees_in_rashi,
        dms: r.dms,
        nakshatra: n.nakshatra,
        pada: n.pada,
    }
}
