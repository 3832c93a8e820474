//! Ephemeris collaborator: the boundary between astronomy and the chart engine.
//!
//! The engine never computes positions itself. Callers plug in any source of
//! sidereal longitudes by implementing [`Ephemeris`]. [`MeanMotionEphemeris`]
//! is a deliberately coarse linear model (mean longitudes, no equation of
//! centre, no true nodes) for offline use and tests.

use kundali_base::{Graha, SiderealPositions, normalize_360};

use crate::birth::GeoLocation;
use crate::error::SearchError;

/// Julian Day of J2000.0 (2000-01-01T12:00 TT, treated as UT here).
pub const J2000_JD: f64 = 2_451_545.0;

/// Source of sidereal positions for an instant and place.
pub trait Ephemeris {
    /// Sidereal longitudes of all nine grahas and the ascendant at `jd_ut`.
    fn positions(&self, jd_ut: f64, location: &GeoLocation)
    -> Result<SiderealPositions, SearchError>;

    /// Sidereal longitude of the Sun at `jd_ut`.
    ///
    /// Implementations with a cheaper Sun-only path should override this;
    /// the solar-return search calls it many times.
    fn sun_longitude(&self, jd_ut: f64, location: &GeoLocation) -> Result<f64, SearchError> {
        Ok(self.positions(jd_ut, location)?.longitude(Graha::Surya))
    }
}

/// Query positions and reject non-finite output.
pub(crate) fn checked_positions<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jd_ut: f64,
    location: &GeoLocation,
) -> Result<SiderealPositions, SearchError> {
    let positions = ephemeris.positions(jd_ut, location)?;
    positions
        .validate()
        .map_err(|e| SearchError::EphemerisUnavailable(format!("at JD {jd_ut}: {e}")))?;
    Ok(positions)
}

/// Query the Sun and reject non-finite output.
pub(crate) fn checked_sun_longitude<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jd_ut: f64,
    location: &GeoLocation,
) -> Result<f64, SearchError> {
    let lon = ephemeris.sun_longitude(jd_ut, location)?;
    if !lon.is_finite() {
        return Err(SearchError::EphemerisUnavailable(format!(
            "sun longitude is not finite at JD {jd_ut}"
        )));
    }
    Ok(normalize_360(lon))
}

/// Mean tropical longitude at J2000 and daily motion, degrees, Surya..Rahu.
///
/// Mercury and Venus carry the Sun's geocentric mean motion with their
/// J2000 elongations frozen.
const MEAN_ELEMENTS: [(f64, f64); 8] = [
    (280.466_46, 0.985_647_36),
    (218.316_5, 13.176_396_48),
    (355.433, 0.524_020_68),
    (271.9, 0.985_647_36),
    (34.351_5, 0.083_085_29),
    (241.6, 0.985_647_36),
    (50.077_4, 0.033_444_14),
    (125.044_5, -0.052_953_77),
];

/// Lahiri ayanamsha at J2000, degrees.
pub const LAHIRI_J2000_DEG: f64 = 23.857;

/// General precession, degrees per day (50.29 arcsec per Julian year).
const PRECESSION_DEG_PER_DAY: f64 = 50.29 / 3600.0 / 365.25;

/// Mean obliquity of the ecliptic at J2000, degrees.
const OBLIQUITY_DEG: f64 = 23.439_3;

/// Linear mean-longitude ephemeris.
///
/// Accuracy is a few degrees for the fast bodies over decades; good enough
/// to exercise charts and searches, not for real readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanMotionEphemeris {
    /// Ayanamsha at J2000 in degrees; precession is added linearly.
    pub ayanamsha_j2000_deg: f64,
}

impl Default for MeanMotionEphemeris {
    fn default() -> Self {
        Self {
            ayanamsha_j2000_deg: LAHIRI_J2000_DEG,
        }
    }
}

impl MeanMotionEphemeris {
    pub fn ayanamsha(&self, jd_ut: f64) -> f64 {
        self.ayanamsha_j2000_deg + PRECESSION_DEG_PER_DAY * (jd_ut - J2000_JD)
    }

    fn mean_sidereal(&self, graha: Graha, jd_ut: f64) -> f64 {
        let (epoch, rate) = MEAN_ELEMENTS[graha.index() as usize];
        normalize_360(epoch + rate * (jd_ut - J2000_JD) - self.ayanamsha(jd_ut))
    }

    /// Sidereal ascendant from local sidereal time and latitude.
    fn ascendant(&self, jd_ut: f64, location: &GeoLocation) -> f64 {
        let d = jd_ut - J2000_JD;
        let ramc = (280.460_618_37 + 360.985_647_366_29 * d + location.longitude).to_radians();
        let eps = OBLIQUITY_DEG.to_radians();
        let phi = location.latitude.to_radians();
        let tropical = ramc
            .cos()
            .atan2(-(ramc.sin() * eps.cos() + phi.tan() * eps.sin()))
            .to_degrees();
        normalize_360(tropical - self.ayanamsha(jd_ut))
    }
}

impl Ephemeris for MeanMotionEphemeris {
    fn positions(
        &self,
        jd_ut: f64,
        location: &GeoLocation,
    ) -> Result<SiderealPositions, SearchError> {
        if !jd_ut.is_finite() {
            return Err(SearchError::InvalidInput(format!("JD {jd_ut} is not finite")));
        }
        let mut longitudes = [0.0; 9];
        for g in [
            Graha::Surya,
            Graha::Chandra,
            Graha::Mangal,
            Graha::Buddh,
            Graha::Guru,
            Graha::Shukra,
            Graha::Shani,
            Graha::Rahu,
        ] {
            longitudes[g.index() as usize] = self.mean_sidereal(g, jd_ut);
        }
        Ok(
            SiderealPositions::new(longitudes, self.ascendant(jd_ut, location))
                .with_ketu_from_rahu(),
        )
    }

    fn sun_longitude(&self, jd_ut: f64, _location: &GeoLocation) -> Result<f64, SearchError> {
        if !jd_ut.is_finite() {
            return Err(SearchError::InvalidInput(format!("JD {jd_ut} is not finite")));
        }
        Ok(self.mean_sidereal(Graha::Surya, jd_ut))
    }
}
