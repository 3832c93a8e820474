//! Solar-return (varsha pravesha) search.
//!
//! Finds when the sidereal Sun comes back to its natal longitude.
//! Coarse scan + bisection on f(t) = normalize(sun(t) - natal_sun), which
//! wraps to [-180, +180] so the zero crossing is the return.
//!
//! The window is centred on the anniversary estimate
//! `birth + years * SIDEREAL_YEAR_DAYS`; with a sane ephemeris the return
//! is within a day of it.

use log::{debug, warn};

use kundali_base::normalize_to_pm180;

use crate::birth::{BirthData, GeoLocation};
use crate::ephemeris::{Ephemeris, checked_positions, checked_sun_longitude};
use crate::error::SearchError;
use crate::solar_return_types::{SIDEREAL_YEAR_DAYS, SolarReturn, SolarReturnConfig};

/// Signed residual f(t) = normalize(sun(t) - natal_sun), degrees.
fn residual<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    natal_sun: f64,
    location: &GeoLocation,
    jd_ut: f64,
) -> Result<(f64, f64), SearchError> {
    let sun = checked_sun_longitude(ephemeris, jd_ut, location)?;
    Ok((normalize_to_pm180(sun - natal_sun), sun))
}

/// A sign change that is a real zero crossing, not the +-180 wrap.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

fn located(
    completed_years: u32,
    jd_ut: f64,
    natal_sun: f64,
    sun_longitude: f64,
    f: f64,
    iterations: u32,
) -> SolarReturn {
    SolarReturn {
        completed_years,
        jd_ut,
        natal_sun,
        sun_longitude,
        residual_arcsec: f.abs() * 3600.0,
        iterations,
    }
}

/// Bisect a bracketed crossing until the residual is inside tolerance.
#[allow(clippy::too_many_arguments)]
fn bisect_refinement<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    natal_sun: f64,
    location: &GeoLocation,
    completed_years: u32,
    mut t_a: f64,
    mut f_a: f64,
    mut t_b: f64,
    config: &SolarReturnConfig,
) -> Result<SolarReturn, SearchError> {
    let tolerance_deg = config.tolerance_arcsec / 3600.0;
    for i in 1..=config.max_iterations {
        let t_mid = 0.5 * (t_a + t_b);
        let (f_mid, sun) = residual(ephemeris, natal_sun, location, t_mid)?;
        debug!(
            "solar return bisection {i}: jd {t_mid:.8} residual {:.4}\"",
            f_mid * 3600.0
        );

        if f_mid.abs() < tolerance_deg {
            return Ok(located(completed_years, t_mid, natal_sun, sun, f_mid, i));
        }
        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
    }

    warn!(
        "solar return for year {completed_years} not within {}\" after {} iterations",
        config.tolerance_arcsec, config.max_iterations
    );
    Err(SearchError::ConvergenceFailure(
        "solar return bisection exhausted its iteration budget",
    ))
}

/// Find the return of the Sun to `natal_sun` after `completed_years`.
///
/// `birth_jd` anchors the anniversary estimate; the Sun is sampled at
/// `location` (geocentric ephemerides may ignore it).
pub fn solar_return<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth_jd: f64,
    natal_sun: f64,
    completed_years: u32,
    location: &GeoLocation,
    config: &SolarReturnConfig,
) -> Result<SolarReturn, SearchError> {
    config
        .validate()
        .map_err(|e| SearchError::InvalidInput(e.to_string()))?;
    if !birth_jd.is_finite() || !natal_sun.is_finite() {
        return Err(SearchError::InvalidInput(
            "birth jd and natal sun must be finite".to_string(),
        ));
    }

    let estimate = birth_jd + f64::from(completed_years) * SIDEREAL_YEAR_DAYS;
    let jd_start = estimate - config.window_days;
    let jd_end = estimate + config.window_days;
    debug!(
        "solar return year {completed_years}: scanning JD {jd_start:.4}..{jd_end:.4} step {}",
        config.step_days
    );

    let tolerance_deg = config.tolerance_arcsec / 3600.0;
    let mut t_prev = jd_start;
    let (mut f_prev, sun_prev) = residual(ephemeris, natal_sun, location, t_prev)?;
    if f_prev.abs() < tolerance_deg {
        return Ok(located(completed_years, t_prev, natal_sun, sun_prev, f_prev, 0));
    }

    while t_prev < jd_end {
        let t_curr = (t_prev + config.step_days).min(jd_end);
        let (f_curr, sun_curr) = residual(ephemeris, natal_sun, location, t_curr)?;

        if f_curr.abs() < tolerance_deg {
            return Ok(located(completed_years, t_curr, natal_sun, sun_curr, f_curr, 0));
        }
        if is_genuine_crossing(f_prev, f_curr) {
            return bisect_refinement(
                ephemeris,
                natal_sun,
                location,
                completed_years,
                t_prev,
                f_prev,
                t_curr,
                config,
            );
        }

        t_prev = t_curr;
        f_prev = f_curr;
    }

    warn!(
        "no solar return bracket for year {completed_years} within +-{} days of JD {estimate:.4}",
        config.window_days
    );
    Err(SearchError::ConvergenceFailure(
        "sun does not return to its natal longitude inside the search window",
    ))
}

/// Solar return for a birth record, with the natal Sun taken from the
/// same ephemeris.
pub fn solar_return_for_birth<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth: &BirthData,
    completed_years: u32,
    config: &SolarReturnConfig,
) -> Result<SolarReturn, SearchError> {
    let birth_jd = birth.jd_ut()?;
    let natal = checked_positions(ephemeris, birth_jd, &birth.location)?;
    solar_return(
        ephemeris,
        birth_jd,
        natal.longitude(kundali_base::Graha::Surya),
        completed_years,
        &birth.location,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genuine_crossing_positive() {
        assert!(is_genuine_crossing(0.3, -0.2));
        assert!(is_genuine_crossing(-1.0, 1.0));
    }

    #[test]
    fn wraparound_rejected() {
        assert!(!is_genuine_crossing(179.0, -179.0));
        assert!(!is_genuine_crossing(-179.5, 179.5));
    }

    #[test]
    fn invalid_config_rejected_before_search() {
        let eph = crate::ephemeris::MeanMotionEphemeris::default();
        let loc = GeoLocation::new(0.0, 0.0).unwrap();
        let config = SolarReturnConfig {
            step_days: -1.0,
            ..SolarReturnConfig::default()
        };
        let r = solar_return(&eph, 2_451_545.0, 280.0, 1, &loc, &config);
        assert!(matches!(r, Err(SearchError::InvalidInput(_))));
    }
}
