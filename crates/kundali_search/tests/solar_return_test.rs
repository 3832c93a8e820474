//! Integration tests for the solar-return search.

use kundali_base::{Graha, SiderealPositions, angular_distance, normalize_360};
use kundali_search::{
    BirthData, Ephemeris, GeoLocation, J2000_JD, MeanMotionEphemeris, SIDEREAL_YEAR_DAYS,
    SearchError, SolarReturnConfig, solar_return, solar_return_for_birth,
};

fn birth() -> BirthData {
    BirthData::parse("1990-01-15T08:00:00", "+05:30", 28.6139, 77.2090).unwrap()
}

/// Sun moving exactly one degree per day, so its year is 360 days.
struct DegreePerDaySun;

impl Ephemeris for DegreePerDaySun {
    fn positions(
        &self,
        jd_ut: f64,
        _location: &GeoLocation,
    ) -> Result<SiderealPositions, SearchError> {
        let sun = normalize_360(jd_ut - J2000_JD);
        Ok(SiderealPositions::new(
            [sun, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 250.0],
            0.0,
        ))
    }
}

/// Ephemeris whose Sun goes missing after J2000.
struct GappyEphemeris;

impl Ephemeris for GappyEphemeris {
    fn positions(
        &self,
        jd_ut: f64,
        _location: &GeoLocation,
    ) -> Result<SiderealPositions, SearchError> {
        let sun = if jd_ut > J2000_JD { f64::NAN } else { 280.0 };
        Ok(SiderealPositions::new([sun; 9], 0.0))
    }
}

#[test]
fn mean_motion_return_converges_below_one_arcsecond() {
    let eph = MeanMotionEphemeris::default();
    let b = birth();
    let birth_jd = b.jd_ut().unwrap();
    let natal_sun = eph.sun_longitude(birth_jd, &b.location).unwrap();

    for years in [1, 10, 34, 80] {
        let sr = solar_return_for_birth(&eph, &b, years, &SolarReturnConfig::default()).unwrap();
        assert_eq!(sr.completed_years, years);
        assert!(sr.residual_arcsec < 1.0, "year {years}: {}", sr.residual_arcsec);
        assert!(sr.iterations <= 60);
        assert!((sr.natal_sun - natal_sun).abs() < 1e-12);
        let sun = eph.sun_longitude(sr.jd_ut, &b.location).unwrap();
        assert!(angular_distance(sun, natal_sun) * 3600.0 < 1.0);
        // The mean sidereal year is the anniversary step itself
        let estimate = birth_jd + f64::from(years) * SIDEREAL_YEAR_DAYS;
        assert!((sr.jd_ut - estimate).abs() < 0.01);
    }
}

#[test]
fn tighter_tolerance_costs_more_iterations() {
    let eph = MeanMotionEphemeris::default();
    let loose = SolarReturnConfig {
        tolerance_arcsec: 60.0,
        ..SolarReturnConfig::default()
    };
    let tight = SolarReturnConfig {
        tolerance_arcsec: 0.01,
        ..SolarReturnConfig::default()
    };
    let a = solar_return_for_birth(&eph, &birth(), 5, &loose).unwrap();
    let b = solar_return_for_birth(&eph, &birth(), 5, &tight).unwrap();
    assert!(a.iterations < b.iterations);
    assert!(b.residual_arcsec < 0.01);
}

#[test]
fn too_small_window_fails_to_bracket() {
    let loc = GeoLocation::new(0.0, 0.0).unwrap();
    // The 360-day year lands 5.26 days before the sidereal anniversary
    let narrow = SolarReturnConfig {
        window_days: 2.0,
        ..SolarReturnConfig::default()
    };
    let r = solar_return(&DegreePerDaySun, J2000_JD, 0.0, 1, &loc, &narrow);
    assert!(matches!(r, Err(SearchError::ConvergenceFailure(_))));

    let wide = SolarReturnConfig {
        window_days: 10.0,
        ..SolarReturnConfig::default()
    };
    let sr = solar_return(&DegreePerDaySun, J2000_JD, 0.0, 1, &loc, &wide).unwrap();
    assert!((sr.jd_ut - (J2000_JD + 360.0)).abs() < 1.0 / 3600.0);
    assert_eq!(sr.sun_longitude, DegreePerDaySun.sun_longitude(sr.jd_ut, &loc).unwrap());
}

#[test]
fn exhausted_iteration_budget_is_a_convergence_failure() {
    let config = SolarReturnConfig {
        max_iterations: 2,
        ..SolarReturnConfig::default()
    };
    let r = solar_return_for_birth(&MeanMotionEphemeris::default(), &birth(), 3, &config);
    assert!(matches!(r, Err(SearchError::ConvergenceFailure(_))));
}

#[test]
fn missing_sun_is_reported_not_zeroed() {
    let loc = GeoLocation::new(0.0, 0.0).unwrap();
    let r = solar_return(
        &GappyEphemeris,
        J2000_JD - 100.0,
        280.0,
        1,
        &loc,
        &SolarReturnConfig::default(),
    );
    assert!(matches!(r, Err(SearchError::EphemerisUnavailable(_))));
}

#[test]
fn test_ephemeris_sun_moves_one_degree_per_day() {
    let p = DegreePerDaySun
        .positions(J2000_JD + 30.0, &GeoLocation::new(0.0, 0.0).unwrap())
        .unwrap();
    assert_eq!(p.longitude(Graha::Surya), 30.0);
}
