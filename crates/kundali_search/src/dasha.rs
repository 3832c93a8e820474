//! Dasha orchestration: bridges an ephemeris with the pure dasha builder.
//!
//! Two entry points per input kind:
//! - `dasha_for_birth` / `dasha_with_moon`: the full tree
//! - `dasha_snapshot_for_birth` / `dasha_snapshot_with_moon`: active periods
//!   at a query instant

use log::debug;

use kundali_base::{DashaSnapshot, DashaSystem, DashaTree, Graha};
use kundali_base::{mudda_dasha, vimshottari_dasha, yogini_dasha};

use crate::birth::BirthData;
use crate::ephemeris::{Ephemeris, checked_positions};
use crate::error::SearchError;
use crate::kundali_types::DashaConfig;

/// Build the configured tree from a known Moon longitude.
pub fn dasha_with_moon(
    moon_sidereal_lon: f64,
    birth_jd: f64,
    config: &DashaConfig,
) -> Result<DashaTree, SearchError> {
    config
        .validate()
        .map_err(|e| SearchError::InvalidInput(e.to_string()))?;
    let options = config.options();
    let tree = match config.system {
        DashaSystem::Vimshottari => vimshottari_dasha(moon_sidereal_lon, birth_jd, &options),
        DashaSystem::Yogini => yogini_dasha(moon_sidereal_lon, birth_jd, &options),
        DashaSystem::Mudda => mudda_dasha(moon_sidereal_lon, birth_jd, &options),
    }?;
    debug!(
        "{} dasha: {} roots, JD {:.4}..{:.4}",
        tree.system.name(),
        tree.periods.len(),
        tree.start_jd,
        tree.end_jd
    );
    Ok(tree)
}

/// Moon longitude and birth JD for a birth record.
fn moon_at_birth<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth: &BirthData,
) -> Result<(f64, f64), SearchError> {
    let jd = birth.jd_ut()?;
    let positions = checked_positions(ephemeris, jd, &birth.location)?;
    Ok((positions.longitude(Graha::Chandra), jd))
}

/// Build the configured tree for a birth record.
pub fn dasha_for_birth<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth: &BirthData,
    config: &DashaConfig,
) -> Result<DashaTree, SearchError> {
    let (moon, jd) = moon_at_birth(ephemeris, birth)?;
    dasha_with_moon(moon, jd, config)
}

/// Active periods at `query_jd` from a known Moon longitude.
pub fn dasha_snapshot_with_moon(
    moon_sidereal_lon: f64,
    birth_jd: f64,
    query_jd: f64,
    config: &DashaConfig,
) -> Result<DashaSnapshot, SearchError> {
    if !query_jd.is_finite() {
        return Err(SearchError::InvalidInput(
            "query jd is not finite".to_string(),
        ));
    }
    Ok(dasha_with_moon(moon_sidereal_lon, birth_jd, config)?.snapshot(query_jd))
}

/// Active periods at `query_jd` for a birth record.
pub fn dasha_snapshot_for_birth<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth: &BirthData,
    query_jd: f64,
    config: &DashaConfig,
) -> Result<DashaSnapshot, SearchError> {
    let (moon, jd) = moon_at_birth(ephemeris, birth)?;
    dasha_snapshot_with_moon(moon, jd, query_jd, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kundali_base::{DAYS_PER_YEAR, DashaLord};

    #[test]
    fn system_dispatch() {
        let jd = 2_447_906.6;
        let cfg = DashaConfig {
            system: DashaSystem::Yogini,
            depth: 1,
            ..DashaConfig::default()
        };
        let tree = dasha_with_moon(45.0, jd, &cfg).unwrap();
        assert_eq!(tree.system, DashaSystem::Yogini);
        assert!((tree.end_jd - tree.start_jd - 36.0 * DAYS_PER_YEAR).abs() < 1e-6);

        let cfg = DashaConfig {
            system: DashaSystem::Mudda,
            depth: 2,
            ..DashaConfig::default()
        };
        let tree = dasha_with_moon(45.0, jd, &cfg).unwrap();
        assert!((tree.end_jd - tree.start_jd - DAYS_PER_YEAR).abs() < 1e-9);
    }

    #[test]
    fn snapshot_from_moon() {
        let jd = 2_447_906.6;
        let snap =
            dasha_snapshot_with_moon(45.0, jd, jd + 1.0, &DashaConfig::default()).unwrap();
        assert_eq!(snap.periods.len(), 3);
        assert_eq!(snap.periods[0].lord, DashaLord::Graha(Graha::Chandra));
        assert!(dasha_snapshot_with_moon(45.0, jd, f64::NAN, &DashaConfig::default()).is_err());
    }

    #[test]
    fn bad_depth_is_invalid_input() {
        let cfg = DashaConfig {
            depth: 0,
            ..DashaConfig::default()
        };
        assert!(matches!(
            dasha_with_moon(45.0, 2_447_906.6, &cfg),
            Err(SearchError::InvalidInput(_))
        ));
    }
}
