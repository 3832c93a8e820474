//! Birth-chart orchestration: bridges an ephemeris with the pure chart
//! engine in kundali_base.

use log::debug;

use kundali_base::{Chart, SiderealPositions, ashtakavarga, detect_yogas, manglik};

use crate::birth::{BirthData, GeoLocation};
use crate::dasha::dasha_with_moon;
use crate::ephemeris::{Ephemeris, checked_positions};
use crate::error::SearchError;
use crate::kundali_types::{Kundali, KundaliConfig};

/// Positions and D1 chart for an instant and place.
pub fn chart_at<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jd_ut: f64,
    location: &GeoLocation,
) -> Result<(SiderealPositions, Chart), SearchError> {
    let positions = checked_positions(ephemeris, jd_ut, location)?;
    let chart = Chart::from_positions(&positions)?;
    debug!(
        "chart at JD {jd_ut:.6}: ascendant {:?}",
        chart.ascendant()
    );
    Ok((positions, chart))
}

/// D1 chart for a birth record.
pub fn chart_for_birth<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth: &BirthData,
) -> Result<Chart, SearchError> {
    let jd = birth.jd_ut()?;
    chart_at(ephemeris, jd, &birth.location).map(|(_, chart)| chart)
}

/// Assemble a full reading from already-resolved positions.
pub fn kundali_from_positions(
    positions: &SiderealPositions,
    birth_jd: f64,
    location: &GeoLocation,
    config: &KundaliConfig,
) -> Result<Kundali, SearchError> {
    config
        .validate()
        .map_err(|e| SearchError::InvalidInput(e.to_string()))?;
    let chart = Chart::from_positions(positions)?;

    let vargas = config
        .vargas
        .iter()
        .map(|&n| chart.varga(n))
        .collect::<Result<Vec<_>, _>>()?;

    let dasha = if config.include_dasha {
        let moon = chart.graha(kundali_base::Graha::Chandra).longitude;
        Some(dasha_with_moon(moon, birth_jd, &config.dasha)?)
    } else {
        None
    };
    let ashtakavarga = config.include_ashtakavarga.then(|| ashtakavarga(&chart));
    let yogas = config.include_yogas.then(|| detect_yogas(&chart));
    let manglik = config.include_manglik.then(|| manglik(&chart));
    debug!(
        "kundali assembled: {} vargas, {} yogas",
        vargas.len(),
        yogas.as_ref().map_or(0, Vec::len)
    );

    Ok(Kundali {
        birth_jd,
        location: *location,
        positions: *positions,
        chart,
        vargas,
        dasha,
        ashtakavarga,
        yogas,
        manglik,
    })
}

/// Full reading for a birth record.
pub fn kundali_for_birth<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth: &BirthData,
    config: &KundaliConfig,
) -> Result<Kundali, SearchError> {
    let jd = birth.jd_ut()?;
    let positions = checked_positions(ephemeris, jd, &birth.location)?;
    kundali_from_positions(&positions, jd, &birth.location, config)
}
