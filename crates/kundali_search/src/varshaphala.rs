//! Annual chart orchestration: solar return, relocation, and assembly.

use log::debug;
use serde::Serialize;

use kundali_base::{Graha, VarshaphalaChart, build_varshaphala};

use crate::birth::{BirthData, GeoLocation};
use crate::ephemeris::{Ephemeris, checked_positions};
use crate::error::SearchError;
use crate::kundali_types::VarshaphalaConfig;
use crate::solar_return::solar_return;
use crate::solar_return_types::SolarReturn;

/// An annual reading with the search result that anchors it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualReading {
    pub solar_return: SolarReturn,
    /// Place the annual chart was cast for.
    pub location: GeoLocation,
    pub varshaphala: VarshaphalaChart,
}

/// Annual chart for the year beginning after `completed_years`.
///
/// The natal Sun and ascendant come from the same ephemeris as the annual
/// positions. The chart is cast for `config.relocation` when set, else for
/// the birthplace.
pub fn varshaphala_for_birth<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth: &BirthData,
    completed_years: u32,
    config: &VarshaphalaConfig,
) -> Result<AnnualReading, SearchError> {
    config
        .validate()
        .map_err(|e| SearchError::InvalidInput(e.to_string()))?;

    let birth_jd = birth.jd_ut()?;
    let natal = checked_positions(ephemeris, birth_jd, &birth.location)?;
    let natal_ascendant = kundali_base::rashi_from_longitude(natal.lagna).rashi;

    let sr = solar_return(
        ephemeris,
        birth_jd,
        natal.longitude(Graha::Surya),
        completed_years,
        &birth.location,
        &config.solar_return,
    )?;

    let location = config.relocation.unwrap_or(birth.location);
    let annual = checked_positions(ephemeris, sr.jd_ut, &location)?;
    debug!(
        "varshaphala year {completed_years}: return JD {:.6}, residual {:.3}\", cast at {:.4},{:.4}",
        sr.jd_ut, sr.residual_arcsec, location.latitude, location.longitude
    );

    let varshaphala = build_varshaphala(
        natal_ascendant,
        completed_years,
        sr.jd_ut,
        &annual,
        &config.options(),
    )?;

    Ok(AnnualReading {
        solar_return: sr,
        location,
        varshaphala,
    })
}
