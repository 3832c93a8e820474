//! Varshaphala (annual chart) assembly.
//!
//! The solar-return instant itself is found by an ephemeris search outside
//! this crate. Given the positions at that instant, this module builds the
//! annual chart and everything read from it: Muntha, Mudda dasha, sahams,
//! and Tajika yogas.

pub mod muntha;
pub mod saham;
pub mod tajika;

pub use muntha::{
    FAVORABLE_MUNTHA_HOUSES, Muntha, is_favorable_muntha_house, muntha, muntha_rashi,
};
pub use saham::{
    DEFAULT_SAHAMS, Saham, SahamFormula, SahamPoint, is_night_chart, saham, sahams,
};
pub use tajika::{
    ALL_TAJIKA_ASPECTS, TajikaAspect, TajikaAspectKind, TajikaOrbs, TajikaStrength, TajikaYoga,
    TajikaYogaKind, tajika_aspect, tajika_aspects, tajika_yogas,
};

use serde::Serialize;

use crate::chart::Chart;
use crate::dasha::{DashaOptions, DashaTree, mudda_dasha};
use crate::error::VedicError;
use crate::graha::Graha;
use crate::position::SiderealPositions;
use crate::rashi::Rashi;

/// Options for annual chart assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarshaphalaOptions {
    /// Mudda dasha depth, 1..=5.
    pub mudda_depth: u8,
    pub orbs: TajikaOrbs,
    pub sahams: &'static [SahamFormula],
    /// Apply the +30 degree saham correction.
    pub saham_correction: bool,
}

impl Default for VarshaphalaOptions {
    fn default() -> Self {
        Self {
            mudda_depth: DashaOptions::mudda().depth,
            orbs: TajikaOrbs::default(),
            sahams: DEFAULT_SAHAMS,
            saham_correction: true,
        }
    }
}

/// One year's annual chart and its derived readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarshaphalaChart {
    /// Completed years of life at this return.
    pub completed_years: u32,
    /// Solar-return instant, JD UT.
    pub return_jd: f64,
    pub chart: Chart,
    pub muntha: Muntha,
    pub mudda: DashaTree,
    pub sahams: Vec<Saham>,
    pub tajika_yogas: Vec<TajikaYoga>,
}

impl VarshaphalaChart {
    /// Lord of the annual ascendant.
    pub fn annual_lagna_lord(&self) -> Graha {
        self.chart.house_lord(1)
    }
}

/// Assemble the annual chart from positions at the solar-return instant.
pub fn build_varshaphala(
    natal_ascendant: Rashi,
    completed_years: u32,
    return_jd: f64,
    annual_positions: &SiderealPositions,
    options: &VarshaphalaOptions,
) -> Result<VarshaphalaChart, VedicError> {
    if !return_jd.is_finite() {
        return Err(VedicError::InvalidInput("solar return jd is not finite"));
    }
    let chart = Chart::varshaphala(annual_positions)?;
    let mudda = mudda_dasha(
        chart.graha(Graha::Chandra).longitude,
        return_jd,
        &DashaOptions::mudda().with_depth(options.mudda_depth),
    )?;

    Ok(VarshaphalaChart {
        completed_years,
        return_jd,
        muntha: muntha(natal_ascendant, completed_years, &chart),
        mudda,
        sahams: sahams(&chart, options.sahams, options.saham_correction),
        tajika_yogas: tajika_yogas(&chart, &options.orbs),
        chart,
    })
}
