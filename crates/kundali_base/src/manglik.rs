//! Manglik (Kuja) dosha check.
//!
//! Mars in the 1st, 4th, 7th, 8th or 12th house from the lagna. The dosha is
//! cancelled when Mars sits in its own or exaltation sign, or when Jupiter
//! aspects Mars by sign.

use serde::Serialize;

use crate::aspect::aspects_sign;
use crate::chart::Chart;
use crate::dignity::Dignity;
use crate::graha::Graha;

/// Houses from the lagna that produce the dosha.
pub const MANGLIK_HOUSES: [u8; 5] = [1, 4, 7, 8, 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ManglikSeverity {
    None,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ManglikCancellation {
    OwnOrExaltedSign,
    JupiterAspect,
}

impl ManglikCancellation {
    pub const fn description(self) -> &'static str {
        match self {
            Self::OwnOrExaltedSign => "Mars in own or exaltation sign",
            Self::JupiterAspect => "Jupiter aspects Mars",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManglikReport {
    pub mars_house: u8,
    /// Mars occupies a dosha house.
    pub is_manglik: bool,
    pub severity: ManglikSeverity,
    pub cancellations: Vec<ManglikCancellation>,
}

impl ManglikReport {
    /// Dosha present and not cancelled.
    pub fn is_effective(&self) -> bool {
        self.is_manglik && self.cancellations.is_empty()
    }
}

/// Evaluate the dosha in a chart.
pub fn manglik(chart: &Chart) -> ManglikReport {
    let mars = chart.graha(Graha::Mangal);
    let mars_house = mars.house;
    let is_manglik = MANGLIK_HOUSES.contains(&mars_house);

    let severity = match (is_manglik, mars_house) {
        (false, _) => ManglikSeverity::None,
        (true, 7 | 8) => ManglikSeverity::High,
        (true, _) => ManglikSeverity::Moderate,
    };

    let mut cancellations = Vec::new();
    if matches!(mars.dignity, Some(Dignity::OwnSign | Dignity::Exalted)) {
        cancellations.push(ManglikCancellation::OwnOrExaltedSign);
    }
    if aspects_sign(Graha::Guru, chart.rashi_of(Graha::Guru), mars.rashi) {
        cancellations.push(ManglikCancellation::JupiterAspect);
    }

    ManglikReport {
        mars_house,
        is_manglik,
        severity,
        cancellations,
    }
}
