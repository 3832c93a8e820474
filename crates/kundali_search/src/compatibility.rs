//! Compatibility for two births: ashta-koota on the Moons plus the Manglik
//! check on both charts.

use log::debug;
use serde::Serialize;

use kundali_base::{Chart, Graha, KootaScore, ManglikReport, ashta_koota, manglik};

use crate::birth::BirthData;
use crate::error::SearchError;
use crate::ephemeris::Ephemeris;
use crate::kundali::chart_for_birth;

/// Koota score and Manglik status of a couple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compatibility {
    pub koota: KootaScore,
    pub groom_manglik: ManglikReport,
    pub bride_manglik: ManglikReport,
}

impl Compatibility {
    /// Both or neither partner carries an uncancelled dosha.
    pub fn manglik_balanced(&self) -> bool {
        self.groom_manglik.is_effective() == self.bride_manglik.is_effective()
    }
}

/// Score two D1 charts.
pub fn compatibility_from_charts(
    groom: &Chart,
    bride: &Chart,
) -> Result<Compatibility, SearchError> {
    let koota = ashta_koota(
        groom.graha(Graha::Chandra).longitude,
        bride.graha(Graha::Chandra).longitude,
    )?;
    debug!("ashta koota {:.1}/36 ({:?})", koota.total, koota.verdict);
    Ok(Compatibility {
        koota,
        groom_manglik: manglik(groom),
        bride_manglik: manglik(bride),
    })
}

/// Score two birth records through one ephemeris.
pub fn compatibility_for_births<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    groom: &BirthData,
    bride: &BirthData,
) -> Result<Compatibility, SearchError> {
    let groom_chart = chart_for_birth(ephemeris, groom)?;
    let bride_chart = chart_for_birth(ephemeris, bride)?;
    compatibility_from_charts(&groom_chart, &bride_chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kundali_base::SiderealPositions;

    fn chart(moon: f64, mars: f64, lagna: f64) -> Chart {
        let lons = [100.0, moon, mars, 110.0, 160.0, 140.0, 170.0, 10.0, 190.0];
        Chart::from_positions(&SiderealPositions::new(lons, lagna)).unwrap()
    }

    #[test]
    fn same_moon_scores_reference_total() {
        let c = compatibility_from_charts(&chart(45.0, 300.0, 5.0), &chart(46.0, 300.0, 5.0))
            .unwrap();
        assert_eq!(c.koota.total, 28.0);
    }

    #[test]
    fn manglik_balance() {
        // Lagna Mesha, Jupiter Kanya: Mars in Tula is the 7th and unaspected,
        // Mars in Makara is the 10th
        let manglik_chart = chart(45.0, 185.0, 5.0);
        let clear_chart = chart(205.0, 275.0, 5.0);
        let c = compatibility_from_charts(&manglik_chart, &clear_chart).unwrap();
        assert!(c.groom_manglik.is_effective());
        assert!(!c.bride_manglik.is_manglik);
        assert!(!c.manglik_balanced());
        let c = compatibility_from_charts(&manglik_chart, &manglik_chart).unwrap();
        assert!(c.manglik_balanced());
    }
}
