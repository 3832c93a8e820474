//! Const lord sequences and period weights for the supported dasha systems.
//!
//! Each scheme defines a lord cycle, the weight (in years) of each lord, a
//! mapping from the 27 nakshatras to the starting lord, and the length of one
//! full cycle in days. Sub-period proportions always use the weights; the
//! cycle length sets the absolute scale.

use crate::graha::Graha;

use super::types::{DAYS_PER_YEAR, DashaLord, DashaSystem, Yogini};

/// Configuration of a proportional nakshatra-seeded dasha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashaScheme {
    pub system: DashaSystem,
    /// Lords in dasha order.
    pub lords: &'static [DashaLord],
    /// Weight of each lord, in years of the nominal cycle.
    pub years: &'static [f64],
    /// Nakshatra (0..27) to index into `lords`.
    pub nakshatra_map: &'static [u8; 27],
    /// Length of one full cycle in days.
    pub cycle_days: f64,
}

impl DashaScheme {
    /// Sum of all lord weights.
    pub fn total_years(&self) -> f64 {
        self.years.iter().sum()
    }

    /// Full period of the lord at `pos` in days.
    pub fn period_days(&self, pos: usize) -> f64 {
        self.years[pos % self.years.len()] / self.total_years() * self.cycle_days
    }

    /// Starting position for a Moon in nakshatra `nakshatra_index`.
    pub fn starting_position(&self, nakshatra_index: u8) -> usize {
        self.nakshatra_map[nakshatra_index.min(26) as usize] as usize
    }

    /// Position of `lord` in the cycle.
    pub fn position_of(&self, lord: DashaLord) -> Option<usize> {
        self.lords.iter().position(|&l| l == lord)
    }
}

// ---------------------------------------------------------------------------
// Vimshottari (120 years, 9 grahas)
// ---------------------------------------------------------------------------

/// Vimshottari sequence: Ketu, Shukra, Surya, Chandra, Mangal, Rahu, Guru, Shani, Buddh.
const VIMSHOTTARI_LORDS: [DashaLord; 9] = [
    DashaLord::Graha(Graha::Ketu),
    DashaLord::Graha(Graha::Shukra),
    DashaLord::Graha(Graha::Surya),
    DashaLord::Graha(Graha::Chandra),
    DashaLord::Graha(Graha::Mangal),
    DashaLord::Graha(Graha::Rahu),
    DashaLord::Graha(Graha::Guru),
    DashaLord::Graha(Graha::Shani),
    DashaLord::Graha(Graha::Buddh),
];

/// Vimshottari periods in years.
pub const VIMSHOTTARI_YEARS: [f64; 9] = [7.0, 20.0, 6.0, 10.0, 7.0, 18.0, 16.0, 19.0, 17.0];

/// Every 9th nakshatra shares a lord.
const VIMSHOTTARI_NAK_MAP: [u8; 27] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, // Ashwini..Ashlesha
    0, 1, 2, 3, 4, 5, 6, 7, 8, // Magha..Jyeshtha
    0, 1, 2, 3, 4, 5, 6, 7, 8, // Mula..Revati
];

/// Vimshottari dasha.
pub const VIMSHOTTARI: DashaScheme = DashaScheme {
    system: DashaSystem::Vimshottari,
    lords: &VIMSHOTTARI_LORDS,
    years: &VIMSHOTTARI_YEARS,
    nakshatra_map: &VIMSHOTTARI_NAK_MAP,
    cycle_days: 120.0 * DAYS_PER_YEAR,
};

/// Mudda dasha: Vimshottari weights over one solar year.
pub const MUDDA: DashaScheme = DashaScheme {
    system: DashaSystem::Mudda,
    lords: &VIMSHOTTARI_LORDS,
    years: &VIMSHOTTARI_YEARS,
    nakshatra_map: &VIMSHOTTARI_NAK_MAP,
    cycle_days: DAYS_PER_YEAR,
};

// ---------------------------------------------------------------------------
// Yogini (36 years, 8 yoginis)
// ---------------------------------------------------------------------------

const YOGINI_LORDS: [DashaLord; 8] = [
    DashaLord::Yogini(Yogini::Mangala),
    DashaLord::Yogini(Yogini::Pingala),
    DashaLord::Yogini(Yogini::Dhanya),
    DashaLord::Yogini(Yogini::Bhramari),
    DashaLord::Yogini(Yogini::Bhadrika),
    DashaLord::Yogini(Yogini::Ulka),
    DashaLord::Yogini(Yogini::Siddha),
    DashaLord::Yogini(Yogini::Sankata),
];

const YOGINI_YEARS: [f64; 8] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

/// `yogini = (nakshatra_number + 3) mod 8`, with 0 meaning the 8th yogini.
const YOGINI_NAK_MAP: [u8; 27] = [
    3, 4, 5, 6, 7, 0, 1, 2, // Ashwini..Pushya
    3, 4, 5, 6, 7, 0, 1, 2, // Ashlesha..Vishakha
    3, 4, 5, 6, 7, 0, 1, 2, // Anuradha..Shravana
    3, 4, 5, // Dhanishta..Revati
];

/// Yogini dasha.
pub const YOGINI: DashaScheme = DashaScheme {
    system: DashaSystem::Yogini,
    lords: &YOGINI_LORDS,
    years: &YOGINI_YEARS,
    nakshatra_map: &YOGINI_NAK_MAP,
    cycle_days: 36.0 * DAYS_PER_YEAR,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nakshatra::{NAKSHATRA_LORDS, Nakshatra};

    #[test]
    fn vimshottari_total_120() {
        assert!((VIMSHOTTARI.total_years() - 120.0).abs() < 1e-12);
        assert!((VIMSHOTTARI.period_days(1) - 20.0 * DAYS_PER_YEAR).abs() < 1e-9);
    }

    #[test]
    fn vimshottari_map_matches_nakshatra_lords() {
        for i in 0..27u8 {
            let pos = VIMSHOTTARI.starting_position(i);
            assert_eq!(
                VIMSHOTTARI.lords[pos],
                DashaLord::Graha(NAKSHATRA_LORDS[i as usize % 9])
            );
        }
    }

    #[test]
    fn mudda_cycle_is_one_year() {
        let sum: f64 = (0..9).map(|p| MUDDA.period_days(p)).sum();
        assert!((sum - DAYS_PER_YEAR).abs() < 1e-9);
    }

    #[test]
    fn yogini_mapping_formula() {
        for i in 0..27u8 {
            let rem = (i as usize + 1 + 3) % 8;
            let expected = if rem == 0 { 7 } else { rem - 1 };
            assert_eq!(YOGINI.starting_position(i), expected, "nakshatra {i}");
        }
        // Ardra begins with Mangala.
        let ardra = Nakshatra::Ardra.index();
        assert_eq!(
            YOGINI.lords[YOGINI.starting_position(ardra)],
            DashaLord::Yogini(Yogini::Mangala)
        );
    }

    #[test]
    fn yogini_total_36() {
        assert!((YOGINI.total_years() - 36.0).abs() < 1e-12);
    }
}
