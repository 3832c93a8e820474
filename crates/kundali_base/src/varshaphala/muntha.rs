//! Muntha: the progressed natal ascendant, one sign per completed year.

use serde::Serialize;

use crate::chart::Chart;
use crate::graha::{Graha, rashi_lord};
use crate::house::house_from;
use crate::rashi::Rashi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Muntha {
    pub rashi: Rashi,
    /// 1-based sign number.
    pub sign: u8,
    /// House in the annual chart.
    pub house: u8,
    pub lord: Graha,
    /// House of the Muntha lord in the annual chart.
    pub lord_house: u8,
    /// Muntha house is one of 1, 2, 4, 5, 9, 10, 11.
    pub favorable: bool,
}

/// Annual-chart houses in which the Muntha is favorable.
pub const FAVORABLE_MUNTHA_HOUSES: [u8; 7] = [1, 2, 4, 5, 9, 10, 11];

pub const fn is_favorable_muntha_house(house: u8) -> bool {
    matches!(house, 1 | 2 | 4 | 5 | 9 | 10 | 11)
}

/// Muntha sign: `(natal_asc_sign - 1 + completed_years) mod 12 + 1`.
pub fn muntha_rashi(natal_ascendant: Rashi, completed_years: u32) -> Rashi {
    natal_ascendant.offset((completed_years % 12) as u8)
}

/// Muntha placed in an annual chart.
pub fn muntha(natal_ascendant: Rashi, completed_years: u32, annual: &Chart) -> Muntha {
    let rashi = muntha_rashi(natal_ascendant, completed_years);
    let lord = rashi_lord(rashi);
    let house = house_from(annual.ascendant(), rashi);
    Muntha {
        rashi,
        sign: rashi.number(),
        house,
        lord,
        lord_house: annual.house_of(lord),
        favorable: is_favorable_muntha_house(house),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::SiderealPositions;

    #[test]
    fn rotates_one_sign_per_year() {
        assert_eq!(muntha_rashi(Rashi::Kumbha, 0), Rashi::Kumbha);
        assert_eq!(muntha_rashi(Rashi::Kumbha, 1), Rashi::Meena);
        assert_eq!(muntha_rashi(Rashi::Kumbha, 2), Rashi::Mesha);
        assert_eq!(muntha_rashi(Rashi::Kumbha, 12), Rashi::Kumbha);
        assert_eq!(muntha_rashi(Rashi::Mesha, 35), Rashi::Meena);
    }

    #[test]
    fn house_and_lord_in_annual_chart() {
        let annual = Chart::varshaphala(&SiderealPositions::new(
            [271.4, 100.0, 20.0, 250.0, 70.0, 300.0, 200.0, 30.0, 210.0],
            95.0,
        ))
        .unwrap();
        // Natal Kumbha + 3 years = Vrishabha; 11th from annual Karka lagna
        let m = muntha(Rashi::Kumbha, 3, &annual);
        assert_eq!(m.rashi, Rashi::Vrishabha);
        assert_eq!(m.sign, 2);
        assert_eq!(m.house, 11);
        assert_eq!(m.lord, Graha::Shukra);
        // Venus at 300 is Kumbha, 8th from Karka
        assert_eq!(m.lord_house, 8);
        assert!(m.favorable);

        // Natal Kumbha + 9 years = Vrischika, 5th from Karka
        let m = muntha(Rashi::Kumbha, 9, &annual);
        assert_eq!(m.house, 5);
        assert!(m.favorable);
        // Natal Kumbha + 5 years = Karka, the annual lagna itself
        let m = muntha(Rashi::Kumbha, 5, &annual);
        assert_eq!(m.house, 1);
        assert!(m.favorable);
        // Natal Kumbha + 11 years = Makara, 7th from Karka
        let m = muntha(Rashi::Kumbha, 11, &annual);
        assert_eq!(m.house, 7);
        assert!(!m.favorable);
    }

    #[test]
    fn favorable_houses() {
        for h in 1..=12u8 {
            assert_eq!(
                is_favorable_muntha_house(h),
                FAVORABLE_MUNTHA_HOUSES.contains(&h),
                "house {h}"
            );
        }
        assert!(is_favorable_muntha_house(10));
        assert!(!is_favorable_muntha_house(8));
    }
}
