//! Ashtakavarga: Bhinna (per-graha) and Sarva (aggregate) benefic points.
//!
//! For each of the 7 sapta grahas, 8 contributors (7 grahas + lagna) give a
//! point to the signs at fixed offsets from themselves. The per-graha totals
//! are chart-independent:
//! Sun 48, Moon 49, Mars 39, Mercury 54, Jupiter 56, Venus 52, Saturn 39,
//! and the SAV always sums to 337.

use serde::Serialize;

use crate::chart::Chart;
use crate::graha::{Graha, SAPTA_GRAHAS};
use crate::house::house_between;
use crate::rashi::Rashi;

/// Bitmask with bit `k` set for every 1-based offset `k` in the list.
const fn bits(offsets: &[u8]) -> u16 {
    let mut mask = 0u16;
    let mut i = 0;
    while i < offsets.len() {
        mask |= 1u16 << offsets[i];
        i += 1;
    }
    mask
}

/// `RULES[target][contributor]`: favourable offsets (1 = same sign).
///
/// Targets and the first 7 contributors follow [`SAPTA_GRAHAS`] order;
/// contributor 7 is the lagna.
const RULES: [[u16; 8]; 7] = [
    // Sun
    [
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 6, 10, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 5, 6, 9, 10, 11, 12]),
        bits(&[5, 6, 9, 11]),
        bits(&[6, 7, 12]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 4, 6, 10, 11, 12]),
    ],
    // Moon
    [
        bits(&[3, 6, 7, 8, 10, 11]),
        bits(&[1, 3, 6, 7, 10, 11]),
        bits(&[2, 3, 5, 6, 9, 10, 11]),
        bits(&[1, 3, 4, 5, 7, 8, 10, 11]),
        bits(&[1, 4, 7, 8, 10, 11, 12]),
        bits(&[3, 4, 5, 7, 9, 10, 11]),
        bits(&[3, 5, 6, 11]),
        bits(&[3, 6, 10, 11]),
    ],
    // Mars
    [
        bits(&[3, 5, 6, 10, 11]),
        bits(&[3, 6, 11]),
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[3, 5, 6, 11]),
        bits(&[6, 10, 11, 12]),
        bits(&[6, 8, 11, 12]),
        bits(&[1, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 3, 6, 10, 11]),
    ],
    // Mercury
    [
        bits(&[5, 6, 9, 11, 12]),
        bits(&[2, 4, 6, 8, 10, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 3, 5, 6, 9, 10, 11, 12]),
        bits(&[6, 8, 11, 12]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 2, 4, 6, 8, 10, 11]),
    ],
    // Jupiter
    [
        bits(&[1, 2, 3, 4, 7, 8, 9, 10, 11]),
        bits(&[2, 5, 7, 9, 11]),
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[1, 2, 4, 5, 6, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 7, 8, 10, 11]),
        bits(&[2, 5, 6, 9, 10, 11]),
        bits(&[3, 5, 6, 12]),
        bits(&[1, 2, 4, 5, 6, 7, 9, 10, 11]),
    ],
    // Venus
    [
        bits(&[8, 11, 12]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11, 12]),
        bits(&[3, 4, 6, 9, 11, 12]),
        bits(&[3, 5, 6, 9, 11]),
        bits(&[5, 8, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 10, 11]),
        bits(&[3, 4, 5, 8, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11]),
    ],
    // Saturn
    [
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[3, 6, 11]),
        bits(&[3, 5, 6, 10, 11, 12]),
        bits(&[6, 8, 9, 10, 11, 12]),
        bits(&[5, 6, 11, 12]),
        bits(&[6, 11, 12]),
        bits(&[3, 5, 6, 11]),
        bits(&[1, 3, 4, 6, 10, 11]),
    ],
];

/// BAV totals per sapta graha, identical for every chart.
pub const BAV_TOTALS: [u8; 7] = [48, 49, 39, 54, 56, 52, 39];

/// SAV total, identical for every chart.
pub const SAV_TOTAL: u16 = 337;

/// Signs of one element (fire, earth, air, water) by 0-based index.
const TRIKONA_GROUPS: [[usize; 3]; 4] = [[0, 4, 8], [1, 5, 9], [2, 6, 10], [3, 7, 11]];

/// Sign pairs sharing a lord: Mars, Venus, Mercury, Jupiter, Saturn.
const EKADHIPATYA_PAIRS: [[usize; 2]; 5] = [[0, 7], [1, 6], [2, 5], [8, 11], [9, 10]];

/// Bhinna ashtakavarga of one graha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bav {
    pub graha: Graha,
    /// Points per sign, 0 = Mesha.
    pub points: [u8; 12],
}

impl Bav {
    pub fn total(&self) -> u8 {
        self.points.iter().sum()
    }

    pub fn points_in(&self, rashi: Rashi) -> u8 {
        self.points[rashi.index() as usize]
    }
}

/// Complete ashtakavarga for one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AshtakavargaTable {
    /// Sign of house 1 the per-house views rotate from.
    pub ascendant: Rashi,
    /// One BAV per sapta graha.
    pub bav: [Bav; 7],
    /// Sum of the seven BAVs per sign.
    pub sav: [u8; 12],
    /// SAV after trikona sodhana.
    pub sav_trikona: [u8; 12],
    /// SAV after trikona then ekadhipatya sodhana.
    pub sav_ekadhipatya: [u8; 12],
}

impl AshtakavargaTable {
    /// BAV of `graha`; `None` for Rahu and Ketu.
    pub fn bav_of(&self, graha: Graha) -> Option<&Bav> {
        self.bav.iter().find(|b| b.graha == graha)
    }

    pub fn sav_total(&self) -> u16 {
        self.sav.iter().map(|&p| p as u16).sum()
    }

    /// SAV rotated so index 0 is house 1.
    pub fn sav_by_house(&self) -> [u8; 12] {
        rotate_to_houses(&self.sav, self.ascendant)
    }

    /// BAV of `graha` rotated so index 0 is house 1.
    pub fn bav_by_house(&self, graha: Graha) -> Option<[u8; 12]> {
        self.bav_of(graha)
            .map(|b| rotate_to_houses(&b.points, self.ascendant))
    }
}

fn rotate_to_houses(by_sign: &[u8; 12], ascendant: Rashi) -> [u8; 12] {
    std::array::from_fn(|h| by_sign[ascendant.offset(h as u8).index() as usize])
}

/// BAV of the sapta graha at `target` (0 = Sun .. 6 = Saturn).
///
/// `graha_signs` are the 0-based signs of Sun..Saturn.
pub fn bav_points(target: usize, graha_signs: &[u8; 7], lagna_sign: u8) -> [u8; 12] {
    let rules = &RULES[target];
    let contributors = graha_signs.iter().copied().chain(std::iter::once(lagna_sign));
    let mut points = [0u8; 12];

    for (mask, from) in rules.iter().zip(contributors) {
        for (sign, slot) in points.iter_mut().enumerate() {
            let offset = house_between(from, sign as u8);
            if (mask >> offset) & 1 == 1 {
                *slot += 1;
            }
        }
    }
    points
}

/// Subtract the minimum of each element triangle from its three signs.
pub fn trikona_sodhana(totals: &[u8; 12]) -> [u8; 12] {
    let mut out = *totals;
    for group in &TRIKONA_GROUPS {
        let min = group.iter().map(|&i| out[i]).min().unwrap_or(0);
        for &i in group {
            out[i] -= min;
        }
    }
    out
}

/// Subtract the smaller value of each same-lord pair from both signs.
pub fn ekadhipatya_sodhana(after_trikona: &[u8; 12]) -> [u8; 12] {
    let mut out = *after_trikona;
    for &[a, b] in &EKADHIPATYA_PAIRS {
        let min = out[a].min(out[b]);
        out[a] -= min;
        out[b] -= min;
    }
    out
}

/// Ashtakavarga from raw sign indices (Sun..Saturn and lagna, 0-based).
pub fn ashtakavarga_from_signs(graha_signs: &[u8; 7], lagna_sign: u8) -> AshtakavargaTable {
    let bav: [Bav; 7] = std::array::from_fn(|i| Bav {
        graha: SAPTA_GRAHAS[i],
        points: bav_points(i, graha_signs, lagna_sign),
    });

    let mut sav = [0u8; 12];
    for b in &bav {
        for (s, p) in sav.iter_mut().zip(b.points) {
            *s += p;
        }
    }
    let sav_trikona = trikona_sodhana(&sav);
    let sav_ekadhipatya = ekadhipatya_sodhana(&sav_trikona);

    AshtakavargaTable {
        ascendant: Rashi::from_index(lagna_sign),
        bav,
        sav,
        sav_trikona,
        sav_ekadhipatya,
    }
}

/// Ashtakavarga of a chart (uses the chart's own sign placements).
pub fn ashtakavarga(chart: &Chart) -> AshtakavargaTable {
    let signs = SAPTA_GRAHAS.map(|g| chart.rashi_of(g).index());
    ashtakavarga_from_signs(&signs, chart.ascendant().index())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_bits_match_totals() {
        for (i, &expected) in BAV_TOTALS.iter().enumerate() {
            let total: u32 = RULES[i].iter().map(|m| m.count_ones()).sum();
            assert_eq!(total as u8, expected, "graha {i}");
        }
    }

    #[test]
    fn totals_hold_for_any_placement() {
        for (signs, lagna) in [([0u8; 7], 0u8), ([3, 7, 0, 11, 5, 9, 2], 1), ([5, 2, 8, 10, 1, 6, 4], 9)] {
            let t = ashtakavarga_from_signs(&signs, lagna);
            for (b, &expected) in t.bav.iter().zip(&BAV_TOTALS) {
                assert_eq!(b.total(), expected, "{:?}", b.graha);
                assert!(b.points.iter().all(|&p| p <= 8));
            }
            assert_eq!(t.sav_total(), SAV_TOTAL);
            assert!(t.sav.iter().all(|&p| p <= 56));
        }
    }

    #[test]
    fn sun_bav_all_in_mesha() {
        // Sun gets points in Mesha from Sun, Mars, Saturn (offset 1)
        let t = ashtakavarga_from_signs(&[0; 7], 0);
        assert_eq!(t.bav[0].points[0], 3);
    }

    #[test]
    fn by_house_rotates_from_ascendant() {
        let t = ashtakavarga_from_signs(&[3, 7, 0, 11, 5, 9, 2], 4);
        let houses = t.sav_by_house();
        assert_eq!(houses[0], t.sav[4]);
        assert_eq!(houses[8], t.sav[0]);
        assert_eq!(houses.iter().map(|&p| p as u16).sum::<u16>(), SAV_TOTAL);
        assert_eq!(t.bav_by_house(Graha::Rahu), None);
    }

    #[test]
    fn trikona_reduces_each_group_min_to_zero() {
        let totals = [28, 25, 30, 20, 32, 22, 35, 18, 25, 27, 40, 15];
        let r = trikona_sodhana(&totals);
        for group in &TRIKONA_GROUPS {
            assert_eq!(group.iter().map(|&i| r[i]).min(), Some(0));
        }
        // Fire: 28, 32, 25 -> 3, 7, 0
        assert_eq!([r[0], r[4], r[8]], [3, 7, 0]);
    }

    #[test]
    fn ekadhipatya_pairs() {
        let mut v = [0u8; 12];
        v[2] = 5;
        v[5] = 3;
        v[8] = 4;
        v[11] = 9;
        let r = ekadhipatya_sodhana(&v);
        assert_eq!((r[2], r[5], r[8], r[11]), (2, 0, 0, 5));
    }

    #[test]
    fn ekadhipatya_reduces_mars_venus_saturn_pairs() {
        let mut v = [0u8; 12];
        v[0] = 5;
        v[7] = 3;
        v[1] = 4;
        v[6] = 2;
        v[9] = 1;
        v[10] = 6;
        let r = ekadhipatya_sodhana(&v);
        assert_eq!((r[0], r[7]), (2, 0));
        assert_eq!((r[1], r[6]), (2, 0));
        assert_eq!((r[9], r[10]), (0, 5));
        // Cancer and Leo have single lords
        v[3] = 7;
        v[4] = 7;
        let r = ekadhipatya_sodhana(&v);
        assert_eq!((r[3], r[4]), (7, 7));
    }
}
