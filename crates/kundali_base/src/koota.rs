//! Ashta-koota (eight-fold) marriage compatibility.
//!
//! Scores two Moon positions (groom and bride) over eight classical
//! categories with maxima 1..=8, totalling 36:
//!
//! | Koota        | Max | Basis                                  |
//! |--------------|-----|----------------------------------------|
//! | Varna        | 1   | sign element caste, directional        |
//! | Vashya       | 2   | sign animal group, directional         |
//! | Tara         | 3   | nakshatra count mod 9, both directions |
//! | Yoni         | 4   | nakshatra animal                       |
//! | Graha Maitri | 5   | friendship of the sign lords           |
//! | Gana         | 6   | nakshatra temperament, directional     |
//! | Bhakoot      | 7   | sign distance                          |
//! | Nadi         | 8   | nakshatra nadi                         |

use serde::Serialize;

use crate::dignity::{Relationship, naisargika_maitri};
use crate::error::VedicError;
use crate::graha::{Graha, rashi_lord};
use crate::nakshatra::Nakshatra;
use crate::position::normalize_position;
use crate::rashi::Rashi;

/// Maximum total score.
pub const MAX_KOOTA_SCORE: f64 = 36.0;

/// The eight categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Koota {
    Varna,
    Vashya,
    Tara,
    Yoni,
    GrahaMaitri,
    Gana,
    Bhakoot,
    Nadi,
}

impl Koota {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Varna => "Varna",
            Self::Vashya => "Vashya",
            Self::Tara => "Tara",
            Self::Yoni => "Yoni",
            Self::GrahaMaitri => "Graha Maitri",
            Self::Gana => "Gana",
            Self::Bhakoot => "Bhakoot",
            Self::Nadi => "Nadi",
        }
    }

    pub const fn max_points(self) -> f64 {
        match self {
            Self::Varna => 1.0,
            Self::Vashya => 2.0,
            Self::Tara => 3.0,
            Self::Yoni => 4.0,
            Self::GrahaMaitri => 5.0,
            Self::Gana => 6.0,
            Self::Bhakoot => 7.0,
            Self::Nadi => 8.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Classification tables
// ---------------------------------------------------------------------------

/// Varna rank by sign: water 3 (Brahmin), fire 2 (Kshatriya),
/// earth 1 (Vaishya), air 0 (Shudra).
const fn varna_rank(rashi: Rashi) -> u8 {
    match rashi.index() % 4 {
        0 => 2,
        1 => 1,
        2 => 0,
        _ => 3,
    }
}

/// Vashya animal group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VashyaGroup {
    Chatushpada,
    Manava,
    Jalachara,
    Vanachara,
    Keeta,
}

/// Vashya group of a Moon position; Dhanu and Makara split at 15 degrees.
pub fn vashya_group(rashi: Rashi, degrees_in_sign: f64) -> VashyaGroup {
    use VashyaGroup::*;
    let first_half = degrees_in_sign < 15.0;
    match rashi {
        Rashi::Mesha | Rashi::Vrishabha => Chatushpada,
        Rashi::Mithuna | Rashi::Kanya | Rashi::Tula | Rashi::Kumbha => Manava,
        Rashi::Karka | Rashi::Meena => Jalachara,
        Rashi::Simha => Vanachara,
        Rashi::Vrischika => Keeta,
        Rashi::Dhanu if first_half => Manava,
        Rashi::Dhanu => Chatushpada,
        Rashi::Makara if first_half => Chatushpada,
        Rashi::Makara => Jalachara,
    }
}

/// `VASHYA_SCORES[groom][bride]` in [`VashyaGroup`] order.
const VASHYA_SCORES: [[f64; 5]; 5] = [
    [2.0, 1.0, 1.0, 0.5, 1.0],
    [1.0, 2.0, 0.5, 0.0, 1.0],
    [1.0, 0.5, 2.0, 1.0, 1.0],
    [0.0, 0.0, 0.0, 2.0, 0.0],
    [1.0, 1.0, 1.0, 0.0, 2.0],
];

/// Yoni animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Yoni {
    Horse,
    Elephant,
    Sheep,
    Serpent,
    Dog,
    Cat,
    Rat,
    Cow,
    Buffalo,
    Tiger,
    Deer,
    Monkey,
    Mongoose,
    Lion,
}

const NAKSHATRA_YONI: [Yoni; 27] = {
    use Yoni::*;
    [
        Horse, Elephant, Sheep, Serpent, Serpent, Dog, Cat, Sheep, Cat, Rat, Rat, Cow, Buffalo,
        Tiger, Buffalo, Tiger, Deer, Deer, Dog, Monkey, Mongoose, Monkey, Lion, Horse, Lion, Cow,
        Elephant,
    ]
};

/// `YONI_SCORES[groom][bride]` in [`Yoni`] order.
const YONI_SCORES: [[u8; 14]; 14] = [
    [4, 2, 2, 3, 2, 2, 2, 1, 0, 1, 3, 3, 2, 1],
    [2, 4, 3, 3, 2, 2, 2, 2, 3, 1, 2, 3, 2, 0],
    [2, 3, 4, 2, 1, 2, 1, 3, 3, 1, 2, 0, 3, 1],
    [3, 3, 2, 4, 2, 1, 1, 1, 1, 2, 2, 2, 0, 2],
    [2, 2, 1, 2, 4, 2, 1, 2, 2, 1, 0, 2, 1, 1],
    [2, 2, 2, 1, 2, 4, 0, 2, 2, 1, 3, 3, 2, 1],
    [2, 2, 1, 1, 1, 0, 4, 2, 2, 2, 2, 2, 1, 2],
    [1, 2, 3, 1, 2, 2, 2, 4, 3, 0, 3, 2, 2, 1],
    [0, 3, 3, 1, 2, 2, 2, 3, 4, 1, 2, 2, 2, 1],
    [1, 1, 1, 2, 1, 1, 2, 0, 1, 4, 1, 1, 2, 1],
    [3, 2, 2, 2, 0, 3, 2, 3, 2, 1, 4, 2, 2, 1],
    [3, 3, 0, 2, 2, 3, 2, 2, 2, 1, 2, 4, 3, 2],
    [2, 2, 3, 0, 1, 2, 1, 2, 2, 2, 2, 3, 4, 2],
    [1, 0, 1, 2, 1, 1, 2, 1, 1, 1, 1, 2, 2, 4],
];

pub const fn yoni_of(nakshatra: Nakshatra) -> Yoni {
    NAKSHATRA_YONI[nakshatra.index() as usize]
}

/// Gana (temperament).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gana {
    Deva,
    Manushya,
    Rakshasa,
}

pub const fn gana_of(nakshatra: Nakshatra) -> Gana {
    match nakshatra.number() {
        1 | 5 | 7 | 8 | 13 | 15 | 17 | 22 | 27 => Gana::Deva,
        2 | 4 | 6 | 11 | 12 | 20 | 21 | 25 | 26 => Gana::Manushya,
        _ => Gana::Rakshasa,
    }
}

/// `GANA_SCORES[groom][bride]` in [`Gana`] order.
const GANA_SCORES: [[f64; 3]; 3] = [[6.0, 6.0, 1.0], [5.0, 6.0, 0.0], [1.0, 0.0, 6.0]];

/// Nadi (constitution); nakshatras zigzag Aadi, Madhya, Antya, Antya, Madhya, Aadi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Nadi {
    Aadi,
    Madhya,
    Antya,
}

pub const fn nadi_of(nakshatra: Nakshatra) -> Nadi {
    match nakshatra.index() % 6 {
        0 | 5 => Nadi::Aadi,
        1 | 4 => Nadi::Madhya,
        _ => Nadi::Antya,
    }
}

// ---------------------------------------------------------------------------
// Individual kootas
// ---------------------------------------------------------------------------

/// Moon placement used by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonProfile {
    pub longitude: f64,
    pub rashi: Rashi,
    pub degrees_in_sign: f64,
    pub nakshatra: Nakshatra,
    pub pada: u8,
}

impl MoonProfile {
    pub fn from_longitude(moon_sidereal_lon: f64) -> Result<Self, VedicError> {
        if !moon_sidereal_lon.is_finite() {
            return Err(VedicError::InvalidInput("moon longitude is not finite"));
        }
        let p = normalize_position(moon_sidereal_lon);
        Ok(Self {
            longitude: p.longitude,
            rashi: p.rashi,
            degrees_in_sign: p.degrees_in_sign,
            nakshatra: p.nakshatra,
            pada: p.pada,
        })
    }

    pub fn sign_lord(&self) -> Graha {
        rashi_lord(self.rashi)
    }
}

pub fn varna_points(groom: &MoonProfile, bride: &MoonProfile) -> f64 {
    if varna_rank(groom.rashi) >= varna_rank(bride.rashi) {
        1.0
    } else {
        0.0
    }
}

/// Both Moons in one sign always share the vashya.
pub fn vashya_points(groom: &MoonProfile, bride: &MoonProfile) -> f64 {
    if groom.rashi == bride.rashi {
        return 2.0;
    }
    let g = vashya_group(groom.rashi, groom.degrees_in_sign);
    let b = vashya_group(bride.rashi, bride.degrees_in_sign);
    VASHYA_SCORES[g as usize][b as usize]
}

/// Counted inclusively from `from` to `to`; remainders 3 (Vipat), 5 (Pratyak)
/// and 7 (Naidhana) are inauspicious.
fn tara_auspicious(from: Nakshatra, to: Nakshatra) -> bool {
    let count = (to.index() as i16 - from.index() as i16).rem_euclid(27) + 1;
    !matches!(count % 9, 3 | 5 | 7)
}

pub fn tara_points(groom: &MoonProfile, bride: &MoonProfile) -> f64 {
    let mut points = 0.0;
    if tara_auspicious(bride.nakshatra, groom.nakshatra) {
        points += 1.5;
    }
    if tara_auspicious(groom.nakshatra, bride.nakshatra) {
        points += 1.5;
    }
    points
}

pub fn yoni_points(groom: &MoonProfile, bride: &MoonProfile) -> f64 {
    let g = yoni_of(groom.nakshatra) as usize;
    let b = yoni_of(bride.nakshatra) as usize;
    YONI_SCORES[g][b] as f64
}

pub fn graha_maitri_points(groom: &MoonProfile, bride: &MoonProfile) -> f64 {
    use Relationship::*;
    let (g, b) = (groom.sign_lord(), bride.sign_lord());
    if g == b {
        return 5.0;
    }
    match (naisargika_maitri(g, b), naisargika_maitri(b, g)) {
        (Friend, Friend) => 5.0,
        (Friend, Neutral) | (Neutral, Friend) => 4.0,
        (Neutral, Neutral) => 3.0,
        (Friend, Enemy) | (Enemy, Friend) => 1.0,
        (Neutral, Enemy) | (Enemy, Neutral) => 0.5,
        (Enemy, Enemy) => 0.0,
    }
}

pub fn gana_points(groom: &MoonProfile, bride: &MoonProfile) -> f64 {
    GANA_SCORES[gana_of(groom.nakshatra) as usize][gana_of(bride.nakshatra) as usize]
}

/// Zero for the 2/12, 5/9 and 6/8 sign relationships.
pub fn bhakoot_points(groom: &MoonProfile, bride: &MoonProfile) -> f64 {
    let diff = (bride.rashi.index() as i16 - groom.rashi.index() as i16).rem_euclid(12);
    if matches!(diff, 1 | 11 | 4 | 8 | 5 | 7) {
        0.0
    } else {
        7.0
    }
}

pub fn nadi_points(groom: &MoonProfile, bride: &MoonProfile) -> f64 {
    if nadi_of(groom.nakshatra) == nadi_of(bride.nakshatra) {
        0.0
    } else {
        8.0
    }
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// Verdict label for a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Verdict {
    /// Excellent >= 25, Good >= 18, Average >= 12, otherwise Poor.
    pub fn from_total(total: f64) -> Self {
        if total >= 25.0 {
            Self::Excellent
        } else if total >= 18.0 {
            Self::Good
        } else if total >= 12.0 {
            Self::Average
        } else {
            Self::Poor
        }
    }
}

/// One category score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KootaPoints {
    pub koota: Koota,
    pub points: f64,
    pub max_points: f64,
}

/// Complete compatibility score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KootaScore {
    pub groom: MoonProfile,
    pub bride: MoonProfile,
    /// In [`Koota`] order.
    pub kootas: [KootaPoints; 8],
    /// Sum of the eight categories, [0, 36].
    pub total: f64,
    pub verdict: Verdict,
    /// Same nadi (Nadi scored 0).
    pub nadi_dosha: bool,
    /// Bhakoot scored 0.
    pub bhakoot_dosha: bool,
}

impl KootaScore {
    pub fn points(&self, koota: Koota) -> f64 {
        self.kootas[koota as usize].points
    }

    pub fn percentage(&self) -> f64 {
        self.total / MAX_KOOTA_SCORE * 100.0
    }
}

type KootaFn = fn(&MoonProfile, &MoonProfile) -> f64;

const KOOTA_FNS: [(Koota, KootaFn); 8] = [
    (Koota::Varna, varna_points),
    (Koota::Vashya, vashya_points),
    (Koota::Tara, tara_points),
    (Koota::Yoni, yoni_points),
    (Koota::GrahaMaitri, graha_maitri_points),
    (Koota::Gana, gana_points),
    (Koota::Bhakoot, bhakoot_points),
    (Koota::Nadi, nadi_points),
];

/// Score two Moon longitudes (sidereal degrees).
pub fn ashta_koota(groom_moon_lon: f64, bride_moon_lon: f64) -> Result<KootaScore, VedicError> {
    let groom = MoonProfile::from_longitude(groom_moon_lon)?;
    let bride = MoonProfile::from_longitude(bride_moon_lon)?;
    Ok(score_profiles(groom, bride))
}

/// Score two prepared Moon profiles.
pub fn score_profiles(groom: MoonProfile, bride: MoonProfile) -> KootaScore {
    let kootas = KOOTA_FNS.map(|(koota, f)| KootaPoints {
        koota,
        points: f(&groom, &bride),
        max_points: koota.max_points(),
    });
    let total: f64 = kootas.iter().map(|k| k.points).sum();
    KootaScore {
        groom,
        bride,
        kootas,
        total,
        verdict: Verdict::from_total(total),
        nadi_dosha: kootas[Koota::Nadi as usize].points == 0.0,
        bhakoot_dosha: kootas[Koota::Bhakoot as usize].points == 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nakshatra::{ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27};

    fn profile(lon: f64) -> MoonProfile {
        MoonProfile::from_longitude(lon).unwrap()
    }

    #[test]
    fn yoni_matrix_symmetric_with_full_diagonal() {
        for i in 0..14 {
            assert_eq!(YONI_SCORES[i][i], 4);
            for j in 0..14 {
                assert_eq!(YONI_SCORES[i][j], YONI_SCORES[j][i], "{i},{j}");
            }
        }
    }

    #[test]
    fn each_gana_and_nadi_has_nine_nakshatras() {
        for gana in [Gana::Deva, Gana::Manushya, Gana::Rakshasa] {
            let n = ALL_NAKSHATRAS_27.iter().filter(|&&k| gana_of(k) == gana).count();
            assert_eq!(n, 9, "{gana:?}");
        }
        for nadi in [Nadi::Aadi, Nadi::Madhya, Nadi::Antya] {
            let n = ALL_NAKSHATRAS_27.iter().filter(|&&k| nadi_of(k) == nadi).count();
            assert_eq!(n, 9, "{nadi:?}");
        }
    }

    #[test]
    fn nadi_zigzag() {
        assert_eq!(nadi_of(Nakshatra::Ashwini), Nadi::Aadi);
        assert_eq!(nadi_of(Nakshatra::Ardra), Nadi::Aadi);
        assert_eq!(nadi_of(Nakshatra::Krittika), Nadi::Antya);
        assert_eq!(nadi_of(Nakshatra::Rohini), Nadi::Antya);
        assert_eq!(nadi_of(Nakshatra::Revati), Nadi::Antya);
    }

    #[test]
    fn same_nakshatra_same_sign_scores_28() {
        for nak in 0..27 {
            let lon = nak as f64 * NAKSHATRA_SPAN_27 + 0.5;
            let s = ashta_koota(lon, lon + 0.1).unwrap();
            assert_eq!(s.total, 28.0, "nakshatra {nak}");
            assert_eq!(s.points(Koota::Nadi), 0.0);
            assert!(s.nadi_dosha);
        }
    }

    #[test]
    fn total_within_bounds() {
        let mut g = 0.0;
        while g < 360.0 {
            let mut b = 3.0;
            while b < 360.0 {
                let s = ashta_koota(g, b).unwrap();
                assert!((0.0..=MAX_KOOTA_SCORE).contains(&s.total));
                for k in &s.kootas {
                    assert!(k.points >= 0.0 && k.points <= k.max_points);
                }
                b += 11.3;
            }
            g += 7.9;
        }
    }

    #[test]
    fn bhakoot_six_eight() {
        // Mesha and Vrischika are 6/8
        assert_eq!(bhakoot_points(&profile(10.0), &profile(215.0)), 0.0);
        // Mesha and Tula are 7/7
        assert_eq!(bhakoot_points(&profile(10.0), &profile(185.0)), 7.0);
    }

    #[test]
    fn varna_is_directional() {
        // Karka (water, 3) vs Mithuna (air, 0)
        assert_eq!(varna_points(&profile(95.0), &profile(65.0)), 1.0);
        assert_eq!(varna_points(&profile(65.0), &profile(95.0)), 0.0);
    }

    #[test]
    fn vashya_half_sign_split() {
        assert_eq!(vashya_group(Rashi::Dhanu, 10.0), VashyaGroup::Manava);
        assert_eq!(vashya_group(Rashi::Dhanu, 20.0), VashyaGroup::Chatushpada);
        assert_eq!(vashya_group(Rashi::Makara, 20.0), VashyaGroup::Jalachara);
        // Simha groom over Mesha bride: Vanachara vs Chatushpada
        assert_eq!(vashya_points(&profile(125.0), &profile(5.0)), 0.0);
    }

    #[test]
    fn tara_vipat_direction() {
        // Ashwini -> Krittika counts 3 (Vipat) one way, 26 % 9 = 8 the other.
        let ashwini = profile(1.0);
        let krittika = profile(2.0 * NAKSHATRA_SPAN_27 + 1.0);
        assert_eq!(tara_points(&krittika, &ashwini), 1.5);
    }

    #[test]
    fn graha_maitri_mutual() {
        // Simha (Sun) and Mesha (Mars): mutual friends
        assert_eq!(graha_maitri_points(&profile(125.0), &profile(5.0)), 5.0);
        // Simha (Sun) and Tula (Venus): mutual enemies
        assert_eq!(graha_maitri_points(&profile(125.0), &profile(185.0)), 0.0);
        // Karka (Moon) and Mithuna (Mercury): friend one way, enemy back
        assert_eq!(graha_maitri_points(&profile(95.0), &profile(65.0)), 1.0);
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(Verdict::from_total(25.0), Verdict::Excellent);
        assert_eq!(Verdict::from_total(24.5), Verdict::Good);
        assert_eq!(Verdict::from_total(12.0), Verdict::Average);
        assert_eq!(Verdict::from_total(11.5), Verdict::Poor);
    }

    #[test]
    fn rejects_non_finite() {
        assert!(ashta_koota(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn yoni_table_is_symmetric_with_full_diagonal() {
        for i in 0..14 {
            assert_eq!(YONI_SCORES[i][i], 4);
            for j in 0..14 {
                assert_eq!(YONI_SCORES[i][j], YONI_SCORES[j][i], "yoni {i} vs {j}");
            }
        }
    }
}
