//! Dignity classification and the fixed graha relationship tables.
//!
//! Provides exaltation/debilitation signs, own signs, the four-way sign
//! dignity, natural (naisargika) friendship, natural benefic/malefic
//! classification, and combustion orbs.

use serde::Serialize;

use crate::graha::{Graha, rashi_lord};
use crate::rashi::Rashi;
use crate::util::angular_distance;

// ---------------------------------------------------------------------------
// Exaltation, debilitation, own signs
// ---------------------------------------------------------------------------

/// Exaltation sign per sapta graha; `None` for Rahu/Ketu.
pub const fn exaltation_sign(graha: Graha) -> Option<Rashi> {
    match graha {
        Graha::Surya => Some(Rashi::Mesha),
        Graha::Chandra => Some(Rashi::Vrishabha),
        Graha::Mangal => Some(Rashi::Makara),
        Graha::Buddh => Some(Rashi::Kanya),
        Graha::Guru => Some(Rashi::Karka),
        Graha::Shukra => Some(Rashi::Meena),
        Graha::Shani => Some(Rashi::Tula),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Deep-exaltation point (sidereal degrees) per sapta graha.
///
/// Sun 10 Ari, Moon 3 Tau, Mars 28 Cap, Mercury 15 Vir, Jupiter 5 Can,
/// Venus 27 Pis, Saturn 20 Lib.
pub const fn exaltation_degree(graha: Graha) -> Option<f64> {
    match graha {
        Graha::Surya => Some(10.0),
        Graha::Chandra => Some(33.0),
        Graha::Mangal => Some(298.0),
        Graha::Buddh => Some(165.0),
        Graha::Guru => Some(95.0),
        Graha::Shukra => Some(357.0),
        Graha::Shani => Some(200.0),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Debilitation sign: always the sign opposite exaltation.
pub const fn debilitation_sign(graha: Graha) -> Option<Rashi> {
    match exaltation_sign(graha) {
        Some(r) => Some(r.offset(6)),
        None => None,
    }
}

/// Own signs per graha (one or two); empty for Rahu/Ketu.
pub const fn own_signs(graha: Graha) -> &'static [Rashi] {
    match graha {
        Graha::Surya => &[Rashi::Simha],
        Graha::Chandra => &[Rashi::Karka],
        Graha::Mangal => &[Rashi::Mesha, Rashi::Vrischika],
        Graha::Buddh => &[Rashi::Mithuna, Rashi::Kanya],
        Graha::Guru => &[Rashi::Dhanu, Rashi::Meena],
        Graha::Shukra => &[Rashi::Vrishabha, Rashi::Tula],
        Graha::Shani => &[Rashi::Makara, Rashi::Kumbha],
        Graha::Rahu | Graha::Ketu => &[],
    }
}

// ---------------------------------------------------------------------------
// Sign dignity
// ---------------------------------------------------------------------------

/// Dignity of a graha by sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dignity {
    Exalted,
    Debilitated,
    OwnSign,
    Neutral,
}

impl Dignity {
    /// Exalted or own sign.
    pub const fn is_strong(self) -> bool {
        matches!(self, Self::Exalted | Self::OwnSign)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Exalted => "Exalted",
            Self::Debilitated => "Debilitated",
            Self::OwnSign => "Own Sign",
            Self::Neutral => "Neutral",
        }
    }
}

/// Classify a graha in a sign.
///
/// Priority: exaltation > debilitation > own sign > neutral, so Mercury in
/// Kanya is Exalted. Rahu and Ketu are always Neutral.
pub fn dignity_in_rashi(graha: Graha, rashi: Rashi) -> Dignity {
    if exaltation_sign(graha) == Some(rashi) {
        Dignity::Exalted
    } else if debilitation_sign(graha) == Some(rashi) {
        Dignity::Debilitated
    } else if own_signs(graha).contains(&rashi) {
        Dignity::OwnSign
    } else {
        Dignity::Neutral
    }
}

// ---------------------------------------------------------------------------
// Natural friendship (Naisargika Maitri)
// ---------------------------------------------------------------------------

/// Natural relationship between two grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relationship {
    Friend,
    Neutral,
    Enemy,
}

/// Natural friendship of `graha` towards `other` (not symmetric).
/// Any pairing involving Rahu/Ketu, and a graha with itself, is Neutral.
pub const fn naisargika_maitri(graha: Graha, other: Graha) -> Relationship {
    use Graha::*;
    use Relationship::*;

    match (graha, other) {
        (Rahu | Ketu, _) | (_, Rahu | Ketu) => Neutral,

        (Surya, Chandra | Mangal | Guru) => Friend,
        (Surya, Shukra | Shani) => Enemy,

        (Chandra, Surya | Buddh) => Friend,

        (Mangal, Surya | Chandra | Guru) => Friend,
        (Mangal, Buddh) => Enemy,

        (Buddh, Surya | Shukra) => Friend,
        (Buddh, Chandra) => Enemy,

        (Guru, Surya | Chandra | Mangal) => Friend,
        (Guru, Buddh | Shukra) => Enemy,

        (Shukra, Buddh | Shani) => Friend,
        (Shukra, Surya | Chandra) => Enemy,

        (Shani, Buddh | Shukra) => Friend,
        (Shani, Surya | Chandra | Mangal) => Enemy,

        _ => Neutral,
    }
}

/// Relationship of `graha` towards the lord of `rashi`.
pub fn relationship_with_sign_lord(graha: Graha, rashi: Rashi) -> Relationship {
    naisargika_maitri(graha, rashi_lord(rashi))
}

// ---------------------------------------------------------------------------
// Natural benefics
// ---------------------------------------------------------------------------

/// Moon, Mercury, Jupiter and Venus are natural benefics.
pub const fn is_natural_benefic(graha: Graha) -> bool {
    matches!(
        graha,
        Graha::Chandra | Graha::Buddh | Graha::Guru | Graha::Shukra
    )
}

/// Sun, Mars, Saturn, Rahu and Ketu are natural malefics.
pub const fn is_natural_malefic(graha: Graha) -> bool {
    !is_natural_benefic(graha)
}

// ---------------------------------------------------------------------------
// Combustion
// ---------------------------------------------------------------------------

/// Combustion orb (degrees from the Sun); `None` for Sun, Rahu, Ketu.
/// Mercury and Venus use tighter orbs when retrograde.
pub const fn combustion_orb(graha: Graha, is_retrograde: bool) -> Option<f64> {
    match graha {
        Graha::Surya | Graha::Rahu | Graha::Ketu => None,
        Graha::Chandra => Some(12.0),
        Graha::Mangal => Some(17.0),
        Graha::Buddh => Some(if is_retrograde { 12.0 } else { 14.0 }),
        Graha::Guru => Some(11.0),
        Graha::Shukra => Some(if is_retrograde { 8.0 } else { 10.0 }),
        Graha::Shani => Some(15.0),
    }
}

/// A graha is combust strictly inside its orb from the Sun.
pub fn is_combust(graha: Graha, graha_lon: f64, sun_lon: f64, is_retrograde: bool) -> bool {
    match combustion_orb(graha, is_retrograde) {
        Some(orb) => angular_distance(graha_lon, sun_lon) < orb,
        None => false,
    }
}
