//! Vedic planet (graha) enum, chart bodies, and rashi lordship.

use serde::Serialize;

use crate::rashi::Rashi;

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

/// The 7 classical grahas (sapta grahas), excluding Rahu and Ketu.
pub const SAPTA_GRAHAS: [Graha; 7] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// 0-based index in [`ALL_GRAHAS`] order.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Graha for a 0-based index; `None` for index >= 9.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 9 {
            Some(ALL_GRAHAS[index as usize])
        } else {
            None
        }
    }

    /// Rahu and Ketu.
    pub const fn is_node(self) -> bool {
        matches!(self, Self::Rahu | Self::Ketu)
    }

    /// Rank by mean daily motion, fastest first (Moon = 0 .. Saturn = 6).
    ///
    /// Used where a rule depends on which of two bodies moves faster.
    /// Nodes rank after Saturn.
    pub const fn speed_rank(self) -> u8 {
        match self {
            Self::Chandra => 0,
            Self::Buddh => 1,
            Self::Shukra => 2,
            Self::Surya => 3,
            Self::Mangal => 4,
            Self::Guru => 5,
            Self::Shani => 6,
            Self::Rahu | Self::Ketu => 7,
        }
    }
}

impl std::fmt::Display for Graha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.english_name())
    }
}

/// A point that can be placed in a chart: one of the 9 grahas or the lagna.
///
/// The lagna (ascendant) is a pseudo-body: it has no retrograde state and no
/// dignity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Body {
    Graha(Graha),
    Lagna,
}

impl Body {
    /// Display name (English for grahas, "Ascendant" for the lagna).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Graha(g) => g.english_name(),
            Self::Lagna => "Ascendant",
        }
    }

    /// The graha, if this body is one.
    pub const fn graha(self) -> Option<Graha> {
        match self {
            Self::Graha(g) => Some(g),
            Self::Lagna => None,
        }
    }
}

impl From<Graha> for Body {
    fn from(g: Graha) -> Self {
        Self::Graha(g)
    }
}

/// Get the planetary lord of a rashi.
///
/// - Mesha/Vrischika → Mangal
/// - Vrishabha/Tula → Shukra
/// - Mithuna/Kanya → Buddh
/// - Karka → Chandra
/// - Simha → Surya
/// - Dhanu/Meena → Guru
/// - Makara/Kumbha → Shani
pub const fn rashi_lord(rashi: Rashi) -> Graha {
    match rashi {
        Rashi::Mesha => Graha::Mangal,
        Rashi::Vrishabha => Graha::Shukra,
        Rashi::Mithuna => Graha::Buddh,
        Rashi::Karka => Graha::Chandra,
        Rashi::Simha => Graha::Surya,
        Rashi::Kanya => Graha::Buddh,
        Rashi::Tula => Graha::Shukra,
        Rashi::Vrischika => Graha::Mangal,
        Rashi::Dhanu => Graha::Guru,
        Rashi::Makara => Graha::Shani,
        Rashi::Kumbha => Graha::Shani,
        Rashi::Meena => Graha::Guru,
    }
}

/// Get the lord of a rashi by 0-based index.
///
/// Returns None if index >= 12.
pub fn rashi_lord_by_index(rashi_index: u8) -> Option<Graha> {
    if rashi_index >= 12 {
        return None;
    }
    Some(rashi_lord(Rashi::from_index(rashi_index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graha_indices_sequential() {
        for (i, g) in ALL_GRAHAS.iter().enumerate() {
            assert_eq!(g.index() as usize, i);
            assert_eq!(Graha::from_index(i as u8), Some(*g));
        }
        assert_eq!(Graha::from_index(9), None);
    }

    #[test]
    fn sapta_excludes_nodes() {
        assert!(SAPTA_GRAHAS.iter().all(|g| !g.is_node()));
    }

    #[test]
    fn rashi_lordship_dual_ruled() {
        assert_eq!(rashi_lord(Rashi::Mesha), rashi_lord(Rashi::Vrischika));
        assert_eq!(rashi_lord(Rashi::Vrishabha), rashi_lord(Rashi::Tula));
        assert_eq!(rashi_lord(Rashi::Mithuna), rashi_lord(Rashi::Kanya));
        assert_eq!(rashi_lord(Rashi::Dhanu), rashi_lord(Rashi::Meena));
        assert_eq!(rashi_lord(Rashi::Makara), rashi_lord(Rashi::Kumbha));
    }

    #[test]
    fn rashi_lord_by_index_invalid() {
        assert_eq!(rashi_lord_by_index(12), None);
        assert_eq!(rashi_lord_by_index(4), Some(Graha::Surya));
    }

    #[test]
    fn body_names() {
        assert_eq!(Body::Lagna.name(), "Ascendant");
        assert_eq!(Body::from(Graha::Guru).name(), "Jupiter");
        assert_eq!(Body::Lagna.graha(), None);
    }

    #[test]
    fn moon_is_fastest() {
        assert!(Graha::Chandra.speed_rank() < Graha::Buddh.speed_rank());
        assert!(Graha::Guru.speed_rank() < Graha::Shani.speed_rank());
    }
}
