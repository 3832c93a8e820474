//! Core types for dasha (planetary period) trees.
//!
//! A dasha is a hierarchical time-period system. Every node owns its
//! children, which partition the node's `[start_jd, end_jd)` range exactly.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;

/// Year length constant for dasha period calculations.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Maximum tree depth (Mahadasha through Pranadasha).
pub const MAX_DASHA_DEPTH: u8 = 5;

/// Default tree depth (Maha, Antar, Pratyantar).
pub const DEFAULT_DASHA_DEPTH: u8 = 3;

/// 5 hierarchical dasha levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 0,
    Antardasha = 1,
    Pratyantardasha = 2,
    Sookshmadasha = 3,
    Pranadasha = 4,
}

impl DashaLevel {
    /// Create from raw u8 value.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Mahadasha),
            1 => Some(Self::Antardasha),
            2 => Some(Self::Pratyantardasha),
            3 => Some(Self::Sookshmadasha),
            4 => Some(Self::Pranadasha),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
            Self::Sookshmadasha => "Sookshmadasha",
            Self::Pranadasha => "Pranadasha",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => Some(Self::Sookshmadasha),
            Self::Sookshmadasha => Some(Self::Pranadasha),
            Self::Pranadasha => None,
        }
    }
}

/// The 8 yoginis of the Yogini dasha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Yogini {
    Mangala,
    Pingala,
    Dhanya,
    Bhramari,
    Bhadrika,
    Ulka,
    Siddha,
    Sankata,
}

impl Yogini {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mangala => "Mangala",
            Self::Pingala => "Pingala",
            Self::Dhanya => "Dhanya",
            Self::Bhramari => "Bhramari",
            Self::Bhadrika => "Bhadrika",
            Self::Ulka => "Ulka",
            Self::Siddha => "Siddha",
            Self::Sankata => "Sankata",
        }
    }

    /// Graha associated with the yogini.
    pub const fn graha(self) -> Graha {
        match self {
            Self::Mangala => Graha::Chandra,
            Self::Pingala => Graha::Surya,
            Self::Dhanya => Graha::Guru,
            Self::Bhramari => Graha::Mangal,
            Self::Bhadrika => Graha::Buddh,
            Self::Ulka => Graha::Shani,
            Self::Siddha => Graha::Shukra,
            Self::Sankata => Graha::Rahu,
        }
    }
}

/// What rules a dasha period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DashaLord {
    Graha(Graha),
    Yogini(Yogini),
}

impl DashaLord {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Graha(g) => g.english_name(),
            Self::Yogini(y) => y.name(),
        }
    }

    /// The ruling graha (a yogini's associated graha).
    pub const fn graha(self) -> Graha {
        match self {
            Self::Graha(g) => g,
            Self::Yogini(y) => y.graha(),
        }
    }
}

impl std::fmt::Display for DashaLord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Dasha systems built on the proportional tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashaSystem {
    /// 120-year nakshatra cycle.
    Vimshottari,
    /// 36-year yogini cycle.
    Yogini,
    /// Annual Vimshottari compressed into one year.
    Mudda,
}

impl DashaSystem {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vimshottari => "Vimshottari",
            Self::Yogini => "Yogini",
            Self::Mudda => "Mudda",
        }
    }
}

/// One period in a dasha tree, owning its sub-periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaNode {
    pub lord: DashaLord,
    pub level: DashaLevel,
    /// JD UT, inclusive.
    pub start_jd: f64,
    /// JD UT, exclusive.
    pub end_jd: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DashaNode>,
}

impl DashaNode {
    /// Duration of the period in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// `start_jd <= jd < end_jd`.
    pub fn contains(&self, jd: f64) -> bool {
        self.start_jd <= jd && jd < self.end_jd
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DashaNode::node_count).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1).
    pub fn depth(&self) -> u8 {
        1 + self.children.iter().map(DashaNode::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dasha_level_from_u8() {
        assert_eq!(DashaLevel::from_u8(0), Some(DashaLevel::Mahadasha));
        assert_eq!(DashaLevel::from_u8(4), Some(DashaLevel::Pranadasha));
        assert_eq!(DashaLevel::from_u8(5), None);
    }

    #[test]
    fn dasha_level_child() {
        assert_eq!(
            DashaLevel::Mahadasha.child_level(),
            Some(DashaLevel::Antardasha)
        );
        assert_eq!(DashaLevel::Pranadasha.child_level(), None);
    }

    #[test]
    fn lord_names() {
        assert_eq!(DashaLord::Graha(Graha::Shukra).name(), "Venus");
        assert_eq!(DashaLord::Yogini(Yogini::Sankata).name(), "Sankata");
        assert_eq!(DashaLord::Yogini(Yogini::Mangala).graha(), Graha::Chandra);
    }

    #[test]
    fn node_helpers() {
        let leaf = DashaNode {
            lord: DashaLord::Graha(Graha::Ketu),
            level: DashaLevel::Antardasha,
            start_jd: 10.0,
            end_jd: 20.0,
            children: Vec::new(),
        };
        let root = DashaNode {
            lord: DashaLord::Graha(Graha::Ketu),
            level: DashaLevel::Mahadasha,
            start_jd: 10.0,
            end_jd: 20.0,
            children: vec![leaf],
        };
        assert!(root.contains(10.0));
        assert!(!root.contains(20.0));
        assert_eq!(root.node_count(), 2);
        assert_eq!(root.depth(), 2);
        assert!((root.duration_days() - 10.0).abs() < 1e-12);
    }
}
