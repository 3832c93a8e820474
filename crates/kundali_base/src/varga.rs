//! Varga (divisional chart) transformation.
//!
//! Every varga uses one parameterized mapping: a sign is cut into N equal
//! parts and the parts are laid end to end around a new 12-sign wheel.
//!
//! ```text
//! total_degrees = (sign - 1) * 30 + degrees_in_sign
//! varga_sign    = (floor(total_degrees * N / 30) mod 12) + 1
//! ```
//!
//! Equivalently the varga longitude is `(total_degrees * N) mod 360`, which
//! also keeps the position inside the varga sign. Presets only carry labels.
//!
//! Precision: the width of one varga part is `30 / N` degrees (30' for D60),
//! so input longitudes must be accurate to at least an arc-minute for D60
//! placements to be meaningful.

use serde::Serialize;

use crate::error::VedicError;
use crate::rashi::{Rashi, rashi_index_of};
use crate::util::normalize_360;

// ---------------------------------------------------------------------------
// Varga labels
// ---------------------------------------------------------------------------

/// Divisional chart selector. Presets are labels for common divisions;
/// `Custom(n)` accepts any `n >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Varga {
    D1,
    D2,
    D3,
    D4,
    D7,
    D9,
    D10,
    D12,
    D16,
    D20,
    D24,
    D27,
    D30,
    D40,
    D45,
    D60,
    Custom(u16),
}

/// Preset vargas in ascending order of division.
pub const PRESET_VARGAS: [Varga; 16] = [
    Varga::D1,
    Varga::D2,
    Varga::D3,
    Varga::D4,
    Varga::D7,
    Varga::D9,
    Varga::D10,
    Varga::D12,
    Varga::D16,
    Varga::D20,
    Varga::D24,
    Varga::D27,
    Varga::D30,
    Varga::D40,
    Varga::D45,
    Varga::D60,
];

impl Varga {
    /// Number of divisions per sign.
    pub const fn divisions(self) -> u16 {
        match self {
            Self::D1 => 1,
            Self::D2 => 2,
            Self::D3 => 3,
            Self::D4 => 4,
            Self::D7 => 7,
            Self::D9 => 9,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D16 => 16,
            Self::D20 => 20,
            Self::D24 => 24,
            Self::D27 => 27,
            Self::D30 => 30,
            Self::D40 => 40,
            Self::D45 => 45,
            Self::D60 => 60,
            Self::Custom(n) => n,
        }
    }

    /// Conventional name of the chart.
    pub const fn name(self) -> &'static str {
        match self {
            Self::D1 => "Rashi",
            Self::D2 => "Hora",
            Self::D3 => "Drekkana",
            Self::D4 => "Chaturthamsha",
            Self::D7 => "Saptamsha",
            Self::D9 => "Navamsha",
            Self::D10 => "Dashamsha",
            Self::D12 => "Dwadashamsha",
            Self::D16 => "Shodashamsha",
            Self::D20 => "Vimshamsha",
            Self::D24 => "Chaturvimshamsha",
            Self::D27 => "Saptavimshamsha",
            Self::D30 => "Trimshamsha",
            Self::D40 => "Khavedamsha",
            Self::D45 => "Akshavedamsha",
            Self::D60 => "Shashtiamsha",
            Self::Custom(_) => "Custom",
        }
    }

    /// Map a division count to its preset label, or `Custom`.
    ///
    /// Returns an error for `n == 0`.
    pub fn from_divisions(n: u16) -> Result<Self, VedicError> {
        if n == 0 {
            return Err(VedicError::InvalidInput("varga division must be >= 1"));
        }
        Ok(PRESET_VARGAS
            .iter()
            .copied()
            .find(|v| v.divisions() == n)
            .unwrap_or(Varga::Custom(n)))
    }
}

impl std::fmt::Display for Varga {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "D{} ({})", self.divisions(), self.name())
    }
}

// ---------------------------------------------------------------------------
// Core transformation
// ---------------------------------------------------------------------------

/// Transform a sidereal longitude into its D-`n` longitude in [0, 360).
///
/// `n == 1` is the identity (after wrapping). `n == 0` is rejected by the
/// callers that accept raw division counts; here it would collapse every
/// longitude to 0 deg.
pub fn varga_longitude(sidereal_lon: f64, n: u16) -> f64 {
    let lon = normalize_360(sidereal_lon);
    if n <= 1 {
        return lon;
    }
    normalize_360(lon * n as f64)
}

/// D-`n` sign (1-based, 1..=12) of a sidereal longitude.
pub fn varga_sign(sidereal_lon: f64, n: u16) -> u8 {
    varga_rashi(sidereal_lon, n).number()
}

/// D-`n` rashi of a sidereal longitude.
pub fn varga_rashi(sidereal_lon: f64, n: u16) -> Rashi {
    Rashi::from_index(rashi_index_of(varga_longitude(sidereal_lon, n)))
}

/// Navamsha (D9) rashi of a sidereal longitude.
pub fn navamsha_rashi(sidereal_lon: f64) -> Rashi {
    varga_rashi(sidereal_lon, 9)
}

/// A body is vargottama when its navamsha sign equals its rashi sign.
pub fn is_vargottama(sidereal_lon: f64) -> bool {
    navamsha_rashi(sidereal_lon) == Rashi::from_index(rashi_index_of(sidereal_lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nakshatra::PADA_SPAN;

    #[test]
    fn d1_identity() {
        for lon in [0.0, 29.99, 123.456, 359.999] {
            assert!((varga_longitude(lon, 1) - lon).abs() < 1e-12);
        }
    }

    #[test]
    fn matches_closed_form_sign() {
        let mut lon = 0.0;
        while lon < 360.0 {
            for n in [2u16, 3, 7, 9, 10, 60] {
                let sign_idx = rashi_index_of(lon);
                let deg = lon - sign_idx as f64 * 30.0;
                let total = sign_idx as f64 * 30.0 + deg;
                let expected = ((total * n as f64 / 30.0).floor() as u64 % 12) as u8 + 1;
                assert_eq!(varga_sign(lon, n), expected, "lon={lon} n={n}");
            }
            lon += 0.731;
        }
    }

    #[test]
    fn d9_fire_sign_starts_from_itself() {
        // Mesha 0-3°20' → Mesha navamsha
        assert_eq!(navamsha_rashi(1.0), Rashi::Mesha);
        // Simha 0° → navamsha index floor(120*9/30)=36 → 0 → Mesha
        assert_eq!(navamsha_rashi(120.5), Rashi::Mesha);
    }

    #[test]
    fn d9_earth_sign_starts_from_makara() {
        // Vrishabha 0° → floor(30*9/30)=9 → Makara
        assert_eq!(navamsha_rashi(30.5), Rashi::Makara);
    }

    #[test]
    fn vargottama_at_navamsha_boundary() {
        // First navamsha of Mesha is Mesha: vargottama until 3°20'.
        assert!(is_vargottama(PADA_SPAN - 1e-6));
        assert!(!is_vargottama(PADA_SPAN + 1e-6));
    }

    #[test]
    fn vargottama_middle_of_movable_fixed_dual() {
        // Vargottama navamshas: 1st of movable, 5th of fixed, 9th of dual signs.
        assert!(is_vargottama(90.0 + 1.0)); // Karka, 1st
        assert!(is_vargottama(30.0 + 4.0 * PADA_SPAN + 1.0)); // Vrishabha, 5th
        assert!(is_vargottama(60.0 + 8.0 * PADA_SPAN + 1.0)); // Mithuna, 9th
    }

    #[test]
    fn from_divisions_presets_and_custom() {
        assert_eq!(Varga::from_divisions(9).ok(), Some(Varga::D9));
        assert_eq!(Varga::from_divisions(11).ok(), Some(Varga::Custom(11)));
        assert!(Varga::from_divisions(0).is_err());
    }

    #[test]
    fn d60_in_range() {
        for i in 0..3600 {
            let s = varga_sign(i as f64 * 0.1, 60);
            assert!((1..=12).contains(&s));
        }
    }
}
