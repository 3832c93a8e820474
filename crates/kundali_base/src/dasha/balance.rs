//! Birth balance of the first dasha period.
//!
//! The Moon's progress through its nakshatra is the fraction of the first
//! lord's period already consumed at the start of the tree.

use serde::Serialize;

use crate::nakshatra::NAKSHATRA_SPAN_27;
use crate::util::normalize_360;

/// Moon position within its nakshatra and the resulting first-period balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaBalance {
    /// 0-based nakshatra index of the Moon (0 = Ashwini).
    pub nakshatra_index: u8,
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub elapsed_fraction: f64,
    /// Remaining days in the first lord's period.
    pub balance_days: f64,
}

/// `elapsed = (moon mod span) / span`, `balance = entry_period * (1 - elapsed)`.
pub fn nakshatra_birth_balance(moon_sidereal_lon: f64, entry_period_days: f64) -> DashaBalance {
    let lon = normalize_360(moon_sidereal_lon);
    let nakshatra_index = ((lon / NAKSHATRA_SPAN_27).floor() as u8).min(26);
    let position_in_nak = lon - nakshatra_index as f64 * NAKSHATRA_SPAN_27;
    let elapsed_fraction = (position_in_nak / NAKSHATRA_SPAN_27).clamp(0.0, 1.0);
    DashaBalance {
        nakshatra_index,
        elapsed_fraction,
        balance_days: entry_period_days * (1.0 - elapsed_fraction),
    }
}
