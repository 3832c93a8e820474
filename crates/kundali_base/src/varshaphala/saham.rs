//! Sahams (sensitive points) of the annual chart.
//!
//! Every saham is `A - B + C` (mod 360). Formulas marked for night reversal
//! swap A and B when the Sun is below the horizon (houses 1..=6). With the
//! classical correction enabled, 30 degrees are added when C does not fall
//! on the zodiacal arc running forward from B to A.

use serde::Serialize;

use crate::chart::Chart;
use crate::graha::Graha;
use crate::house::house_from;
use crate::position::{PositionInfo, normalize_position};
use crate::util::{forward_arc, normalize_360};

/// A point a saham formula can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SahamPoint {
    Graha(Graha),
    Lagna,
    LagnaLord,
}

impl SahamPoint {
    /// Longitude of this point in `chart`.
    pub fn longitude(self, chart: &Chart) -> f64 {
        match self {
            Self::Graha(g) => chart.graha(g).longitude,
            Self::Lagna => chart.lagna.longitude,
            Self::LagnaLord => chart.graha(chart.house_lord(1)).longitude,
        }
    }
}

/// One named saham formula `a - b + c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SahamFormula {
    pub name: &'static str,
    pub a: SahamPoint,
    pub b: SahamPoint,
    pub c: SahamPoint,
    pub reverse_at_night: bool,
}

const fn formula(
    name: &'static str,
    a: SahamPoint,
    b: SahamPoint,
    reverse_at_night: bool,
) -> SahamFormula {
    SahamFormula {
        name,
        a,
        b,
        c: SahamPoint::Lagna,
        reverse_at_night,
    }
}

const SUN: SahamPoint = SahamPoint::Graha(Graha::Surya);
const MOON: SahamPoint = SahamPoint::Graha(Graha::Chandra);
const MARS: SahamPoint = SahamPoint::Graha(Graha::Mangal);
const MERCURY: SahamPoint = SahamPoint::Graha(Graha::Buddh);
const JUPITER: SahamPoint = SahamPoint::Graha(Graha::Guru);
const VENUS: SahamPoint = SahamPoint::Graha(Graha::Shukra);
const SATURN: SahamPoint = SahamPoint::Graha(Graha::Shani);

/// Classical default saham set.
pub const DEFAULT_SAHAMS: &[SahamFormula] = &[
    formula("Punya", MOON, SUN, true),
    formula("Vidya", SUN, MOON, true),
    formula("Asha", SATURN, VENUS, true),
    formula("Samartha", MARS, SahamPoint::LagnaLord, true),
    formula("Bhratri", JUPITER, SATURN, false),
    formula("Pitri", SATURN, SUN, true),
    formula("Matri", MOON, VENUS, true),
    formula("Putra", JUPITER, MOON, true),
    formula("Vivaha", VENUS, SATURN, false),
    formula("Karma", MARS, MERCURY, true),
    formula("Roga", SahamPoint::Lagna, MOON, false),
    formula("Vyapara", MARS, SATURN, true),
];

/// A computed saham.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Saham {
    pub name: &'static str,
    pub position: PositionInfo,
    /// House in the chart it was computed from.
    pub house: u8,
    /// A and B were swapped for a night chart.
    pub reversed: bool,
    /// The +30 degree correction was applied.
    pub corrected: bool,
}

impl Saham {
    pub fn longitude(&self) -> f64 {
        self.position.longitude
    }
}

/// Sun below the horizon, i.e. in houses 1..=6.
pub fn is_night_chart(chart: &Chart) -> bool {
    matches!(chart.house_of(Graha::Surya), 1..=6)
}

/// `c` lies on the forward arc from `b` to `a`.
fn lies_between(b: f64, a: f64, c: f64) -> bool {
    forward_arc(b, c) <= forward_arc(b, a)
}

/// Compute one saham.
pub fn saham(chart: &Chart, formula: &SahamFormula, correction: bool) -> Saham {
    let reversed = formula.reverse_at_night && is_night_chart(chart);
    let (a, b) = if reversed {
        (formula.b, formula.a)
    } else {
        (formula.a, formula.b)
    };
    let (a, b, c) = (
        a.longitude(chart),
        b.longitude(chart),
        formula.c.longitude(chart),
    );

    let mut lon = normalize_360(a - b + c);
    let corrected = correction && !lies_between(b, a, c);
    if corrected {
        lon = normalize_360(lon + 30.0);
    }

    let position = normalize_position(lon);
    Saham {
        name: formula.name,
        house: house_from(chart.ascendant(), position.rashi),
        position,
        reversed,
        corrected,
    }
}

/// Compute a table of sahams in formula order.
pub fn sahams(chart: &Chart, formulas: &[SahamFormula], correction: bool) -> Vec<Saham> {
    formulas
        .iter()
        .map(|f| saham(chart, f, correction))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::SiderealPositions;

    fn chart(sun: f64, moon: f64, lagna: f64) -> Chart {
        Chart::varshaphala(&SiderealPositions::new(
            [sun, moon, 20.0, 250.0, 70.0, 300.0, 200.0, 30.0, 210.0],
            lagna,
        ))
        .unwrap()
    }

    fn punya() -> &'static SahamFormula {
        DEFAULT_SAHAMS.iter().find(|f| f.name == "Punya").unwrap()
    }

    #[test]
    fn default_table_has_twelve_entries() {
        assert_eq!(DEFAULT_SAHAMS.len(), 12);
        assert!(DEFAULT_SAHAMS.iter().all(|f| f.c == SahamPoint::Lagna));
    }

    #[test]
    fn day_chart_punya_without_correction() {
        // Lagna Mesha 10, Sun Makara (10th house) = day chart
        let c = chart(280.0, 100.0, 10.0);
        assert!(!is_night_chart(&c));
        let s = saham(&c, punya(), false);
        assert!(!s.reversed);
        // 100 - 280 + 10 = -170 -> 190
        assert!((s.longitude() - 190.0).abs() < 1e-9);
        assert_eq!(s.house, 7);
    }

    #[test]
    fn night_chart_reverses_punya() {
        // Lagna Mesha 10, Sun Simha (5th house) = night chart
        let c = chart(130.0, 100.0, 10.0);
        assert!(is_night_chart(&c));
        let s = saham(&c, punya(), false);
        assert!(s.reversed);
        // Sun - Moon + Asc = 130 - 100 + 10
        assert!((s.longitude() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn non_reversing_formula_ignores_night() {
        let c = chart(130.0, 100.0, 10.0);
        let roga = DEFAULT_SAHAMS.iter().find(|f| f.name == "Roga").unwrap();
        let s = saham(&c, roga, false);
        assert!(!s.reversed);
        // Asc - Moon + Asc = 10 - 100 + 10
        assert!((s.longitude() - 280.0).abs() < 1e-9);
    }

    #[test]
    fn correction_adds_thirty_when_lagna_outside_arc() {
        // Day chart, B = Sun 280, A = Moon 100: forward arc 280 -> 100 spans
        // 280..360..100. Lagna 10 lies inside, so no correction.
        let inside = saham(&chart(280.0, 100.0, 10.0), punya(), true);
        assert!(!inside.corrected);

        // Lagna 150 (Kanya) puts the Sun (Makara) in the 5th: night chart,
        // B = Moon 100, A = Sun 280; arc 100 -> 280 holds 150, no correction.
        let night = saham(&chart(280.0, 100.0, 150.0), punya(), true);
        assert!(night.reversed);
        assert!(!night.corrected);

        // Mithuna lagna, Sun in the 12th: day. B = Sun 50, A = Moon 100, C = 75 inside.
        let c = chart(50.0, 100.0, 75.0);
        assert!(!is_night_chart(&c));
        assert!(!saham(&c, punya(), true).corrected);
        let c = chart(50.0, 100.0, 170.0);
        // Sun Vrishabha from Kanya lagna = 9th house, day chart; 170 outside 50..100
        let s = saham(&c, punya(), true);
        assert!(s.corrected);
        // 100 - 50 + 170 + 30
        assert!((s.longitude() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn lagna_lord_point_resolves() {
        // Mesha lagna: lord Mars at 20
        let c = chart(280.0, 100.0, 10.0);
        assert!((SahamPoint::LagnaLord.longitude(&c) - 20.0).abs() < 1e-9);
    }
}
