//! Recursive proportional dasha tree builder.
//!
//! Roots start at the tree start with the remaining balance of the Moon's
//! nakshatra lord, then cycle through the lord sequence at full length until
//! the requested span is covered; the last root is clipped to the span end.
//!
//! Every node is split among all lords starting from its own lord,
//! `child = node_duration * child_years / total_years`, with the last child
//! snapped to the node end.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::nakshatra::nakshatra_from_longitude;
use crate::util::normalize_360;

use super::balance::{DashaBalance, nakshatra_birth_balance};
use super::scheme::{DashaScheme, MUDDA, VIMSHOTTARI, YOGINI};
use super::types::{
    DAYS_PER_YEAR, DEFAULT_DASHA_DEPTH, DashaLevel, DashaNode, DashaSystem, MAX_DASHA_DEPTH,
};

/// Root ends closer than this to the span end are snapped onto it.
const SNAP_EPSILON_DAYS: f64 = 1e-6;

/// How truncated periods (the birth balance and the clipped final root) are
/// subdivided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceMode {
    /// Subdivide the truncated span itself; every child sequence starts with
    /// the node's own lord.
    #[default]
    Compressed,
    /// Subdivide over the theoretical full period and keep only the children
    /// that intersect the truncated span, clipped to it.
    Nominal,
}

/// Tree construction options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashaOptions {
    /// Number of levels, 1..=5.
    pub depth: u8,
    /// Span covered by the roots in days; `None` means one full cycle.
    pub span_days: Option<f64>,
    pub balance_mode: BalanceMode,
}

impl Default for DashaOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DASHA_DEPTH,
            span_days: None,
            balance_mode: BalanceMode::Compressed,
        }
    }
}

impl DashaOptions {
    /// Defaults for the annual Mudda dasha (depth 2, one year).
    pub fn mudda() -> Self {
        Self {
            depth: 2,
            span_days: Some(DAYS_PER_YEAR),
            balance_mode: BalanceMode::Compressed,
        }
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_span_years(mut self, years: f64) -> Self {
        self.span_days = Some(years * DAYS_PER_YEAR);
        self
    }
}

/// A complete dasha tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaTree {
    pub system: DashaSystem,
    /// JD UT of the first root's start.
    pub start_jd: f64,
    /// JD UT of the last root's end.
    pub end_jd: f64,
    pub moon_longitude: f64,
    pub balance: DashaBalance,
    pub periods: Vec<DashaNode>,
}

/// Build a dasha tree for `scheme` seeded by the Moon's longitude.
pub fn build_dasha_tree(
    scheme: &DashaScheme,
    moon_sidereal_lon: f64,
    start_jd: f64,
    options: &DashaOptions,
) -> Result<DashaTree, VedicError> {
    if options.depth == 0 || options.depth > MAX_DASHA_DEPTH {
        return Err(VedicError::InvalidInput("dasha depth must be in 1..=5"));
    }
    if !moon_sidereal_lon.is_finite() {
        return Err(VedicError::InvalidInput("moon longitude is not finite"));
    }
    if !start_jd.is_finite() {
        return Err(VedicError::InvalidInput("dasha start is not finite"));
    }
    let span = options.span_days.unwrap_or(scheme.cycle_days);
    if !span.is_finite() || span <= 0.0 {
        return Err(VedicError::InvalidInput("dasha span must be positive"));
    }

    let end_jd = start_jd + span;
    let window = (start_jd, end_jd);
    let n = scheme.lords.len();

    let nak = nakshatra_from_longitude(moon_sidereal_lon);
    let first_pos = scheme.starting_position(nak.nakshatra_index);
    let first_full = scheme.period_days(first_pos);
    let balance = nakshatra_birth_balance(moon_sidereal_lon, first_full);

    let mut periods = Vec::new();
    let mut cursor = start_jd + balance.balance_days;
    let first_nominal = match options.balance_mode {
        BalanceMode::Compressed => (start_jd, cursor.min(end_jd)),
        BalanceMode::Nominal => (start_jd - balance.elapsed_fraction * first_full, cursor),
    };
    periods.extend(build_node(
        scheme,
        first_pos,
        DashaLevel::Mahadasha,
        first_nominal,
        window,
        options.depth,
    ));

    let mut pos = first_pos;
    while cursor < end_jd {
        pos = (pos + 1) % n;
        let mut full_end = cursor + scheme.period_days(pos);
        if (full_end - end_jd).abs() < SNAP_EPSILON_DAYS {
            full_end = end_jd;
        }
        let nominal = match options.balance_mode {
            BalanceMode::Compressed => (cursor, full_end.min(end_jd)),
            BalanceMode::Nominal => (cursor, full_end),
        };
        periods.extend(build_node(
            scheme,
            pos,
            DashaLevel::Mahadasha,
            nominal,
            window,
            options.depth,
        ));
        cursor = full_end;
    }

    Ok(DashaTree {
        system: scheme.system,
        start_jd,
        end_jd,
        moon_longitude: normalize_360(moon_sidereal_lon),
        balance,
        periods,
    })
}

/// Vimshottari tree starting at birth.
pub fn vimshottari_dasha(
    moon_sidereal_lon: f64,
    birth_jd: f64,
    options: &DashaOptions,
) -> Result<DashaTree, VedicError> {
    build_dasha_tree(&VIMSHOTTARI, moon_sidereal_lon, birth_jd, options)
}

/// Yogini tree starting at birth.
pub fn yogini_dasha(
    moon_sidereal_lon: f64,
    birth_jd: f64,
    options: &DashaOptions,
) -> Result<DashaTree, VedicError> {
    build_dasha_tree(&YOGINI, moon_sidereal_lon, birth_jd, options)
}

/// Mudda tree starting at the solar return, seeded by the annual Moon.
pub fn mudda_dasha(
    annual_moon_lon: f64,
    solar_return_jd: f64,
    options: &DashaOptions,
) -> Result<DashaTree, VedicError> {
    build_dasha_tree(&MUDDA, annual_moon_lon, solar_return_jd, options)
}

/// Build one node whose theoretical range is `nominal`, clipped to `window`.
fn build_node(
    scheme: &DashaScheme,
    pos: usize,
    level: DashaLevel,
    nominal: (f64, f64),
    window: (f64, f64),
    depth: u8,
) -> Option<DashaNode> {
    let start_jd = nominal.0.max(window.0);
    let end_jd = nominal.1.min(window.1);
    if end_jd <= start_jd {
        return None;
    }

    let children = match level.child_level() {
        Some(child_level) if (level as u8) + 1 < depth => subdivide(
            scheme,
            pos,
            child_level,
            nominal,
            (start_jd, end_jd),
            depth,
        ),
        _ => Vec::new(),
    };

    Some(DashaNode {
        lord: scheme.lords[pos],
        level,
        start_jd,
        end_jd,
        children,
    })
}

fn subdivide(
    scheme: &DashaScheme,
    parent_pos: usize,
    child_level: DashaLevel,
    nominal: (f64, f64),
    window: (f64, f64),
    depth: u8,
) -> Vec<DashaNode> {
    let n = scheme.lords.len();
    let total = scheme.total_years();
    let duration = nominal.1 - nominal.0;
    let mut children = Vec::with_capacity(n);
    let mut cursor = nominal.0;

    for i in 0..n {
        let pos = (parent_pos + i) % n;
        let child_end = if i + 1 == n {
            nominal.1
        } else {
            cursor + duration * scheme.years[pos] / total
        };
        children.extend(build_node(
            scheme,
            pos,
            child_level,
            (cursor, child_end),
            window,
            depth,
        ));
        cursor = child_end;
    }
    children
}
