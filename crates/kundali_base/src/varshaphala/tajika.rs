//! Tajika aspects and yogas of the annual chart.
//!
//! Aspects are the five Tajika angles (0, 60, 90, 120, 180) within an orb
//! equal to the mean of the two bodies' deeptamsha. Of each pair, the body
//! with the faster mean motion ([`Graha::speed_rank`]) is the one that
//! applies or separates. Only the seven classical grahas take part.
//!
//! Applying vs separating is judged from longitudes and the faster body's
//! retrograde flag alone: a direct faster body short of the exact angle is
//! applying, one past it is separating. The slower body's motion is not
//! considered.
//!
//! A body is strong in exaltation or its own sign and weak when debilitated
//! or combust. Tamira is the only yoga read from a pair that is not yet in
//! aspect: the faster body sits in the last degree of its sign and comes
//! into orb as soon as it enters the next one.

use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::dignity::Dignity;
use crate::graha::{Graha, SAPTA_GRAHAS};
use crate::house::{is_apoklima, is_kendra, is_panaphara};
use crate::util::{forward_arc, normalize_360, normalize_to_pm180};

/// Degrees before the sign boundary within which Tamira is read.
const TAMIRA_LAST_DEGREES: f64 = 1.0;

/// Deeptamsha (orb of light) per graha, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TajikaOrbs {
    pub sun: f64,
    pub moon: f64,
    pub mars: f64,
    pub mercury: f64,
    pub jupiter: f64,
    pub venus: f64,
    pub saturn: f64,
}

impl Default for TajikaOrbs {
    fn default() -> Self {
        Self {
            sun: 15.0,
            moon: 12.0,
            mars: 8.0,
            mercury: 7.0,
            jupiter: 9.0,
            venus: 7.0,
            saturn: 9.0,
        }
    }
}

impl TajikaOrbs {
    /// Deeptamsha of a graha; `None` for the nodes.
    pub fn deeptamsha(&self, graha: Graha) -> Option<f64> {
        match graha {
            Graha::Surya => Some(self.sun),
            Graha::Chandra => Some(self.moon),
            Graha::Mangal => Some(self.mars),
            Graha::Buddh => Some(self.mercury),
            Graha::Guru => Some(self.jupiter),
            Graha::Shukra => Some(self.venus),
            Graha::Shani => Some(self.saturn),
            Graha::Rahu | Graha::Ketu => None,
        }
    }

    /// Allowed orb between two grahas: the mean of their deeptamsha.
    pub fn orb(&self, a: Graha, b: Graha) -> Option<f64> {
        Some((self.deeptamsha(a)? + self.deeptamsha(b)?) / 2.0)
    }
}

/// The five Tajika aspect angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TajikaAspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

pub const ALL_TAJIKA_ASPECTS: [TajikaAspectKind; 5] = [
    TajikaAspectKind::Conjunction,
    TajikaAspectKind::Sextile,
    TajikaAspectKind::Square,
    TajikaAspectKind::Trine,
    TajikaAspectKind::Opposition,
];

impl TajikaAspectKind {
    pub const fn angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Opposition => 180.0,
        }
    }

    /// Sextile and trine are friendly; square and opposition are hostile.
    pub const fn is_friendly(self) -> bool {
        matches!(self, Self::Sextile | Self::Trine)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Sextile => "Sextile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Opposition => "Opposition",
        }
    }
}

/// An aspect in orb between two grahas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TajikaAspect {
    pub faster: Graha,
    pub slower: Graha,
    pub kind: TajikaAspectKind,
    /// Distance from the exact angle, degrees.
    pub deviation: f64,
    /// Allowed orb for this pair, degrees.
    pub orb: f64,
    pub applying: bool,
}

impl TajikaAspect {
    /// `deviation / orb`, 0 = exact.
    pub fn tightness(&self) -> f64 {
        self.deviation / self.orb
    }

    pub fn involves(&self, graha: Graha) -> bool {
        self.faster == graha || self.slower == graha
    }

    /// The pair is exactly `{a, b}`.
    pub fn joins(&self, a: Graha, b: Graha) -> bool {
        self.involves(a) && self.involves(b) && a != b
    }
}

/// Aspect between two grahas, if one is within orb.
///
/// Returns `None` for the nodes, for `a == b`, and when no angle is in orb.
/// When several angles qualify the closest one wins.
pub fn tajika_aspect(chart: &Chart, a: Graha, b: Graha, orbs: &TajikaOrbs) -> Option<TajikaAspect> {
    if a == b {
        return None;
    }
    let orb = orbs.orb(a, b)?;
    let (faster, slower) = if a.speed_rank() <= b.speed_rank() {
        (a, b)
    } else {
        (b, a)
    };
    let fast = chart.graha(faster);
    let arc = forward_arc(chart.graha(slower).longitude, fast.longitude);

    let (kind, delta) = ALL_TAJIKA_ASPECTS
        .into_iter()
        .flat_map(|k| {
            [k.angle(), 360.0 - k.angle()]
                .map(|target| (k, normalize_to_pm180(arc - target)))
        })
        .filter(|(_, d)| d.abs() <= orb)
        .min_by(|x, y| x.1.abs().total_cmp(&y.1.abs()))?;

    // delta < 0: short of exact; motion direction decides.
    let applying = if fast.retrograde {
        delta >= 0.0
    } else {
        delta <= 0.0
    };
    Some(TajikaAspect {
        faster,
        slower,
        kind,
        deviation: delta.abs(),
        orb,
        applying,
    })
}

/// All in-orb aspects among the seven classical grahas.
pub fn tajika_aspects(chart: &Chart, orbs: &TajikaOrbs) -> Vec<TajikaAspect> {
    let mut out = Vec::new();
    for (i, &a) in SAPTA_GRAHAS.iter().enumerate() {
        for &b in &SAPTA_GRAHAS[i + 1..] {
            if let Some(asp) = tajika_aspect(chart, a, b, orbs) {
                out.push(asp);
            }
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TajikaYogaKind {
    Ikkavala,
    Induvara,
    Ithasala,
    Ishrafa,
    Nakta,
    Yamaya,
    Manau,
    Kamboola,
    GairiKamboola,
    Khallasar,
    Radda,
    DuhphaliKuttha,
    Kuttha,
    DuttaKuttha,
    Tamira,
}

impl TajikaYogaKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ikkavala => "Ikkavala",
            Self::Induvara => "Induvara",
            Self::Ithasala => "Ithasala",
            Self::Ishrafa => "Ishrafa",
            Self::Nakta => "Nakta",
            Self::Yamaya => "Yamaya",
            Self::Manau => "Manau",
            Self::Kamboola => "Kamboola",
            Self::GairiKamboola => "Gairi-kamboola",
            Self::Khallasar => "Khallasar",
            Self::Radda => "Radda",
            Self::DuhphaliKuttha => "Duhphali-kuttha",
            Self::Kuttha => "Kuttha",
            Self::DuttaKuttha => "Dutta-kuttha",
            Self::Tamira => "Tamira",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Ikkavala => "All planets in kendra or panaphara houses",
            Self::Induvara => "All planets in apoklima houses",
            Self::Ithasala => "Faster planet applying to a slower one",
            Self::Ishrafa => "Faster planet separating from a slower one",
            Self::Nakta => "Unaspected pair linked by a faster planet",
            Self::Yamaya => "Unaspected pair linked by a slower planet",
            Self::Manau => "Ithasala obstructed by Mars or Saturn",
            Self::Kamboola => "Ithasala supported by the Moon",
            Self::GairiKamboola => "Moon applies to a strong third planet instead of the pair",
            Self::Khallasar => "Ithasala while the Moon aspects no planet",
            Self::Radda => "Ithasala with a retrograde or debilitated planet",
            Self::DuhphaliKuttha => "Strong slower planet with a weak faster planet",
            Self::Kuttha => "Ithasala between two strong planets in kendra or panaphara",
            Self::DuttaKuttha => "Strong faster planet with a weak slower planet",
            Self::Tamira => "Faster planet forms Ithasala on entering the next sign",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TajikaStrength {
    Weak,
    Moderate,
    Strong,
}

/// A detected Tajika yoga.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TajikaYoga {
    pub kind: TajikaYogaKind,
    /// Principal pair first (faster, slower), then any third bodies.
    pub grahas: Vec<Graha>,
    /// The pair's aspect, for yogas built on one.
    pub aspect: Option<TajikaAspect>,
    pub strength: TajikaStrength,
}

/// Tier from orb tightness plus participant dignity.
fn strength_tier(chart: &Chart, tightness: Option<f64>, grahas: &[Graha]) -> TajikaStrength {
    let mut score: i32 = match tightness {
        Some(t) if t <= 1.0 / 3.0 => 2,
        Some(t) if t > 2.0 / 3.0 => 0,
        _ => 1,
    };
    for &g in grahas {
        score += match chart.dignity_of(g) {
            Dignity::Exalted | Dignity::OwnSign => 1,
            Dignity::Debilitated => -1,
            Dignity::Neutral => 0,
        };
    }
    match score {
        s if s >= 3 => TajikaStrength::Strong,
        s if s >= 1 => TajikaStrength::Moderate,
        _ => TajikaStrength::Weak,
    }
}

fn is_weak(chart: &Chart, graha: Graha) -> bool {
    let p = chart.graha(graha);
    p.dignity == Some(Dignity::Debilitated) || p.combust
}

fn is_strong(chart: &Chart, graha: Graha) -> bool {
    chart.dignity_of(graha).is_strong() && !chart.graha(graha).combust
}

fn find(aspects: &[TajikaAspect], a: Graha, b: Graha) -> Option<&TajikaAspect> {
    aspects.iter().find(|asp| asp.joins(a, b))
}

fn yoga(
    chart: &Chart,
    kind: TajikaYogaKind,
    grahas: Vec<Graha>,
    aspect: Option<TajikaAspect>,
) -> TajikaYoga {
    TajikaYoga {
        strength: strength_tier(chart, aspect.map(|a| a.tightness()), &grahas),
        kind,
        grahas,
        aspect,
    }
}

/// Detect every Tajika yoga in an annual chart.
pub fn tajika_yogas(chart: &Chart, orbs: &TajikaOrbs) -> Vec<TajikaYoga> {
    let aspects = tajika_aspects(chart, orbs);
    let mut out = Vec::new();

    let houses = SAPTA_GRAHAS.map(|g| chart.house_of(g));
    if houses.iter().all(|&h| is_kendra(h) || is_panaphara(h)) {
        out.push(yoga(chart, TajikaYogaKind::Ikkavala, SAPTA_GRAHAS.to_vec(), None));
    } else if houses.iter().all(|&h| is_apoklima(h)) {
        out.push(yoga(chart, TajikaYogaKind::Induvara, SAPTA_GRAHAS.to_vec(), None));
    }

    for asp in &aspects {
        let pair = vec![asp.faster, asp.slower];
        if !asp.applying {
            out.push(yoga(chart, TajikaYogaKind::Ishrafa, pair, Some(*asp)));
            continue;
        }
        out.push(yoga(chart, TajikaYogaKind::Ithasala, pair.clone(), Some(*asp)));

        let obstructors: Vec<Graha> = [Graha::Mangal, Graha::Shani]
            .into_iter()
            .filter(|&m| !asp.involves(m))
            .filter(|&m| {
                find(&aspects, m, asp.faster).is_some() || find(&aspects, m, asp.slower).is_some()
            })
            .collect();
        if !obstructors.is_empty() {
            let mut grahas = pair.clone();
            grahas.extend(obstructors);
            out.push(yoga(chart, TajikaYogaKind::Manau, grahas, Some(*asp)));
        }

        let moon_supports = !asp.involves(Graha::Chandra)
            && [asp.faster, asp.slower].into_iter().any(|g| {
                find(&aspects, Graha::Chandra, g).is_some_and(|m| m.applying)
            });
        if moon_supports {
            let mut grahas = pair.clone();
            grahas.push(Graha::Chandra);
            out.push(yoga(chart, TajikaYogaKind::Kamboola, grahas, Some(*asp)));
        } else if !asp.involves(Graha::Chandra) {
            let moon_aspects: Vec<&TajikaAspect> = aspects
                .iter()
                .filter(|a| a.involves(Graha::Chandra))
                .collect();
            if moon_aspects.is_empty() {
                let mut grahas = pair.clone();
                grahas.push(Graha::Chandra);
                out.push(yoga(chart, TajikaYogaKind::Khallasar, grahas, Some(*asp)));
            } else if let Some(helper) = SAPTA_GRAHAS.into_iter().find(|&g| {
                g != Graha::Chandra
                    && !asp.involves(g)
                    && is_strong(chart, g)
                    && moon_aspects.iter().any(|m| m.involves(g) && m.applying)
            }) {
                let mut grahas = pair.clone();
                grahas.extend([Graha::Chandra, helper]);
                out.push(yoga(chart, TajikaYogaKind::GairiKamboola, grahas, Some(*asp)));
            }
        }

        let afflicted = [asp.faster, asp.slower].into_iter().any(|g| {
            let p = chart.graha(g);
            p.retrograde || p.dignity == Some(Dignity::Debilitated)
        });
        if afflicted {
            out.push(yoga(chart, TajikaYogaKind::Radda, pair.clone(), Some(*asp)));
        }

        if chart.dignity_of(asp.slower).is_strong() && is_weak(chart, asp.faster) {
            out.push(yoga(chart, TajikaYogaKind::DuhphaliKuttha, pair.clone(), Some(*asp)));
        }
        if is_strong(chart, asp.faster) && is_weak(chart, asp.slower) {
            out.push(yoga(chart, TajikaYogaKind::DuttaKuttha, pair.clone(), Some(*asp)));
        }

        let well_placed = |g: Graha| {
            let h = chart.house_of(g);
            is_strong(chart, g) && (is_kendra(h) || is_panaphara(h))
        };
        if well_placed(asp.faster) && well_placed(asp.slower) {
            out.push(yoga(chart, TajikaYogaKind::Kuttha, pair, Some(*asp)));
        }
    }

    for (i, &a) in SAPTA_GRAHAS.iter().enumerate() {
        for &b in &SAPTA_GRAHAS[i + 1..] {
            if find(&aspects, a, b).is_some() {
                continue;
            }
            for &c in SAPTA_GRAHAS.iter().filter(|&&c| c != a && c != b) {
                if find(&aspects, c, a).is_none() || find(&aspects, c, b).is_none() {
                    continue;
                }
                let rank = c.speed_rank();
                let kind = if rank < a.speed_rank() && rank < b.speed_rank() {
                    TajikaYogaKind::Nakta
                } else if rank > a.speed_rank() && rank > b.speed_rank() {
                    TajikaYogaKind::Yamaya
                } else {
                    continue;
                };
                let (fa, sl) = if a.speed_rank() <= b.speed_rank() {
                    (a, b)
                } else {
                    (b, a)
                };
                out.push(yoga(chart, kind, vec![fa, sl, c], None));
            }
        }
    }

    for (i, &a) in SAPTA_GRAHAS.iter().enumerate() {
        for &b in &SAPTA_GRAHAS[i + 1..] {
            if find(&aspects, a, b).is_none() && forms_tamira(chart, a, b, orbs) {
                let pair = if a.speed_rank() <= b.speed_rank() {
                    vec![a, b]
                } else {
                    vec![b, a]
                };
                out.push(yoga(chart, TajikaYogaKind::Tamira, pair, None));
            }
        }
    }

    out
}

/// Faster body direct in the last degree of its sign, out of orb now and in
/// orb of an exact Tajika angle once it crosses into the next sign.
fn forms_tamira(chart: &Chart, a: Graha, b: Graha, orbs: &TajikaOrbs) -> bool {
    let Some(orb) = orbs.orb(a, b) else {
        return false;
    };
    let (faster, slower) = if a.speed_rank() <= b.speed_rank() {
        (a, b)
    } else {
        (b, a)
    };
    let fast = chart.graha(faster);
    let remaining = 30.0 - fast.degrees_in_sign;
    if fast.retrograde || remaining > TAMIRA_LAST_DEGREES {
        return false;
    }
    let slower_lon = chart.graha(slower).longitude;
    let gap = ALL_TAJIKA_ASPECTS
        .into_iter()
        .flat_map(|k| [k.angle(), 360.0 - k.angle()])
        .map(|t| forward_arc(fast.longitude, normalize_360(slower_lon + t)))
        .fold(f64::INFINITY, f64::min);
    gap > remaining && gap <= remaining + orb
}
