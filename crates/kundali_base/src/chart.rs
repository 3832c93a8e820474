//! Chart assembly: normalized placements, houses, dignity, and varga derivation.
//!
//! A [`Chart`] is a pure value built from one set of [`SiderealPositions`].
//! Deriving a varga never mutates the source chart; it re-maps the source
//! (D1) longitudes through [`varga_longitude`] into a new chart.

use serde::Serialize;

use crate::dignity::{Dignity, dignity_in_rashi, is_combust};
use crate::error::VedicError;
use crate::graha::{ALL_GRAHAS, Body, Graha, rashi_lord};
use crate::house::{house_from, sign_of_house};
use crate::nakshatra::Nakshatra;
use crate::position::{SiderealPositions, normalize_position};
use crate::rashi::{Dms, Rashi};
use crate::varga::{Varga, is_vargottama, varga_longitude};

/// What a chart represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    /// Natal divisional chart (D1 is the rashi chart itself).
    Varga(Varga),
    /// Annual solar-return chart.
    Varshaphala,
}

/// One body placed in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub body: Body,
    /// Longitude in this chart's frame (varga longitude for D-N charts).
    pub longitude: f64,
    /// Always false for the lagna.
    pub retrograde: bool,
    pub rashi: Rashi,
    /// 1-based sign number.
    pub sign: u8,
    pub degrees_in_sign: f64,
    pub dms: Dms,
    pub nakshatra: Nakshatra,
    pub pada: u8,
    /// Whole-sign house from this chart's ascendant (lagna is house 1).
    pub house: u8,
    /// `None` for the lagna.
    pub dignity: Option<Dignity>,
    /// D9 sign equals D1 sign (always evaluated on the source longitude).
    pub vargottama: bool,
    /// Within the combustion orb of the Sun (source longitudes).
    pub combust: bool,
}

/// A complete chart: lagna plus the nine grahas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub lagna: Placement,
    /// Indexed by [`Graha::index`].
    pub grahas: [Placement; 9],
    #[serde(skip)]
    source: SiderealPositions,
}

fn place(
    body: Body,
    chart_lon: f64,
    source_lon: f64,
    retrograde: bool,
    ascendant: Rashi,
    combust: bool,
) -> Placement {
    let p = normalize_position(chart_lon);
    Placement {
        body,
        longitude: p.longitude,
        retrograde,
        rashi: p.rashi,
        sign: p.sign,
        degrees_in_sign: p.degrees_in_sign,
        dms: p.dms,
        nakshatra: p.nakshatra,
        pada: p.pada,
        house: house_from(ascendant, p.rashi),
        dignity: body.graha().map(|g| dignity_in_rashi(g, p.rashi)),
        vargottama: is_vargottama(source_lon),
        combust,
    }
}

impl Chart {
    /// Build the D1 (rashi) chart.
    pub fn from_positions(positions: &SiderealPositions) -> Result<Self, VedicError> {
        Self::build(positions, ChartKind::Varga(Varga::D1), 1)
    }

    /// Build the annual chart for a solar-return instant.
    pub fn varshaphala(positions: &SiderealPositions) -> Result<Self, VedicError> {
        Self::build(positions, ChartKind::Varshaphala, 1)
    }

    /// Build the D-`n` chart directly from positions.
    pub fn divisional(positions: &SiderealPositions, n: u16) -> Result<Self, VedicError> {
        let varga = Varga::from_divisions(n)?;
        Self::build(positions, ChartKind::Varga(varga), n)
    }

    fn build(
        positions: &SiderealPositions,
        kind: ChartKind,
        n: u16,
    ) -> Result<Self, VedicError> {
        positions.validate()?;

        let lagna_lon = varga_longitude(positions.lagna, n);
        let ascendant = normalize_position(lagna_lon).rashi;
        let sun_lon = positions.longitude(Graha::Surya);

        let lagna = place(Body::Lagna, lagna_lon, positions.lagna, false, ascendant, false);
        let grahas = ALL_GRAHAS.map(|g| {
            let src = positions.longitude(g);
            let retro = positions.is_retrograde(g);
            place(
                Body::Graha(g),
                varga_longitude(src, n),
                src,
                retro,
                ascendant,
                is_combust(g, src, sun_lon, retro),
            )
        });

        Ok(Self {
            kind,
            lagna,
            grahas,
            source: *positions,
        })
    }

    /// Derive the D-`n` chart from this chart's source positions.
    ///
    /// `varga(1)` of a D1 chart equals the chart itself.
    pub fn varga(&self, n: u16) -> Result<Self, VedicError> {
        Self::divisional(&self.source, n)
    }

    /// Positions this chart was built from.
    pub fn source(&self) -> &SiderealPositions {
        &self.source
    }

    /// Ascendant sign.
    pub fn ascendant(&self) -> Rashi {
        self.lagna.rashi
    }

    pub fn graha(&self, graha: Graha) -> &Placement {
        &self.grahas[graha.index() as usize]
    }

    /// House of a graha, 1..=12.
    pub fn house_of(&self, graha: Graha) -> u8 {
        self.graha(graha).house
    }

    pub fn rashi_of(&self, graha: Graha) -> Rashi {
        self.graha(graha).rashi
    }

    /// Dignity of a graha (always `Some` for grahas).
    pub fn dignity_of(&self, graha: Graha) -> Dignity {
        self.graha(graha).dignity.unwrap_or(Dignity::Neutral)
    }

    /// Sign occupying `house`.
    pub fn sign_of_house(&self, house: u8) -> Rashi {
        sign_of_house(self.ascendant(), house)
    }

    /// Lord of `house`.
    pub fn house_lord(&self, house: u8) -> Graha {
        rashi_lord(self.sign_of_house(house))
    }

    /// Grahas occupying `house`, in graha order.
    pub fn grahas_in_house(&self, house: u8) -> impl Iterator<Item = Graha> + '_ {
        self.grahas
            .iter()
            .filter(move |p| p.house == house)
            .filter_map(|p| p.body.graha())
    }

    /// Lagna followed by the nine grahas.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        std::iter::once(&self.lagna).chain(self.grahas.iter())
    }

    /// House of `graha` counted from the sign of `reference`.
    pub fn house_from_graha(&self, reference: Graha, graha: Graha) -> u8 {
        house_from(self.rashi_of(reference), self.rashi_of(graha))
    }
}
