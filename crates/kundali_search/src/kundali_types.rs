//! Configuration and result types for chart orchestration.
//!
//! Every config struct has classical defaults and deserializes with
//! `#[serde(default)]`, so a TOML file only needs the keys it overrides.

use kundali_base::{
    AshtakavargaTable, BalanceMode, Chart, DEFAULT_DASHA_DEPTH, DEFAULT_SAHAMS, DashaOptions,
    DashaSystem, DashaTree, MAX_DASHA_DEPTH, ManglikReport, SahamFormula, SiderealPositions,
    TajikaOrbs, VarshaphalaOptions, YogaMatch,
};
use serde::{Deserialize, Serialize};

use crate::birth::GeoLocation;
use crate::solar_return_types::SolarReturnConfig;

/// Dasha selection for a birth chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashaConfig {
    pub system: DashaSystem,
    /// Levels to build, 1..=5.
    pub depth: u8,
    /// Years covered by the roots; `None` means one full cycle.
    pub span_years: Option<f64>,
    pub balance_mode: BalanceMode,
}

impl Default for DashaConfig {
    fn default() -> Self {
        Self {
            system: DashaSystem::Vimshottari,
            depth: DEFAULT_DASHA_DEPTH,
            span_years: None,
            balance_mode: BalanceMode::Compressed,
        }
    }
}

impl DashaConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.depth == 0 || self.depth > MAX_DASHA_DEPTH {
            return Err("dasha depth must be in 1..=5");
        }
        if let Some(years) = self.span_years {
            if !years.is_finite() || years <= 0.0 {
                return Err("dasha span_years must be positive");
            }
        }
        Ok(())
    }

    /// Tree options for the pure builder.
    pub fn options(&self) -> DashaOptions {
        let opts = DashaOptions {
            depth: self.depth,
            span_days: None,
            balance_mode: self.balance_mode,
        };
        match (self.system, self.span_years) {
            (_, Some(years)) => opts.with_span_years(years),
            (DashaSystem::Mudda, None) => DashaOptions {
                depth: self.depth,
                ..DashaOptions::mudda()
            },
            _ => opts,
        }
    }
}

/// Annual chart settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarshaphalaConfig {
    /// Mudda dasha depth, 1..=5.
    pub mudda_depth: u8,
    pub orbs: TajikaOrbs,
    /// Apply the +30 degree saham correction.
    pub saham_correction: bool,
    /// Cast the annual chart here instead of the birthplace.
    pub relocation: Option<GeoLocation>,
    pub solar_return: SolarReturnConfig,
    /// Saham formula table; set programmatically.
    #[serde(skip, default = "default_sahams")]
    pub sahams: &'static [SahamFormula],
}

fn default_sahams() -> &'static [SahamFormula] {
    DEFAULT_SAHAMS
}

impl Default for VarshaphalaConfig {
    fn default() -> Self {
        let options = VarshaphalaOptions::default();
        Self {
            mudda_depth: options.mudda_depth,
            orbs: options.orbs,
            saham_correction: options.saham_correction,
            relocation: None,
            solar_return: SolarReturnConfig::default(),
            sahams: options.sahams,
        }
    }
}

impl VarshaphalaConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.mudda_depth == 0 || self.mudda_depth > MAX_DASHA_DEPTH {
            return Err("mudda_depth must be in 1..=5");
        }
        let orbs = [
            self.orbs.sun,
            self.orbs.moon,
            self.orbs.mars,
            self.orbs.mercury,
            self.orbs.jupiter,
            self.orbs.venus,
            self.orbs.saturn,
        ];
        if orbs.iter().any(|o| !o.is_finite() || *o < 0.0) {
            return Err("tajika orbs must be finite and non-negative");
        }
        if let Some(loc) = &self.relocation {
            if loc.validate().is_err() {
                return Err("relocation coordinates out of range");
            }
        }
        self.solar_return.validate()
    }

    /// Options for the pure annual-chart builder.
    pub fn options(&self) -> VarshaphalaOptions {
        VarshaphalaOptions {
            mudda_depth: self.mudda_depth,
            orbs: self.orbs,
            sahams: self.sahams,
            saham_correction: self.saham_correction,
        }
    }
}

/// Sections of a full birth reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KundaliConfig {
    /// Divisional charts to derive from D1 (division factors).
    pub vargas: Vec<u16>,
    pub include_dasha: bool,
    pub include_ashtakavarga: bool,
    pub include_yogas: bool,
    pub include_manglik: bool,
    pub dasha: DashaConfig,
    pub varshaphala: VarshaphalaConfig,
}

impl Default for KundaliConfig {
    fn default() -> Self {
        Self {
            vargas: vec![9],
            include_dasha: true,
            include_ashtakavarga: true,
            include_yogas: true,
            include_manglik: true,
            dasha: DashaConfig::default(),
            varshaphala: VarshaphalaConfig::default(),
        }
    }
}

impl KundaliConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.vargas.contains(&0) {
            return Err("varga division must be >= 1");
        }
        self.dasha.validate()?;
        self.varshaphala.validate()
    }
}

/// A full birth reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kundali {
    /// Birth instant, JD UT.
    pub birth_jd: f64,
    pub location: GeoLocation,
    pub positions: SiderealPositions,
    /// Rashi (D1) chart.
    pub chart: Chart,
    /// Requested divisional charts, in config order.
    pub vargas: Vec<Chart>,
    pub dasha: Option<DashaTree>,
    pub ashtakavarga: Option<AshtakavargaTable>,
    pub yogas: Option<Vec<YogaMatch>>,
    pub manglik: Option<ManglikReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kundali_base::DAYS_PER_YEAR;

    #[test]
    fn defaults_validate() {
        assert!(KundaliConfig::default().validate().is_ok());
        assert!(DashaConfig::default().validate().is_ok());
        assert!(VarshaphalaConfig::default().validate().is_ok());
    }

    #[test]
    fn dasha_options_follow_system() {
        let cfg = DashaConfig {
            system: DashaSystem::Mudda,
            depth: 3,
            ..DashaConfig::default()
        };
        let opts = cfg.options();
        assert_eq!(opts.depth, 3);
        assert_eq!(opts.span_days, Some(DAYS_PER_YEAR));

        let cfg = DashaConfig {
            span_years: Some(2.0),
            ..DashaConfig::default()
        };
        assert_eq!(cfg.options().span_days, Some(2.0 * DAYS_PER_YEAR));
        assert_eq!(DashaConfig::default().options().span_days, None);
    }

    #[test]
    fn bad_values_rejected() {
        let cfg = DashaConfig {
            depth: 6,
            ..DashaConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = KundaliConfig {
            vargas: vec![9, 0],
            ..KundaliConfig::default()
        };
        assert!(cfg.validate().is_err());
        let mut cfg = VarshaphalaConfig::default();
        cfg.orbs.moon = -1.0;
        assert!(cfg.validate().is_err());
        let cfg = VarshaphalaConfig {
            relocation: Some(GeoLocation {
                latitude: 95.0,
                longitude: 0.0,
            }),
            ..VarshaphalaConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
