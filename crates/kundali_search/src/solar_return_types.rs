//! Types for the solar-return search.

use serde::{Deserialize, Serialize};

/// Mean sidereal year in days, used to place the search window.
pub const SIDEREAL_YEAR_DAYS: f64 = 365.256_363;

/// Configuration for the solar-return search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarReturnConfig {
    /// Half-width of the search window around the anniversary estimate, days.
    pub window_days: f64,
    /// Coarse scan step size in days.
    pub step_days: f64,
    /// Target residual between annual and natal Sun, arc-seconds.
    pub tolerance_arcsec: f64,
    /// Maximum bisection iterations (default 60).
    pub max_iterations: u32,
}

impl Default for SolarReturnConfig {
    fn default() -> Self {
        Self {
            window_days: 3.0,
            step_days: 0.5,
            tolerance_arcsec: 1.0,
            max_iterations: 60,
        }
    }
}

impl SolarReturnConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.window_days.is_finite() || self.window_days <= 0.0 {
            return Err("window_days must be positive");
        }
        if !self.step_days.is_finite() || self.step_days <= 0.0 {
            return Err("step_days must be positive");
        }
        if !self.tolerance_arcsec.is_finite() || self.tolerance_arcsec <= 0.0 {
            return Err("tolerance_arcsec must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        Ok(())
    }
}

/// A located solar return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarReturn {
    /// Completed years of life at this return.
    pub completed_years: u32,
    /// Return instant, JD UT.
    pub jd_ut: f64,
    /// Natal sidereal Sun, degrees.
    pub natal_sun: f64,
    /// Sidereal Sun at the return instant, degrees.
    pub sun_longitude: f64,
    /// |sun_longitude - natal_sun| in arc-seconds.
    pub residual_arcsec: f64,
    /// Bisection iterations used.
    pub iterations: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let c = SolarReturnConfig::default();
        assert_eq!(c.max_iterations, 60);
        assert!((c.tolerance_arcsec - 1.0).abs() < 1e-12);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_zero_step_and_iterations() {
        let mut c = SolarReturnConfig::default();
        c.step_days = 0.0;
        assert!(c.validate().is_err());
        let mut c = SolarReturnConfig::default();
        c.max_iterations = 0;
        assert!(c.validate().is_err());
        let mut c = SolarReturnConfig::default();
        c.window_days = f64::NAN;
        assert!(c.validate().is_err());
    }
}
