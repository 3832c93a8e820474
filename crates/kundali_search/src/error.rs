//! Error type for the orchestration layer.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kundali_base::VedicError;

/// Errors from birth-data handling, ephemeris access and event search.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// Caller-supplied data is malformed (date-time, timezone, coordinates,
    /// config values) or rejected by the chart engine.
    InvalidInput(String),
    /// The ephemeris collaborator could not produce usable positions.
    EphemerisUnavailable(String),
    /// An iterative search did not bracket or converge on its target.
    ConvergenceFailure(&'static str),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::EphemerisUnavailable(msg) => write!(f, "ephemeris unavailable: {msg}"),
            Self::ConvergenceFailure(msg) => write!(f, "convergence failure: {msg}"),
        }
    }
}

impl Error for SearchError {}

impl From<VedicError> for SearchError {
    fn from(e: VedicError) -> Self {
        match e {
            VedicError::InvalidInput(msg) => Self::InvalidInput(msg.to_string()),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vedic_error_converts_to_invalid_input() {
        let e: SearchError = VedicError::InvalidInput("dasha depth must be in 1..=5").into();
        assert_eq!(
            e,
            SearchError::InvalidInput("dasha depth must be in 1..=5".to_string())
        );
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            SearchError::ConvergenceFailure("no bracket").to_string(),
            "convergence failure: no bracket"
        );
        assert_eq!(
            SearchError::EphemerisUnavailable("NaN sun".into()).to_string(),
            "ephemeris unavailable: NaN sun"
        );
    }
}
