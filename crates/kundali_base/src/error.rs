//! Error types for pure Vedic chart calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from chart, varga, and dasha calculations.
///
/// Every operation in this crate is total over well-formed input; the only
/// failure is a malformed argument.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum VedicError {
    /// An argument is outside its valid domain (non-finite longitude,
    /// division factor of zero, dasha depth out of range, ...).
    InvalidInput(&'static str),
}

impl Display for VedicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for VedicError {}
