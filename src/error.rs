//! Error types for the decision engine.
//!
//! Config and frame parsing report errors to the caller. Inside a turn only
//! [`StrategyError::NoLegalSpawn`] escapes a decision function; per-point
//! placement failures are recovered where they happen and malformed frame
//! events are skipped.

use crate::location::Location;
use crate::units::UnitType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("no legal spawn among {candidates} candidate locations")]
    NoLegalSpawn { candidates: usize },

    #[error("malformed {kind} event: {reason}")]
    MalformedEvent { kind: &'static str, reason: String },

    #[error("cannot afford {unit:?} at {location}: needs {needed}, {available} left")]
    InsufficientResource {
        unit: UnitType,
        location: Location,
        needed: f64,
        available: f64,
    },

    #[error("cannot {action} at {location}: {reason}")]
    IllegalPlacement {
        action: &'static str,
        location: Location,
        reason: &'static str,
    },

    #[error("action frame is not valid JSON: {0}")]
    Frame(#[source] serde_json::Error),

    #[error("strategy config could not be parsed: {0}")]
    Config(#[source] serde_json::Error),

    #[error("invalid strategy config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, StrategyError>;
