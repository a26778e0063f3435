//! Error taxonomy for the layout engine.
//!
//! Every failure is local and synchronous: an operation either returns its
//! full result or one of these errors, never a partially computed value.

use thiserror::Error;

/// Which of the two shape parameters a dimension error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Primary,
    Secondary,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Secondary => f.write_str("secondary"),
        }
    }
}

/// Errors raised by geometry, rule evaluation, layout editing and export.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Shape tag outside the preset set (e.g. `"torus"`).
    #[error("invalid shape kind: {0:?}")]
    InvalidShapeKind(String),
    /// Zero, negative or non-finite shape dimension.
    #[error("invalid {dimension} dimension: {value}")]
    InvalidDimension { dimension: Dimension, value: f64 },
    /// Crew size or mission length of zero.
    #[error("invalid mission context: crew={crew_size}, days={mission_days}")]
    InvalidMissionContext { crew_size: u32, mission_days: u32 },
    /// Empty zone name, or a negative/non-finite zone area.
    #[error("invalid zone: {0}")]
    InvalidZone(String),
    /// Negative or non-finite floor area passed to rule evaluation.
    #[error("invalid floor area: {0}")]
    InvalidFloorArea(f64),
    /// No zone with this id in the layout.
    #[error("unknown zone id {0}")]
    UnknownZone(u32),
    #[error("export serialization failed: {0}")]
    Export(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
