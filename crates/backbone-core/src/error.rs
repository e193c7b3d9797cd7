//! Error types for edge significance scoring.
//!
//! Every variant names the precondition that was violated. Scoring is
//! all-or-nothing: validation runs before any row is produced.

use thiserror::Error;

/// Which side of an edge a marginal sum was taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginalSide {
    /// `ni.`, summed over rows sharing a source.
    Source,
    /// `n.j`, summed over rows sharing a target.
    Target,
}

impl std::fmt::Display for MarginalSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarginalSide::Source => write!(f, "source (ni.)"),
            MarginalSide::Target => write!(f, "target (n.j)"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Missing column '{column}' in row {row}")]
    MissingColumn { column: String, row: usize },

    #[error("Column '{column}' in row {row} is not numeric")]
    NonNumericColumn { column: String, row: usize },

    #[error("Edge table is empty")]
    EmptyTable,

    #[error("Invalid weight {value} in row {row}: nij must be finite and non-negative")]
    InvalidWeight { row: usize, value: f64 },

    #[error("Total weight n.. = {total} must be greater than 1")]
    DegenerateTotal { total: f64 },

    #[error("Node '{node}' has zero {side} marginal")]
    ZeroMarginal { node: String, side: MarginalSide },

    #[error("Numeric error: {0}")]
    Numeric(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
