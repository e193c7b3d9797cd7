//! Error types for backboning and configuration.

use backbone_core::ScoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackboneError {
    #[error("Scoring error: {0}")]
    Score(#[from] ScoreError),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for BackboneError {
    fn from(e: serde_json::Error) -> Self {
        BackboneError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BackboneError>;
