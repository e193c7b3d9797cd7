//! Backboning configuration.
//!
//! Configuration is plain JSON. Every key is optional; missing keys take
//! the defaults below.
//!
//! ```json
//! {
//!   "threshold": 0.2,
//!   "undirected": true,
//!   "return_self_loops": false,
//!   "method": "posterior",
//!   "keep_isolated_nodes": false
//! }
//! ```

use crate::error::{BackboneError, Result};
use backbone_core::{ScoreOptions, ScoringMethod};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default significance threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackboneConfig {
    /// Edges must score strictly above this to survive.
    pub threshold: f64,

    /// Score as undirected and rebuild an undirected network.
    pub undirected: bool,

    pub return_self_loops: bool,

    pub method: ScoringMethod,

    /// Keep nodes whose edges were all filtered out.
    pub keep_isolated_nodes: bool,
}

impl Default for BackboneConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            undirected: true,
            return_self_loops: false,
            method: ScoringMethod::Posterior,
            keep_isolated_nodes: false,
        }
    }
}

impl BackboneConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading backbone config from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_method(mut self, method: ScoringMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_undirected(mut self, undirected: bool) -> Self {
        self.undirected = undirected;
        self
    }

    pub fn with_self_loops(mut self, return_self_loops: bool) -> Self {
        self.return_self_loops = return_self_loops;
        self
    }

    pub fn with_isolated_nodes(mut self, keep_isolated_nodes: bool) -> Self {
        self.keep_isolated_nodes = keep_isolated_nodes;
        self
    }

    /// Rejects a NaN threshold, which would silently drop every edge.
    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_nan() {
            return Err(BackboneError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    /// The scorer options this configuration implies.
    pub fn score_options(&self) -> ScoreOptions {
        ScoreOptions {
            undirected: self.undirected,
            return_self_loops: self.return_self_loops,
            method: self.method,
        }
    }
}
