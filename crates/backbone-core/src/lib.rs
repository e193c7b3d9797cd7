//! Backbone Core - Edge significance scoring
//!
//! This crate scores the edges of a weighted network against a null model
//! of random noise (Coscia & Neffke, "Network Backboning with Noisy Data").
//! It works on a plain edge table and knows nothing about graph storage.
//!
//! # Architecture
//!
//! Scoring is a single pass over the table:
//! - Marginal sums `ni.`, `n.j` and the total `n..` are computed once
//! - Each row is scored by one of two strategies (posterior or p-value)
//! - Self-loops and undirected duplicates are filtered last
//!
//! # Example
//!
//! ```
//! use backbone_core::{get_edge_significance, EdgeRecord, EdgeTable};
//!
//! let table: EdgeTable<&str> = vec![
//!     EdgeRecord::new("A", "B", 10.0),
//!     EdgeRecord::new("A", "C", 5.0),
//!     EdgeRecord::new("B", "C", 1.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! let scored = get_edge_significance(&table, true, false, false).unwrap();
//! assert_eq!(scored.len(), 3);
//! ```

mod error;
mod marginals;
mod posterior;
mod pvalue;
mod scored;
mod scorer;
mod table;
mod value;

pub use error::{MarginalSide, Result, ScoreError};
pub use marginals::{Marginals, RowMarginals};
pub use posterior::{posterior_score, BetaPosterior, PosteriorStats};
pub use pvalue::{binomial_cdf, p_value_score};
pub use scored::{ScoredEdge, ScoredTable, POSTERIOR_COLUMNS, P_VALUE_COLUMNS};
pub use scorer::{get_edge_significance, EdgeSignificanceScorer, ScoreOptions, ScoringMethod};
pub use table::{EdgeRecord, EdgeTable, NodeKey};
pub use value::{AttrValue, Attributes};
