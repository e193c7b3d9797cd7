//! Edge significance scoring over an edge table.
//!
//! Both strategies share the marginal aggregation and the row filters;
//! they differ only in how a single row is turned into a score.

use crate::error::Result;
use crate::marginals::Marginals;
use crate::posterior::posterior_score;
use crate::pvalue::p_value_score;
use crate::scored::{ScoredEdge, ScoredTable, POSTERIOR_COLUMNS, P_VALUE_COLUMNS};
use crate::table::{EdgeTable, NodeKey};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// How a row is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    /// Beta-Binomial posterior score in (-1, 1), with its intermediates.
    #[default]
    Posterior,
    /// Binomial CDF of the observed weight, in [0, 1].
    PValue,
}

impl ScoringMethod {
    /// Maps a `calculate_p_value` flag onto a method.
    pub fn from_p_value_flag(calculate_p_value: bool) -> Self {
        if calculate_p_value {
            ScoringMethod::PValue
        } else {
            ScoringMethod::Posterior
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMethod::Posterior => "posterior",
            ScoringMethod::PValue => "p_value",
        }
    }
}

impl std::fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scorer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreOptions {
    /// Keep one row per unordered pair, the one with `src <= trg`.
    pub undirected: bool,
    /// Keep rows with `src == trg`.
    pub return_self_loops: bool,
    pub method: ScoringMethod,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            undirected: true,
            return_self_loops: false,
            method: ScoringMethod::Posterior,
        }
    }
}

impl ScoreOptions {
    pub fn new(undirected: bool, return_self_loops: bool, calculate_p_value: bool) -> Self {
        Self {
            undirected,
            return_self_loops,
            method: ScoringMethod::from_p_value_flag(calculate_p_value),
        }
    }
}

/// Scores every edge of a table against the independence null model.
#[derive(Debug, Clone, Default)]
pub struct EdgeSignificanceScorer {
    options: ScoreOptions,
}

impl EdgeSignificanceScorer {
    pub fn new(options: ScoreOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScoreOptions {
        &self.options
    }

    /// Scores `table` and returns a new table; the input is not modified.
    ///
    /// Marginals are taken over the full input. Self-loops are dropped
    /// next (unless requested), then undirected duplicates.
    pub fn score<N: NodeKey>(&self, table: &EdgeTable<N>) -> Result<ScoredTable<N>> {
        let marginals = Marginals::compute(table)?;
        let method = self.options.method;
        let derived: &[&str] = match method {
            ScoringMethod::Posterior => &POSTERIOR_COLUMNS,
            ScoringMethod::PValue => &P_VALUE_COLUMNS,
        };

        let mut rows = Vec::with_capacity(table.len());
        for record in table.iter() {
            let row_marginals = marginals.for_edge(&record.src, &record.trg);

            let (score, posterior) = match method {
                ScoringMethod::Posterior => {
                    let (score, stats) = posterior_score(record.nij, &row_marginals);
                    (score, Some(stats))
                }
                ScoringMethod::PValue => (p_value_score(record.nij, &row_marginals)?, None),
            };

            let attrs = record
                .attrs
                .iter()
                .filter(|(key, _)| !derived.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();

            rows.push(ScoredEdge {
                src: record.src.clone(),
                trg: record.trg.clone(),
                nij: record.nij,
                score,
                marginals: row_marginals,
                posterior,
                attrs,
            });
        }

        let scored = rows.len();
        let rows = prune(rows, &self.options);

        let degenerate = rows
            .iter()
            .filter(|row| matches!(row.posterior, Some(stats) if stats.beta.is_none()))
            .count();
        if degenerate > 0 {
            warn!(
                "{} edges have zero prior variance; their posterior variance is undefined",
                degenerate
            );
        }

        debug!(
            "Scored {} edges with {} method, {} kept after filtering",
            scored,
            method,
            rows.len()
        );

        Ok(ScoredTable::new(method, rows, table.columns().to_vec()))
    }
}

/// Drops self-loops, then undirected duplicates.
fn prune<N: NodeKey>(mut rows: Vec<ScoredEdge<N>>, options: &ScoreOptions) -> Vec<ScoredEdge<N>> {
    if !options.return_self_loops {
        rows.retain(|row| !row.is_self_loop());
    }

    if options.undirected {
        let mut seen: HashSet<(N, N)> = HashSet::new();
        rows.retain(|row| row.src <= row.trg && seen.insert((row.src.clone(), row.trg.clone())));
    }

    rows
}

/// Scores an edge table with flag-style options.
pub fn get_edge_significance<N: NodeKey>(
    table: &EdgeTable<N>,
    undirected: bool,
    return_self_loops: bool,
    calculate_p_value: bool,
) -> Result<ScoredTable<N>> {
    EdgeSignificanceScorer::new(ScoreOptions::new(
        undirected,
        return_self_loops,
        calculate_p_value,
    ))
    .score(table)
}
