//! Table-wide aggregates shared by both scoring strategies.

use crate::error::{MarginalSide, Result, ScoreError};
use crate::table::{EdgeTable, NodeKey};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Marginal sums of `nij`, computed once from the unfiltered table.
#[derive(Debug, Clone)]
pub struct Marginals<N> {
    /// `ni.` by source node.
    by_source: HashMap<N, f64>,
    /// `n.j` by target node.
    by_target: HashMap<N, f64>,
    /// `n..`, the grand total.
    total: f64,
}

/// The aggregates joined onto a single row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowMarginals {
    #[serde(rename = "ni.")]
    pub ni: f64,
    #[serde(rename = "n.j")]
    pub nj: f64,
    #[serde(rename = "n..")]
    pub total: f64,
    /// Expected share of the total weight under independence.
    pub mean_prior_probability: f64,
}

impl<N: NodeKey> Marginals<N> {
    /// Validates the table and computes its marginals.
    ///
    /// Rejects empty tables, negative or non-finite weights, a total of at
    /// most 1, and any node whose source or target marginal is zero.
    pub fn compute(table: &EdgeTable<N>) -> Result<Self> {
        if table.is_empty() {
            return Err(ScoreError::EmptyTable);
        }

        let mut by_source: HashMap<N, f64> = HashMap::new();
        let mut by_target: HashMap<N, f64> = HashMap::new();
        let mut total = 0.0;

        for (row, record) in table.iter().enumerate() {
            if !record.nij.is_finite() || record.nij < 0.0 {
                return Err(ScoreError::InvalidWeight {
                    row,
                    value: record.nij,
                });
            }
            *by_source.entry(record.src.clone()).or_insert(0.0) += record.nij;
            *by_target.entry(record.trg.clone()).or_insert(0.0) += record.nij;
            total += record.nij;
        }

        if total <= 1.0 {
            return Err(ScoreError::DegenerateTotal { total });
        }

        // Smallest offending node first so the error is deterministic.
        if let Some(node) = zero_marginal(&by_source) {
            return Err(ScoreError::ZeroMarginal {
                node: node.to_string(),
                side: MarginalSide::Source,
            });
        }
        if let Some(node) = zero_marginal(&by_target) {
            return Err(ScoreError::ZeroMarginal {
                node: node.to_string(),
                side: MarginalSide::Target,
            });
        }

        debug!(
            "Marginals: {} sources, {} targets, n.. = {}",
            by_source.len(),
            by_target.len(),
            total
        );

        Ok(Self {
            by_source,
            by_target,
            total,
        })
    }

    /// Grand total `n..`.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// `ni.` for a source node, zero if the node never appears as a source.
    pub fn source_sum(&self, node: &N) -> f64 {
        self.by_source.get(node).copied().unwrap_or(0.0)
    }

    /// `n.j` for a target node, zero if the node never appears as a target.
    pub fn target_sum(&self, node: &N) -> f64 {
        self.by_target.get(node).copied().unwrap_or(0.0)
    }

    /// Joins the aggregates onto one row.
    pub fn for_edge(&self, src: &N, trg: &N) -> RowMarginals {
        let ni = self.source_sum(src);
        let nj = self.target_sum(trg);
        let total = self.total;
        RowMarginals {
            ni,
            nj,
            total,
            mean_prior_probability: ((ni * nj) / total) * (1.0 / total),
        }
    }
}

fn zero_marginal<N: NodeKey>(sums: &HashMap<N, f64>) -> Option<&N> {
    sums.iter()
        .filter(|(_, sum)| **sum <= 0.0)
        .map(|(node, _)| node)
        .min()
}
