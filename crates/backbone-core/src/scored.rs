//! Scored edge tables and their fixed output schema.

use crate::error::Result;
use crate::marginals::RowMarginals;
use crate::posterior::PosteriorStats;
use crate::scorer::ScoringMethod;
use crate::table::NodeKey;
use crate::value::Attributes;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Leading columns of a posterior-scored table, in output order.
pub const POSTERIOR_COLUMNS: [&str; 11] = [
    "src",
    "trg",
    "nij",
    "score",
    "sdev_cij",
    "variance_cij",
    "d",
    "expected_pij",
    "variance_nij",
    "kappa",
    "var_prior_probability",
];

/// The only columns of a p-value-scored table.
pub const P_VALUE_COLUMNS: [&str; 4] = ["src", "trg", "nij", "score"];

/// A scored row.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEdge<N> {
    pub src: N,
    pub trg: N,
    pub nij: f64,
    pub score: f64,
    /// `ni.`, `n.j`, `n..` and the prior mean joined onto this row.
    pub marginals: RowMarginals,
    /// Present for posterior scoring only.
    pub posterior: Option<PosteriorStats>,
    /// Pass-through columns. Names that collide with a derived column
    /// are dropped.
    pub attrs: Attributes,
}

impl<N> ScoredEdge<N> {
    pub fn is_self_loop(&self) -> bool
    where
        N: PartialEq,
    {
        self.src == self.trg
    }
}

/// Output of the scorer.
///
/// Rows keep their pass-through attributes in both modes, but the exposed
/// schema (`columns`, serialization) of a p-value table is exactly
/// `src, trg, nij, score`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTable<N> {
    method: ScoringMethod,
    rows: Vec<ScoredEdge<N>>,
    pass_through: Vec<String>,
}

impl<N: NodeKey> ScoredTable<N> {
    pub(crate) fn new(
        method: ScoringMethod,
        rows: Vec<ScoredEdge<N>>,
        pass_through: Vec<String>,
    ) -> Self {
        Self {
            method,
            rows,
            pass_through,
        }
    }

    pub fn method(&self) -> ScoringMethod {
        self.method
    }

    pub fn rows(&self) -> &[ScoredEdge<N>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ScoredEdge<N>> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredEdge<N>> {
        self.rows.iter()
    }

    /// Output column names in schema order.
    pub fn columns(&self) -> Vec<String> {
        match self.method {
            ScoringMethod::PValue => P_VALUE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            ScoringMethod::Posterior => POSTERIOR_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .chain(
                    self.pass_through
                        .iter()
                        .filter(|c| !POSTERIOR_COLUMNS.contains(&c.as_str()))
                        .cloned(),
                )
                .collect(),
        }
    }

    /// Serializes the rows as a JSON array of objects in schema order.
    pub fn to_json(&self) -> Result<String>
    where
        N: Serialize,
    {
        Ok(serde_json::to_string(self)?)
    }
}

impl<N: NodeKey + Serialize> Serialize for ScoredTable<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let columns = self.columns();
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowView {
                row,
                columns: &columns,
            })?;
        }
        seq.end()
    }
}

struct RowView<'a, N> {
    row: &'a ScoredEdge<N>,
    columns: &'a [String],
}

impl<N: Serialize> Serialize for RowView<'_, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let row = self.row;
        let stats = row.posterior.as_ref();
        let beta = stats.and_then(|s| s.beta.as_ref());

        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in self.columns {
            match column.as_str() {
                "src" => map.serialize_entry(column, &row.src)?,
                "trg" => map.serialize_entry(column, &row.trg)?,
                "nij" => map.serialize_entry(column, &row.nij)?,
                "score" => map.serialize_entry(column, &row.score)?,
                "sdev_cij" => map.serialize_entry(column, &beta.map(|b| b.sdev_cij))?,
                "variance_cij" => map.serialize_entry(column, &beta.map(|b| b.variance_cij))?,
                "d" => map.serialize_entry(column, &stats.map(|s| s.d))?,
                "expected_pij" => map.serialize_entry(column, &beta.map(|b| b.expected_pij))?,
                "variance_nij" => map.serialize_entry(column, &beta.map(|b| b.variance_nij))?,
                "kappa" => map.serialize_entry(column, &stats.map(|s| s.kappa))?,
                "var_prior_probability" => {
                    map.serialize_entry(column, &stats.map(|s| s.var_prior_probability))?
                }
                other => map.serialize_entry(column, &row.attrs.get(other))?,
            }
        }
        map.end()
    }
}
