//! The edge table: one row per edge, with a raw weight and pass-through columns.

use crate::error::{Result, ScoreError};
use crate::value::{AttrValue, Attributes};
use std::fmt::Display;
use std::hash::Hash;

/// Requirements on node identifiers.
///
/// Hashing drives the marginal group-sums, the total order drives
/// undirected deduplication (`src <= trg`), and `Display` names nodes in
/// error messages.
pub trait NodeKey: Clone + Eq + Hash + Ord + Display {}

impl<T: Clone + Eq + Hash + Ord + Display> NodeKey for T {}

/// A single row of the edge table.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord<N> {
    pub src: N,
    pub trg: N,
    /// Raw observed weight the significance test runs on.
    pub nij: f64,
    /// Extra columns, passed through untouched.
    pub attrs: Attributes,
}

impl<N> EdgeRecord<N> {
    /// Creates a row without pass-through columns.
    pub fn new(src: N, trg: N, nij: f64) -> Self {
        Self {
            src,
            trg,
            nij,
            attrs: Attributes::new(),
        }
    }

    /// Adds a pass-through column.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn is_self_loop(&self) -> bool
    where
        N: PartialEq,
    {
        self.src == self.trg
    }
}

/// An immutable, ordered edge list.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeTable<N> {
    rows: Vec<EdgeRecord<N>>,
    /// Pass-through column names in first-seen order.
    columns: Vec<String>,
}

impl<N: NodeKey> EdgeTable<N> {
    /// Builds a table from rows.
    pub fn new(rows: Vec<EdgeRecord<N>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.attrs.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { rows, columns }
    }

    /// Builds a table from attributed edges, copying `weight_column` into `nij`.
    ///
    /// The weight column is kept as a pass-through column as well. Every
    /// row must carry a numeric value for it.
    pub fn from_attributed_edges<I>(edges: I, weight_column: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (N, N, Attributes)>,
    {
        let mut rows = Vec::new();
        for (row, (src, trg, attrs)) in edges.into_iter().enumerate() {
            let value = attrs
                .get(weight_column)
                .ok_or_else(|| ScoreError::MissingColumn {
                    column: weight_column.to_string(),
                    row,
                })?;
            let nij = value.as_f64().ok_or_else(|| ScoreError::NonNumericColumn {
                column: weight_column.to_string(),
                row,
            })?;
            rows.push(EdgeRecord {
                src,
                trg,
                nij,
                attrs,
            });
        }
        Ok(Self::new(rows))
    }

    pub fn rows(&self) -> &[EdgeRecord<N>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pass-through column names, in first-seen order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeRecord<N>> {
        self.rows.iter()
    }
}

impl<N: NodeKey> FromIterator<EdgeRecord<N>> for EdgeTable<N> {
    fn from_iter<I: IntoIterator<Item = EdgeRecord<N>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
