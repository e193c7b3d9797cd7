//! Weighted network storage.
//!
//! WeightedNetwork wraps petgraph and adds an id index so nodes can be
//! addressed by their caller-side identifiers. Directedness is a runtime
//! property: undirected networks store each pair once and match edges in
//! either orientation.

use backbone_core::{Attributes, EdgeTable, NodeKey, ScoreError};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Index of a node in the underlying graph.
pub type NodeId = NodeIndex;

/// A node and its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode<N> {
    pub id: N,
    pub attrs: Attributes,
}

/// An attributed network, directed or undirected.
#[derive(Debug, Clone)]
pub struct WeightedNetwork<N> {
    /// The underlying petgraph graph.
    graph: DiGraph<NetworkNode<N>, Attributes>,

    /// Maps caller ids to graph node indexes.
    id_index: HashMap<N, NodeId>,

    directed: bool,
}

impl<N: NodeKey> WeightedNetwork<N> {
    pub fn new_directed() -> Self {
        Self::with_directedness(true)
    }

    pub fn new_undirected() -> Self {
        Self::with_directedness(false)
    }

    pub fn with_directedness(directed: bool) -> Self {
        Self {
            graph: DiGraph::new(),
            id_index: HashMap::new(),
            directed,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Adds a node, or merges `attrs` into an existing node's attributes.
    pub fn add_node(&mut self, id: N, attrs: Attributes) -> NodeId {
        match self.id_index.get(&id) {
            Some(&index) => {
                if let Some(node) = self.graph.node_weight_mut(index) {
                    node.attrs.extend(attrs);
                }
                index
            }
            None => {
                let index = self.graph.add_node(NetworkNode {
                    id: id.clone(),
                    attrs,
                });
                self.id_index.insert(id, index);
                index
            }
        }
    }

    /// Adds an edge, creating missing endpoints.
    ///
    /// Parallel edges are not kept: adding an existing edge merges `attrs`
    /// into it. In an undirected network `(a, b)` and `(b, a)` are the same edge.
    pub fn add_edge(&mut self, src: N, trg: N, attrs: Attributes) -> EdgeIndex {
        let from = self.add_node(src, Attributes::new());
        let to = self.add_node(trg, Attributes::new());

        match self.find_edge_index(from, to) {
            Some(edge) => {
                if let Some(existing) = self.graph.edge_weight_mut(edge) {
                    existing.extend(attrs);
                }
                edge
            }
            None => self.graph.add_edge(from, to, attrs),
        }
    }

    fn find_edge_index(&self, from: NodeId, to: NodeId) -> Option<EdgeIndex> {
        self.graph.find_edge(from, to).or_else(|| {
            if self.directed {
                None
            } else {
                self.graph.find_edge(to, from)
            }
        })
    }

    /// Gets the graph index for a node id.
    pub fn get_index(&self, id: &N) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub fn contains_node(&self, id: &N) -> bool {
        self.id_index.contains_key(id)
    }

    pub fn contains_edge(&self, src: &N, trg: &N) -> bool {
        self.edge_attributes(src, trg).is_some()
    }

    pub fn node_attributes(&self, id: &N) -> Option<&Attributes> {
        let index = self.get_index(id)?;
        self.graph.node_weight(index).map(|node| &node.attrs)
    }

    pub fn edge_attributes(&self, src: &N, trg: &N) -> Option<&Attributes> {
        let edge = self.find_edge_index(self.get_index(src)?, self.get_index(trg)?)?;
        self.graph.edge_weight(edge)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NetworkNode<N>> {
        self.graph.node_weights()
    }

    /// Iterates over edges in insertion order, as `(src, trg, attrs)`.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, &Attributes)> + '_ {
        self.graph.edge_references().filter_map(|edge_ref| {
            let src = &self.graph.node_weight(edge_ref.source())?.id;
            let trg = &self.graph.node_weight(edge_ref.target())?.id;
            Some((src, trg, edge_ref.weight()))
        })
    }

    /// Extracts the edge table, copying `weight_attribute` into `nij`.
    ///
    /// One row per stored edge, in insertion order. Undirected edges are
    /// oriented so that `src <= trg`, whichever way they were added.
    pub fn to_edge_table(&self, weight_attribute: &str) -> Result<EdgeTable<N>, ScoreError> {
        let rows = self.edges().map(|(src, trg, attrs)| {
            let (src, trg) = if !self.directed && trg < src {
                (trg, src)
            } else {
                (src, trg)
            };
            (src.clone(), trg.clone(), attrs.clone())
        });
        EdgeTable::from_attributed_edges(rows, weight_attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backbone_core::AttrValue;

    fn weight(w: f64) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("weight".to_string(), AttrValue::Float(w));
        attrs
    }

    #[test]
    fn test_add_edge_creates_nodes() {
        let mut network = WeightedNetwork::new_directed();
        network.add_edge("a", "b", weight(1.0));

        assert_eq!(network.node_count(), 2);
        assert_eq!(network.edge_count(), 1);
        assert!(network.contains_node(&"a"));
        assert!(network.contains_edge(&"a", &"b"));
        assert!(!network.contains_edge(&"b", &"a"));
    }

    #[test]
    fn test_undirected_edges_match_either_orientation() {
        let mut network = WeightedNetwork::new_undirected();
        network.add_edge("a", "b", weight(1.0));
        network.add_edge("b", "a", weight(3.0));

        assert_eq!(network.edge_count(), 1);
        assert!(network.contains_edge(&"b", &"a"));
        assert_eq!(
            network.edge_attributes(&"a", &"b").unwrap()["weight"],
            AttrValue::Float(3.0)
        );
    }

    #[test]
    fn test_add_node_merges_attributes() {
        let mut network: WeightedNetwork<&str> = WeightedNetwork::new_directed();
        let mut first = Attributes::new();
        first.insert("color".to_string(), AttrValue::from("red"));
        let mut second = Attributes::new();
        second.insert("size".to_string(), AttrValue::Int(4));

        let a = network.add_node("a", first);
        let again = network.add_node("a", second);

        assert_eq!(a, again);
        let attrs = network.node_attributes(&"a").unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["color"].as_str(), Some("red"));
    }

    #[test]
    fn test_directed_edge_table() {
        let mut network = WeightedNetwork::new_directed();
        network.add_edge("a", "b", weight(2.0));
        network.add_edge("b", "a", weight(5.0));

        let table = network.to_edge_table("weight").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].src, "b");
        assert_eq!(table.rows()[1].nij, 5.0);
    }

    #[test]
    fn test_undirected_edge_table_orients_rows() {
        let mut network = WeightedNetwork::new_undirected();
        network.add_edge("b", "a", weight(2.0));
        network.add_edge("c", "c", weight(1.0));
        network.add_edge("a", "c", weight(4.0));

        let table = network.to_edge_table("weight").unwrap();
        let rows: Vec<(&str, &str, f64)> = table.iter().map(|r| (r.src, r.trg, r.nij)).collect();
        assert_eq!(rows, vec![("a", "b", 2.0), ("c", "c", 1.0), ("a", "c", 4.0)]);
    }

    #[test]
    fn test_edge_table_requires_weight() {
        let mut network = WeightedNetwork::new_directed();
        network.add_edge("a", "b", Attributes::new());

        let err = network.to_edge_table("weight").unwrap_err();
        assert!(matches!(err, ScoreError::MissingColumn { .. }));
    }
}
