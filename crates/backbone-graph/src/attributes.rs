//! Attribute key introspection.

use crate::network::WeightedNetwork;
use backbone_core::NodeKey;
use std::collections::BTreeSet;

/// Lists every attribute key used by at least one node.
pub fn available_node_attributes<N: NodeKey>(network: &WeightedNetwork<N>) -> BTreeSet<String> {
    network
        .nodes()
        .flat_map(|node| node.attrs.keys().cloned())
        .collect()
}

/// Lists every attribute key used by at least one edge.
pub fn available_edge_attributes<N: NodeKey>(network: &WeightedNetwork<N>) -> BTreeSet<String> {
    network
        .edges()
        .flat_map(|(_, _, attrs)| attrs.keys().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use backbone_core::{AttrValue, Attributes};

    fn one(key: &str, value: AttrValue) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert(key.to_string(), value);
        attrs
    }

    #[test]
    fn test_union_of_keys() {
        let mut network = WeightedNetwork::new_directed();
        network.add_node(1u32, one("color", AttrValue::from("red")));
        network.add_node(2u32, one("size", AttrValue::Int(3)));
        network.add_edge(1u32, 2u32, one("weight", AttrValue::Float(1.5)));
        network.add_edge(2u32, 3u32, one("year", AttrValue::Int(1999)));

        let nodes: Vec<String> = available_node_attributes(&network).into_iter().collect();
        let edges: Vec<String> = available_edge_attributes(&network).into_iter().collect();

        assert_eq!(nodes, vec!["color", "size"]);
        assert_eq!(edges, vec!["weight", "year"]);
    }

    #[test]
    fn test_empty_network() {
        let network: WeightedNetwork<u32> = WeightedNetwork::new_undirected();
        assert!(available_node_attributes(&network).is_empty());
        assert!(available_edge_attributes(&network).is_empty());
    }
}
