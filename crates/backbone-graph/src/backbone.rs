//! Network backboning: score, filter, rebuild.
//!
//! The backboner turns a network into an edge table, scores it, keeps
//! edges scoring above the threshold and rebuilds a network from them.
//! The input network is never modified.

use crate::config::BackboneConfig;
use crate::error::Result;
use crate::network::WeightedNetwork;
use backbone_core::{AttrValue, EdgeSignificanceScorer, NodeKey, ScoringMethod};
use tracing::{debug, info};

/// Extracts the significant backbone of weighted networks.
#[derive(Debug, Clone, Default)]
pub struct NetworkBackboner {
    config: BackboneConfig,
}

impl NetworkBackboner {
    pub fn new(config: BackboneConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BackboneConfig {
        &self.config
    }

    /// Returns the backbone of `network`, scoring on `weight_attribute`.
    ///
    /// Surviving edges carry `nij`, `score` and their original attributes.
    /// The result is undirected when the config says so, directed otherwise.
    /// Nodes keep their original attributes; nodes with no surviving edge
    /// are dropped unless `keep_isolated_nodes` is set.
    pub fn backbone<N: NodeKey>(
        &self,
        network: &WeightedNetwork<N>,
        weight_attribute: &str,
    ) -> Result<WeightedNetwork<N>> {
        self.config.validate()?;

        let table = network.to_edge_table(weight_attribute)?;
        let scored = EdgeSignificanceScorer::new(self.config.score_options()).score(&table)?;
        debug!(
            "Scored {} of {} extracted edges on '{}'",
            scored.len(),
            table.len(),
            weight_attribute
        );

        let mut backbone = WeightedNetwork::with_directedness(!self.config.undirected);
        if self.config.keep_isolated_nodes {
            for node in network.nodes() {
                backbone.add_node(node.id.clone(), node.attrs.clone());
            }
        }

        let threshold = self.config.threshold;
        for row in scored.into_rows() {
            if row.score <= threshold {
                continue;
            }
            let mut attrs = row.attrs;
            attrs.insert("nij".to_string(), AttrValue::Float(row.nij));
            attrs.insert("score".to_string(), AttrValue::Float(row.score));
            backbone.add_edge(row.src, row.trg, attrs);
        }

        // Reattach node attributes to nodes created from edges.
        let ids: Vec<N> = backbone.nodes().map(|node| node.id.clone()).collect();
        for id in ids {
            if let Some(attrs) = network.node_attributes(&id) {
                backbone.add_node(id, attrs.clone());
            }
        }

        info!(
            "Backbone kept {} of {} edges and {} of {} nodes (threshold {}, {} scoring)",
            backbone.edge_count(),
            network.edge_count(),
            backbone.node_count(),
            network.node_count(),
            threshold,
            self.config.method
        );

        Ok(backbone)
    }
}

/// Backbones a network with flag-style options.
pub fn noise_correct_network<N: NodeKey>(
    network: &WeightedNetwork<N>,
    weight_attribute: &str,
    threshold: f64,
    undirected: bool,
    return_self_loops: bool,
    calculate_p_value: bool,
) -> Result<WeightedNetwork<N>> {
    let config = BackboneConfig::default()
        .with_threshold(threshold)
        .with_undirected(undirected)
        .with_self_loops(return_self_loops)
        .with_method(ScoringMethod::from_p_value_flag(calculate_p_value));
    NetworkBackboner::new(config).backbone(network, weight_attribute)
}
