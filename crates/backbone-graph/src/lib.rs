//! Backbone Graph - Network backboning
//!
//! This crate extracts the statistically significant backbone of a
//! weighted network. It converts a network into an edge table, scores it
//! with `backbone-core`, and rebuilds a network from the edges that pass
//! the threshold.
//!
//! # Architecture
//!
//! The network uses petgraph internally with an id index for:
//! - Addressing nodes by caller-side identifiers
//! - Merging repeated edges instead of storing parallel ones
//!
//! # Example
//!
//! ```
//! use backbone_core::{AttrValue, Attributes};
//! use backbone_graph::{BackboneConfig, NetworkBackboner, WeightedNetwork};
//!
//! let mut network = WeightedNetwork::new_undirected();
//! for (a, b, w) in [("a", "b", 9), ("a", "c", 1), ("b", "c", 1), ("c", "d", 1)] {
//!     let mut attrs = Attributes::new();
//!     attrs.insert("weight".to_string(), AttrValue::Int(w));
//!     network.add_edge(a, b, attrs);
//! }
//!
//! let backboner = NetworkBackboner::new(BackboneConfig::default());
//! let backbone = backboner.backbone(&network, "weight").unwrap();
//! assert!(backbone.edge_count() <= network.edge_count());
//! ```

mod attributes;
mod backbone;
mod config;
mod error;
mod network;
mod render;

pub use attributes::{available_edge_attributes, available_node_attributes};
pub use backbone::{noise_correct_network, NetworkBackboner};
pub use config::{BackboneConfig, DEFAULT_THRESHOLD};
pub use error::{BackboneError, Result};
pub use network::{NetworkNode, NodeId, WeightedNetwork};
pub use render::{render_dot, DrawOptions, NodeStyle, Rgba};
