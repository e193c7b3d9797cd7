//! Graphviz DOT rendering.
//!
//! A thin export for inspecting a backbone with standard Graphviz tools.
//! No layout is computed here: positions are written only when supplied.

use crate::network::WeightedNetwork;
use backbone_core::{AttrValue, NodeKey};
use std::collections::HashMap;

/// Where a per-node visual property comes from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeStyle {
    /// Leave it to the renderer.
    #[default]
    Default,
    /// Read it from the named node attribute; nodes without it use the default.
    Attribute(String),
    /// Same value for every node.
    Fixed(String),
}

impl NodeStyle {
    pub fn attribute(name: impl Into<String>) -> Self {
        NodeStyle::Attribute(name.into())
    }

    pub fn fixed(value: impl Into<String>) -> Self {
        NodeStyle::Fixed(value.into())
    }

    fn resolve<N: NodeKey>(&self, network: &WeightedNetwork<N>, id: &N) -> Option<String> {
        match self {
            NodeStyle::Default => None,
            NodeStyle::Fixed(value) => Some(value.clone()),
            NodeStyle::Attribute(name) => network
                .node_attributes(id)
                .and_then(|attrs| attrs.get(name))
                .map(AttrValue::to_string),
        }
    }
}

/// An RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub f64, pub f64, pub f64, pub f64);

impl Rgba {
    /// Hex form understood by Graphviz, `#rrggbbaa`.
    pub fn to_hex(&self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            channel(self.0),
            channel(self.1),
            channel(self.2),
            channel(self.3)
        )
    }
}

/// Rendering options.
#[derive(Debug, Clone)]
pub struct DrawOptions<N> {
    pub node_color: NodeStyle,
    /// Written as the node `width`.
    pub node_size: NodeStyle,
    pub edge_color: Rgba,
    /// Pinned node positions.
    pub positions: HashMap<N, (f64, f64)>,
    pub with_labels: bool,
}

impl<N> Default for DrawOptions<N> {
    fn default() -> Self {
        Self {
            node_color: NodeStyle::Default,
            node_size: NodeStyle::Default,
            edge_color: Rgba(0.0, 0.0, 0.0, 0.1),
            positions: HashMap::new(),
            with_labels: false,
        }
    }
}

impl<N> DrawOptions<N> {
    /// Colors and sizes nodes from their `color` and `size` attributes.
    pub fn from_node_attributes() -> Self {
        Self {
            node_color: NodeStyle::attribute("color"),
            node_size: NodeStyle::attribute("size"),
            ..Self::default()
        }
    }
}

/// Renders the network as DOT text.
pub fn render_dot<N: NodeKey>(network: &WeightedNetwork<N>, options: &DrawOptions<N>) -> String {
    let (keyword, connector) = if network.is_directed() {
        ("digraph", "->")
    } else {
        ("graph", "--")
    };

    let mut out = format!("{} {{\n", keyword);

    for node in network.nodes() {
        let mut attrs = Vec::new();
        let label = if options.with_labels {
            node.id.to_string()
        } else {
            String::new()
        };
        attrs.push(format!("label=\"{}\"", escape(&label)));
        if let Some(color) = options.node_color.resolve(network, &node.id) {
            attrs.push(format!("color=\"{}\"", escape(&color)));
        }
        if let Some(size) = options.node_size.resolve(network, &node.id) {
            attrs.push(format!("width=\"{}\"", escape(&size)));
        }
        if let Some((x, y)) = options.positions.get(&node.id) {
            attrs.push(format!("pos=\"{},{}!\"", x, y));
        }
        out.push_str(&format!(
            "  \"{}\" [{}];\n",
            escape(&node.id.to_string()),
            attrs.join(", ")
        ));
    }

    let edge_color = options.edge_color.to_hex();
    for (src, trg, _) in network.edges() {
        out.push_str(&format!(
            "  \"{}\" {} \"{}\" [color=\"{}\"];\n",
            escape(&src.to_string()),
            connector,
            escape(&trg.to_string()),
            edge_color
        ));
    }

    out.push_str("}\n");
    out
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
