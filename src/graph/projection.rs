//! Graph enrichment and serializable projections.
//!
//! Colorize and size-by-degree mutate the finished graph in place and are
//! idempotent and total. The flat and hierarchical projections are pure,
//! read-only transforms; they are the contract boundary handed to rendering
//! code.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::{Config, PaletteConfig};
use crate::graph::types::{CodeGraph, ReferenceKind, SourceSpan};

/// Serializable flat node/edge view of a graph
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FlatProjection {
    pub nodes: Vec<FlatNode>,
    pub edges: Vec<FlatEdge>,
    pub metadata: GraphMetadata,
}

/// One node of the flat projection
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FlatNode {
    /// Definition identity, `kind:label`
    pub id: String,
    /// Display name
    pub label: String,
    /// Source node kind
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FlatNodeMetadata>,
}

/// Provenance carried on each flat node
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FlatNodeMetadata {
    /// Identity of the enclosing definition, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_context: Option<String>,
    /// Location of the definition in source
    pub span: SourceSpan,
}

/// One edge of the flat projection
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FlatEdge {
    pub source: String,
    pub target: String,
    pub kind: ReferenceKind,
}

/// Build metadata attached to the flat projection
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GraphMetadata {
    /// Language tag the graph was built under
    pub language: String,
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Unix timestamp of the build
    pub generated_at: i64,
}

/// A node of the hierarchical (kind-grouped) projection.
///
/// Synthetic root, one synthetic category node per distinct definition
/// kind, and the definitions themselves as leaves. The hierarchical view
/// carries no edges; that is an intentional display simplification.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HierarchicalNode {
    pub name: String,
    pub id: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<HierarchicalNode>>,
}

/// Built-in palette entry for a definition kind
fn builtin_color(kind: &str) -> Option<&'static str> {
    match kind {
        "class_declaration" | "class_definition" => Some("#ff6b6b"),
        "function_declaration" | "function_definition" => Some("#4ecdc4"),
        "arrow_function" => Some("#45b7d1"),
        "method_definition" | "method_declaration" | "constructor_declaration" => Some("#96ceb4"),
        "interface_declaration" => Some("#feca57"),
        "type_alias_declaration" => Some("#ff9ff3"),
        "enum_declaration" => Some("#f9ca24"),
        _ => None,
    }
}

/// Resolve the color of a definition kind: config override, then built-in
/// palette, then the neutral default. Total: never fails.
pub fn color_for(kind: &str, palette: &PaletteConfig) -> String {
    palette
        .overrides
        .get(kind)
        .cloned()
        .or_else(|| builtin_color(kind).map(str::to_string))
        .unwrap_or_else(|| palette.neutral_color.clone())
}

/// Assign each node its palette color. Idempotent.
pub fn colorize(graph: &mut CodeGraph, config: &Config) {
    for node in graph.nodes_mut() {
        node.color = Some(color_for(&node.kind, &config.palette));
    }
}

/// Recompute node sizes from edge degree:
/// `max(base, degree * multiplier + base)`. Idempotent.
pub fn size_by_degree(graph: &mut CodeGraph, config: &Config) {
    let base = config.sizing.base_size;
    let multiplier = config.sizing.degree_multiplier;

    let degrees: Vec<u32> = graph
        .nodes()
        .iter()
        .map(|n| graph.degree(&n.id) as u32)
        .collect();

    for (node, degree) in graph.nodes_mut().iter_mut().zip(degrees) {
        node.size = base.max(degree * multiplier + base);
    }
}

/// Project the graph into its serializable flat shape
pub fn to_flat(graph: &CodeGraph) -> FlatProjection {
    let nodes = graph
        .nodes()
        .iter()
        .map(|d| FlatNode {
            id: d.id.clone(),
            label: d.label.clone(),
            kind: d.kind.clone(),
            color: d.color.clone(),
            size: d.size,
            metadata: Some(FlatNodeMetadata {
                parent_context: d.parent_context.clone(),
                span: d.span,
            }),
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|e| FlatEdge {
            source: e.source.clone(),
            target: e.target.clone(),
            kind: e.kind,
        })
        .collect();

    FlatProjection {
        nodes,
        edges,
        metadata: GraphMetadata {
            language: graph.language.clone(),
            total_nodes: graph.nodes().len(),
            total_edges: graph.edges().len(),
            generated_at: chrono::Utc::now().timestamp(),
        },
    }
}

/// Human-readable group name for a definition kind
fn category_label(kind: &str) -> String {
    match kind {
        "class_declaration" | "class_definition" => "Classes".to_string(),
        "function_declaration" | "function_definition" => "Functions".to_string(),
        "arrow_function" => "Arrow Functions".to_string(),
        "method_definition" | "method_declaration" => "Methods".to_string(),
        "constructor_declaration" => "Constructors".to_string(),
        "interface_declaration" => "Interfaces".to_string(),
        "type_alias_declaration" => "Type Aliases".to_string(),
        "enum_declaration" => "Enums".to_string(),
        other => other.to_string(),
    }
}

/// Group the flat projection by definition kind under a synthetic root,
/// for drill-down rendering
pub fn to_hierarchical(flat: &FlatProjection) -> HierarchicalNode {
    // Preserve first-seen kind order so repeated builds group identically
    let mut kind_order: Vec<&str> = Vec::new();
    for node in &flat.nodes {
        if !kind_order.contains(&node.kind.as_str()) {
            kind_order.push(&node.kind);
        }
    }

    let categories = kind_order
        .iter()
        .map(|kind| {
            let leaves: Vec<HierarchicalNode> = flat
                .nodes
                .iter()
                .filter(|n| n.kind == *kind)
                .map(|n| HierarchicalNode {
                    name: n.label.clone(),
                    id: n.id.clone(),
                    kind: n.kind.clone(),
                    color: n.color.clone(),
                    size: Some(n.size),
                    children: None,
                })
                .collect();

            HierarchicalNode {
                name: category_label(kind),
                id: format!("category:{}", kind),
                kind: (*kind).to_string(),
                color: leaves.iter().find_map(|l| l.color.clone()),
                size: None,
                children: Some(leaves),
            }
        })
        .collect();

    HierarchicalNode {
        name: flat.metadata.language.clone(),
        id: "root".to_string(),
        kind: "root".to_string(),
        color: None,
        size: None,
        children: Some(categories),
    }
}
