//! Type definitions for the code relationship graph.
//!
//! This module provides the core data structures of the pipeline:
//! - `Definition`: a named declaration site discovered in source
//! - `RawReference`: a syntactic use-site prior to resolution
//! - `Edge`: a resolved, directed relationship between two definitions
//! - `CodeGraph`: the assembled (definitions, edges) pair

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Sentinel caller identity for references made at top level
pub const GLOBAL_CONTEXT: &str = "global";

/// Heuristic tag recorded when a Python callee is classified as an
/// instantiation because its name starts with an uppercase character
pub const HEURISTIC_UPPERCASE: &str = "uppercase_name";

/// Heuristic tag recorded when a Python callee is classified as a plain
/// call because its name starts with a lowercase character
pub const HEURISTIC_LOWERCASE: &str = "lowercase_name";

/// Kind of reference to a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Object creation (`new Foo()`, uppercase-name Python call)
    Instantiation,
    /// Direct call to a bare name
    Call,
    /// Call through a member/attribute chain
    MethodCall,
    /// Member or attribute access without a call
    MemberAccess,
}

impl ReferenceKind {
    /// Get the serialized name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instantiation => "instantiation",
            Self::Call => "call",
            Self::MethodCall => "method_call",
            Self::MemberAccess => "member_access",
        }
    }
}

/// Start/end position of a node in source (0-based rows and columns)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceSpan {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

/// Compute the identity string for a definition: `kind:label`.
///
/// Identities are not globally unique; two same-named definitions of the
/// same kind collapse into one entry. This is an accepted approximation in
/// the absence of a symbol table.
pub fn identity(kind: &str, label: &str) -> String {
    format!("{}:{}", kind, label)
}

/// A named, locatable declaration site (function/class/method/type).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Definition {
    /// Identity string, `kind:label`
    pub id: String,
    /// Display name; `"unknown"` when no identifier child was found
    pub label: String,
    /// Source node kind, e.g. `"class_declaration"`
    pub kind: String,
    /// Identity of the nearest enclosing definition, if any
    pub parent_context: Option<String>,
    /// Render size; recomputed from edge degree by the assembler
    pub size: u32,
    /// Render color; set by the assembler
    pub color: Option<String>,
    /// Location of the definition node in source
    pub span: SourceSpan,
}

impl Definition {
    /// Create a definition with the given identity parts
    pub fn new(
        kind: impl Into<String>,
        label: impl Into<String>,
        parent_context: Option<String>,
        span: SourceSpan,
    ) -> Self {
        let kind = kind.into();
        let label = label.into();
        Self {
            id: identity(&kind, &label),
            label,
            kind,
            parent_context,
            size: 10,
            color: None,
            span,
        }
    }
}

/// Why and how a reference record was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceMetadata {
    /// Kind of the syntax node the reference was extracted from
    pub node_kind: String,
    /// Best-guess definition kind the reference should resolve to
    pub target_hint: Option<String>,
    /// Literal source text of the referencing expression
    pub expression: String,
    /// Heuristic tag explaining a guessed classification, if any
    pub heuristic: Option<String>,
}

/// A syntactic use-site prior to resolution against known definitions.
///
/// Produced by the reference collector and consumed immediately by the
/// edge resolver; not retained afterward.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RawReference {
    /// Identity of the lexical context active at the point of use,
    /// or [`GLOBAL_CONTEXT`]
    pub caller_context: String,
    /// Textual name being referenced
    pub callee_name: String,
    /// Kind of use-site
    pub kind: ReferenceKind,
    /// Extraction provenance
    pub metadata: ReferenceMetadata,
}

/// A resolved, directed relationship between two definition identities.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Edge {
    /// Definition identity or [`GLOBAL_CONTEXT`]
    pub source: String,
    /// Definition identity
    pub target: String,
    /// Kind of relationship
    pub kind: ReferenceKind,
    /// Constant 1; reserved for future aggregation
    pub weight: u32,
    /// Raw caller identity before any context elevation, for provenance
    pub original_caller: String,
}

/// The assembled graph: definitions in document order plus resolved edges.
#[derive(Debug, Clone)]
pub struct CodeGraph {
    /// Declared language tag of the build
    pub language: String,
    nodes: Vec<Definition>,
    edges: Vec<Edge>,
}

impl CodeGraph {
    /// Create an empty graph for one build
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Definitions in document (insertion) order
    pub fn nodes(&self) -> &[Definition] {
        &self.nodes
    }

    /// Resolved edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mutable access for the assembler's colorize/size passes
    pub fn nodes_mut(&mut self) -> &mut [Definition] {
        &mut self.nodes
    }

    /// Look up a definition by identity
    pub fn definition(&self, id: &str) -> Option<&Definition> {
        self.nodes.iter().find(|d| d.id == id)
    }

    /// Check whether an identity is present in the definition set
    pub fn contains(&self, id: &str) -> bool {
        self.definition(id).is_some()
    }

    /// Insert a definition unless its identity is already present.
    ///
    /// Returns `true` if the definition was inserted. Identity collisions
    /// keep the first-seen entry.
    pub fn insert_definition(&mut self, definition: Definition) -> bool {
        if self.contains(&definition.id) {
            return false;
        }
        self.nodes.push(definition);
        true
    }

    /// Insert an edge, deduplicating by (source, target) regardless of kind.
    ///
    /// Returns `Ok(true)` if the edge was inserted, `Ok(false)` if an edge
    /// between the same pair already exists. Both endpoints must be present
    /// in the definition set (or the source must be [`GLOBAL_CONTEXT`]);
    /// a violation is a programming error in the resolver, surfaced as
    /// [`GraphError::Internal`].
    pub fn insert_edge(&mut self, edge: Edge) -> Result<bool> {
        if !self.contains(&edge.target) {
            return Err(GraphError::internal(format!(
                "edge target '{}' not present in definition set",
                edge.target
            )));
        }
        if edge.source != GLOBAL_CONTEXT && !self.contains(&edge.source) {
            return Err(GraphError::internal(format!(
                "edge source '{}' not present in definition set",
                edge.source
            )));
        }

        let duplicate = self
            .edges
            .iter()
            .any(|e| e.source == edge.source && e.target == edge.target);
        if duplicate {
            return Ok(false);
        }

        self.edges.push(edge);
        Ok(true)
    }

    /// Count of edges touching the identity in either direction
    pub fn degree(&self, id: &str) -> usize {
        self.edges
            .iter()
            .filter(|e| e.source == id || e.target == id)
            .count()
    }
}
