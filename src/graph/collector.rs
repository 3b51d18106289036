//! Definition and reference collection.
//!
//! Both collectors are single top-down traversals (document order,
//! depth-first, pre-order) over the syntax tree. The lexical context is
//! threaded through the recursion by value; no sibling calls share mutable
//! traversal state, so the shape stays correct if parallel traversal is
//! ever introduced.

use tree_sitter::Node;

use crate::graph::strategy::{LanguageStrategy, node_text};
use crate::graph::types::{
    CodeGraph, Definition, GLOBAL_CONTEXT, RawReference, SourceSpan, identity,
};

/// Fallback label for definitions with no identifiable name
pub const UNKNOWN_LABEL: &str = "unknown";

/// Derive the display label of a definition or context node.
///
/// Scans the node's immediate named children for the first identifier-like
/// child. `property_identifier` covers JS/TS method names; its absence from
/// the scan would collapse every method into one `unknown` identity.
pub(crate) fn definition_label(node: Node, source: &str) -> String {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if matches!(
            child.kind(),
            "identifier" | "type_identifier" | "property_identifier"
        ) {
            return node_text(child, source).to_string();
        }
    }
    UNKNOWN_LABEL.to_string()
}

fn span_of(node: Node) -> SourceSpan {
    let start = node.start_position();
    let end = node.end_position();
    SourceSpan {
        start_row: start.row,
        start_col: start.column,
        end_row: end.row,
        end_col: end.column,
    }
}

/// Collect every definition under `root` into the graph.
///
/// Identity collisions (same kind and name) keep the first-seen entry.
/// A definition with no extractable name is still recorded under the
/// `unknown` label; malformed subtrees are skipped, never fatal.
pub fn collect_definitions(
    root: Node,
    strategy: LanguageStrategy,
    source: &str,
    graph: &mut CodeGraph,
) {
    visit_definitions(root, strategy, source, None, graph);
}

fn visit_definitions(
    node: Node,
    strategy: LanguageStrategy,
    source: &str,
    context: Option<&str>,
    graph: &mut CodeGraph,
) {
    let entered;
    let child_context = if strategy.is_definition_kind(node.kind()) {
        let label = definition_label(node, source);
        graph.insert_definition(Definition::new(
            node.kind(),
            &label,
            context.map(str::to_string),
            span_of(node),
        ));
        entered = identity(node.kind(), &label);
        Some(entered.as_str())
    } else {
        context
    };

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit_definitions(child, strategy, source, child_context, graph);
    }
}

/// Collect every raw reference under `root`.
///
/// The traversal shape matches [`collect_definitions`]; at every node all
/// three extraction functions of the strategy run with the active context,
/// and the context advances whenever the node kind opens a new one.
/// Context starts at [`GLOBAL_CONTEXT`].
pub fn collect_references(
    root: Node,
    strategy: LanguageStrategy,
    source: &str,
) -> Vec<RawReference> {
    let mut references = Vec::new();
    visit_references(root, strategy, source, GLOBAL_CONTEXT, &mut references);
    references
}

fn visit_references(
    node: Node,
    strategy: LanguageStrategy,
    source: &str,
    context: &str,
    out: &mut Vec<RawReference>,
) {
    out.extend(strategy.extract_instantiations(node, source, context));
    out.extend(strategy.extract_calls(node, source, context));
    out.extend(strategy.extract_member_access(node, source, context));

    let entered;
    let child_context = if strategy.is_context_kind(node.kind()) {
        entered = identity(node.kind(), &definition_label(node, source));
        entered.as_str()
    } else {
        context
    };

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit_references(child, strategy, source, child_context, out);
    }
}
