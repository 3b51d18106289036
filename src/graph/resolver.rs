//! Reference-to-edge resolution.
//!
//! Matches each raw reference against the definition set, using the
//! strategy-supplied target-kind hint first and then an ordered list of
//! fallback identity patterns. References that match nothing are dropped
//! silently; that is the expected outcome for names outside the parsed
//! snippet (standard library calls, imports), not an error.

use crate::error::Result;
use crate::graph::types::{CodeGraph, Edge, RawReference, ReferenceKind, identity};

/// Identity patterns tried, in order, when the target-kind hint misses
const FALLBACK_KINDS: &[&str] = &[
    "class_declaration",
    "function_declaration",
    "method_declaration",
    "function_definition",
    "class_definition",
    "method_definition",
];

/// Resolve raw references into edges on the graph.
///
/// For every reference: determine zero or one target identity, apply the
/// context-elevation rule to the source, and insert the edge unless an
/// edge between the same pair already exists.
pub fn resolve_edges(graph: &mut CodeGraph, references: Vec<RawReference>) -> Result<()> {
    for reference in references {
        let Some(target) = resolve_target(graph, &reference) else {
            tracing::debug!(
                callee = %reference.callee_name,
                kind = reference.kind.as_str(),
                "dropping unresolved reference"
            );
            continue;
        };

        let (source, original_caller) = resolve_source(graph, &reference);
        graph.insert_edge(Edge {
            source,
            target,
            kind: reference.kind,
            weight: 1,
            original_caller,
        })?;
    }
    Ok(())
}

fn resolve_target(graph: &CodeGraph, reference: &RawReference) -> Option<String> {
    if let Some(hint) = &reference.metadata.target_hint {
        let id = identity(hint, &reference.callee_name);
        if graph.contains(&id) {
            return Some(id);
        }
    }

    FALLBACK_KINDS
        .iter()
        .map(|kind| identity(kind, &reference.callee_name))
        .find(|id| graph.contains(id))
}

/// Context elevation: an instantiation performed inside a method is
/// attributed to the enclosing class, since consumers of the graph want
/// "which classes depend on which classes". The raw caller is kept in
/// `original_caller` for provenance.
fn resolve_source(graph: &CodeGraph, reference: &RawReference) -> (String, String) {
    let original = reference.caller_context.clone();

    if reference.kind == ReferenceKind::Instantiation
        && let Some(caller) = graph.definition(&reference.caller_context)
        && caller.kind == "method_definition"
        && let Some(parent) = caller.parent_context.clone()
    {
        return (parent, original);
    }

    (original.clone(), original)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{Definition, GLOBAL_CONTEXT, ReferenceMetadata, SourceSpan};

    fn def(kind: &str, label: &str, parent: Option<&str>) -> Definition {
        Definition::new(kind, label, parent.map(str::to_string), SourceSpan::default())
    }

    fn raw(
        caller: &str,
        callee: &str,
        kind: ReferenceKind,
        hint: Option<&str>,
    ) -> RawReference {
        RawReference {
            caller_context: caller.to_string(),
            callee_name: callee.to_string(),
            kind,
            metadata: ReferenceMetadata {
                node_kind: "call_expression".to_string(),
                target_hint: hint.map(str::to_string),
                expression: callee.to_string(),
                heuristic: None,
            },
        }
    }

    #[test]
    fn test_hint_is_tried_before_fallbacks() {
        let mut graph = CodeGraph::new("javascript");
        // Same name under two kinds; the hint must win over the fallback
        // order (class_declaration would match first otherwise)
        graph.insert_definition(def("class_declaration", "build", None));
        graph.insert_definition(def("method_definition", "build", None));

        let reference = raw(
            GLOBAL_CONTEXT,
            "build",
            ReferenceKind::MethodCall,
            Some("method_definition"),
        );
        resolve_edges(&mut graph, vec![reference]).unwrap();

        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].target, "method_definition:build");
    }

    #[test]
    fn test_hint_miss_falls_back_in_order() {
        let mut graph = CodeGraph::new("python");
        graph.insert_definition(def("function_definition", "helper", None));

        // Hint names a kind with no matching definition
        let reference = raw(
            GLOBAL_CONTEXT,
            "helper",
            ReferenceKind::Call,
            Some("class_definition"),
        );
        resolve_edges(&mut graph, vec![reference]).unwrap();

        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].target, "function_definition:helper");
    }

    #[test]
    fn test_unresolvable_reference_is_dropped() {
        let mut graph = CodeGraph::new("javascript");
        graph.insert_definition(def("class_declaration", "User", None));

        let reference = raw(
            GLOBAL_CONTEXT,
            "console",
            ReferenceKind::MethodCall,
            Some("method_definition"),
        );
        resolve_edges(&mut graph, vec![reference]).unwrap();

        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_instantiation_in_method_is_elevated_to_class() {
        let mut graph = CodeGraph::new("javascript");
        graph.insert_definition(def("class_declaration", "User", None));
        graph.insert_definition(def("class_declaration", "UserManager", None));
        graph.insert_definition(def(
            "method_definition",
            "addUser",
            Some("class_declaration:UserManager"),
        ));

        let reference = raw(
            "method_definition:addUser",
            "User",
            ReferenceKind::Instantiation,
            Some("class_declaration"),
        );
        resolve_edges(&mut graph, vec![reference]).unwrap();

        let edge = &graph.edges()[0];
        assert_eq!(edge.source, "class_declaration:UserManager");
        assert_eq!(edge.target, "class_declaration:User");
        assert_eq!(edge.original_caller, "method_definition:addUser");
    }

    #[test]
    fn test_call_in_method_is_not_elevated() {
        let mut graph = CodeGraph::new("javascript");
        graph.insert_definition(def("class_declaration", "UserManager", None));
        graph.insert_definition(def(
            "method_definition",
            "addUser",
            Some("class_declaration:UserManager"),
        ));
        graph.insert_definition(def("function_declaration", "validate", None));

        let reference = raw(
            "method_definition:addUser",
            "validate",
            ReferenceKind::Call,
            Some("function_declaration"),
        );
        resolve_edges(&mut graph, vec![reference]).unwrap();

        let edge = &graph.edges()[0];
        assert_eq!(edge.source, "method_definition:addUser");
        assert_eq!(edge.original_caller, "method_definition:addUser");
    }

    #[test]
    fn test_global_instantiation_keeps_global_source() {
        let mut graph = CodeGraph::new("javascript");
        graph.insert_definition(def("class_declaration", "User", None));

        let reference = raw(
            GLOBAL_CONTEXT,
            "User",
            ReferenceKind::Instantiation,
            Some("class_declaration"),
        );
        resolve_edges(&mut graph, vec![reference]).unwrap();

        let edge = &graph.edges()[0];
        assert_eq!(edge.source, GLOBAL_CONTEXT);
        assert_eq!(edge.original_caller, GLOBAL_CONTEXT);
    }

    #[test]
    fn test_duplicate_pairs_collapse_to_first_seen() {
        let mut graph = CodeGraph::new("javascript");
        graph.insert_definition(def("class_declaration", "User", None));

        let call = raw(GLOBAL_CONTEXT, "User", ReferenceKind::Call, None);
        let access = raw(GLOBAL_CONTEXT, "User", ReferenceKind::MemberAccess, None);
        resolve_edges(&mut graph, vec![call, access]).unwrap();

        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].kind, ReferenceKind::Call);
    }
}
