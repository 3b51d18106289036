//! Per-language extraction policy.
//!
//! Each supported language contributes (a) the node kinds treated as
//! definitions, (b) the node kinds that open a new lexical context, and
//! (c) three extraction functions that inspect a single syntax node and
//! emit zero or more raw reference records. The set of languages is small
//! and fixed, so this is a closed enum with an explicit JavaScript default
//! arm rather than open-ended runtime polymorphism.

use tree_sitter::Node;

use crate::graph::types::{
    HEURISTIC_LOWERCASE, HEURISTIC_UPPERCASE, RawReference, ReferenceKind, ReferenceMetadata,
};

/// Extraction strategy for one supported language family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageStrategy {
    JavaScript,
    TypeScript,
    Java,
    Python,
}

const JS_DEFINITION_KINDS: &[&str] = &[
    "function_declaration",
    "class_declaration",
    "arrow_function",
    "method_definition",
];

const TS_DEFINITION_KINDS: &[&str] = &[
    "function_declaration",
    "class_declaration",
    "arrow_function",
    "method_definition",
    "interface_declaration",
    "type_alias_declaration",
];

const JAVA_DEFINITION_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "method_declaration",
    "constructor_declaration",
    "enum_declaration",
];

const PYTHON_DEFINITION_KINDS: &[&str] = &["function_definition", "class_definition"];

impl LanguageStrategy {
    /// Select the strategy for a language tag.
    ///
    /// Unknown tags use the JavaScript-family rules.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "typescript" | "ts" | "tsx" => Self::TypeScript,
            "java" => Self::Java,
            "python" | "py" => Self::Python,
            _ => Self::JavaScript,
        }
    }

    /// Node kinds treated as definitions
    pub fn definition_kinds(&self) -> &'static [&'static str] {
        match self {
            Self::JavaScript => JS_DEFINITION_KINDS,
            Self::TypeScript => TS_DEFINITION_KINDS,
            Self::Java => JAVA_DEFINITION_KINDS,
            Self::Python => PYTHON_DEFINITION_KINDS,
        }
    }

    /// Node kinds that open a new lexical context for reference attribution.
    ///
    /// Tracked separately from [`definition_kinds`](Self::definition_kinds)
    /// even though the sets currently coincide; some languages mark context
    /// differently from definitions.
    pub fn context_kinds(&self) -> &'static [&'static str] {
        self.definition_kinds()
    }

    /// Check whether a node kind is a definition for this language
    pub fn is_definition_kind(&self, kind: &str) -> bool {
        self.definition_kinds().contains(&kind)
    }

    /// Check whether a node kind opens a new lexical context
    pub fn is_context_kind(&self, kind: &str) -> bool {
        self.context_kinds().contains(&kind)
    }

    /// Extract object-creation references from exactly this node
    pub fn extract_instantiations(
        &self,
        node: Node,
        source: &str,
        context: &str,
    ) -> Vec<RawReference> {
        match self {
            Self::JavaScript | Self::TypeScript => js_instantiations(node, source, context),
            Self::Java => java_instantiations(node, source, context),
            Self::Python => python_calls(node, source, context, PythonCallClass::Instantiation),
        }
    }

    /// Extract direct-call and method-call references from exactly this node
    pub fn extract_calls(&self, node: Node, source: &str, context: &str) -> Vec<RawReference> {
        match self {
            Self::JavaScript | Self::TypeScript => js_calls(node, source, context),
            Self::Java => java_calls(node, source, context),
            Self::Python => python_calls(node, source, context, PythonCallClass::Call),
        }
    }

    /// Extract member/attribute-access references from exactly this node
    pub fn extract_member_access(
        &self,
        node: Node,
        source: &str,
        context: &str,
    ) -> Vec<RawReference> {
        match self {
            Self::JavaScript | Self::TypeScript => {
                object_access(node, source, context, "member_expression", "object")
            }
            Self::Java => object_access(node, source, context, "field_access", "object"),
            Self::Python => object_access(node, source, context, "attribute", "object"),
        }
    }
}

/// Slice the source text covered by a node
pub(crate) fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte().min(source.len())]
}

fn reference(
    context: &str,
    callee: &str,
    kind: ReferenceKind,
    node: Node,
    source: &str,
    target_hint: Option<&str>,
    heuristic: Option<&str>,
) -> RawReference {
    RawReference {
        caller_context: context.to_string(),
        callee_name: callee.to_string(),
        kind,
        metadata: ReferenceMetadata {
            node_kind: node.kind().to_string(),
            target_hint: target_hint.map(str::to_string),
            expression: node_text(node, source).to_string(),
            heuristic: heuristic.map(str::to_string),
        },
    }
}

// ---------------------------------------------------------------------------
// JavaScript / TypeScript
// ---------------------------------------------------------------------------

/// `new Expr(...)`: the type name is either a plain identifier or the tail
/// of a member chain (`new ns.Type()`)
fn js_instantiations(node: Node, source: &str, context: &str) -> Vec<RawReference> {
    if node.kind() != "new_expression" {
        return Vec::new();
    }
    let Some(constructor) = node.child_by_field_name("constructor") else {
        return Vec::new();
    };

    let name = match constructor.kind() {
        "identifier" => Some(node_text(constructor, source)),
        "member_expression" => constructor
            .child_by_field_name("property")
            .map(|p| node_text(p, source)),
        _ => None,
    };

    match name {
        Some(name) => vec![reference(
            context,
            name,
            ReferenceKind::Instantiation,
            node,
            source,
            Some("class_declaration"),
            None,
        )],
        None => Vec::new(),
    }
}

/// `call_expression`: a bare identifier is a direct call; a member chain is
/// a method call on the chain's last segment
fn js_calls(node: Node, source: &str, context: &str) -> Vec<RawReference> {
    if node.kind() != "call_expression" {
        return Vec::new();
    }
    let Some(callee) = node.child_by_field_name("function") else {
        return Vec::new();
    };

    match callee.kind() {
        "identifier" => vec![reference(
            context,
            node_text(callee, source),
            ReferenceKind::Call,
            node,
            source,
            Some("function_declaration"),
            None,
        )],
        "member_expression" => match callee.child_by_field_name("property") {
            Some(property) => vec![reference(
                context,
                node_text(property, source),
                ReferenceKind::MethodCall,
                callee,
                source,
                Some("method_definition"),
                None,
            )],
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Java
// ---------------------------------------------------------------------------

/// `new Type(...)`: the type child may be a plain type identifier, a
/// generic type (unwrapped one level to reach the base type), or a
/// qualified name whose last segment is the type
fn java_instantiations(node: Node, source: &str, context: &str) -> Vec<RawReference> {
    if node.kind() != "object_creation_expression" {
        return Vec::new();
    }
    let Some(type_node) = node.child_by_field_name("type") else {
        return Vec::new();
    };

    let name = match type_node.kind() {
        "type_identifier" => Some(node_text(type_node, source)),
        "generic_type" => {
            let mut cursor = type_node.walk();
            type_node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "type_identifier")
                .map(|c| node_text(c, source))
        }
        "scoped_type_identifier" => {
            let mut cursor = type_node.walk();
            type_node
                .named_children(&mut cursor)
                .filter(|c| c.kind() == "type_identifier")
                .last()
                .map(|c| node_text(c, source))
        }
        _ => None,
    };

    match name {
        Some(name) => vec![reference(
            context,
            name,
            ReferenceKind::Instantiation,
            node,
            source,
            Some("class_declaration"),
            None,
        )],
        None => Vec::new(),
    }
}

/// `method_invocation`: with an object it is a method call, without one a
/// direct call; both hint at method declarations since Java has no free
/// functions
fn java_calls(node: Node, source: &str, context: &str) -> Vec<RawReference> {
    if node.kind() != "method_invocation" {
        return Vec::new();
    }
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };

    let kind = if node.child_by_field_name("object").is_some() {
        ReferenceKind::MethodCall
    } else {
        ReferenceKind::Call
    };

    vec![reference(
        context,
        node_text(name_node, source),
        kind,
        node,
        source,
        Some("method_declaration"),
        None,
    )]
}

// ---------------------------------------------------------------------------
// Python
// ---------------------------------------------------------------------------

enum PythonCallClass {
    Instantiation,
    Call,
}

/// Python has no instantiation syntax, so `call` nodes are classified by a
/// naming heuristic: an uppercase-leading callee (or attribute-chain tail)
/// is an instantiation, a lowercase-leading one is a plain call. The
/// heuristic tag is recorded in the reference metadata.
fn python_calls(
    node: Node,
    source: &str,
    context: &str,
    class: PythonCallClass,
) -> Vec<RawReference> {
    if node.kind() != "call" {
        return Vec::new();
    }
    let Some(callee) = node.child_by_field_name("function") else {
        return Vec::new();
    };

    let (name, through_attribute) = match callee.kind() {
        "identifier" => (Some(node_text(callee, source)), false),
        "attribute" => (
            callee
                .child_by_field_name("attribute")
                .map(|a| node_text(a, source)),
            true,
        ),
        _ => (None, false),
    };
    let Some(name) = name else {
        return Vec::new();
    };

    let uppercase = name.chars().next().is_some_and(|c| c.is_uppercase());

    match class {
        PythonCallClass::Instantiation if uppercase => vec![reference(
            context,
            name,
            ReferenceKind::Instantiation,
            node,
            source,
            Some("class_definition"),
            Some(HEURISTIC_UPPERCASE),
        )],
        PythonCallClass::Call if !uppercase => {
            let kind = if through_attribute {
                ReferenceKind::MethodCall
            } else {
                ReferenceKind::Call
            };
            vec![reference(
                context,
                name,
                kind,
                node,
                source,
                Some("function_definition"),
                Some(HEURISTIC_LOWERCASE),
            )]
        }
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Member access (shared shape across languages)
// ---------------------------------------------------------------------------

/// `obj.member` style access: emit a reference to the object when it is a
/// plain identifier (qualified receivers and `this`/`self` chains carry no
/// resolvable name)
fn object_access(
    node: Node,
    source: &str,
    context: &str,
    access_kind: &str,
    object_field: &str,
) -> Vec<RawReference> {
    if node.kind() != access_kind {
        return Vec::new();
    }
    let Some(object) = node.child_by_field_name(object_field) else {
        return Vec::new();
    };
    if object.kind() != "identifier" {
        return Vec::new();
    }

    vec![reference(
        context,
        node_text(object, source),
        ReferenceKind::MemberAccess,
        node,
        source,
        None,
        None,
    )]
}
