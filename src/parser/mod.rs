//! Syntax tree acquisition via tree-sitter.
//!
//! Wraps the tree-sitter grammars behind a [`LanguageRegistry`] that caches
//! per-language grammar handles and produces parse trees for the graph
//! pipeline. The registry is an injected value with an explicit [`reset`]
//! lifecycle rather than ambient global state, so tests can run in isolation.
//!
//! [`reset`]: LanguageRegistry::reset

use std::collections::HashMap;

use tree_sitter::{Language, Parser, Tree};

use crate::error::{GraphError, ParseError, Result};

/// Cached tree-sitter grammar registry keyed by canonical language tag.
pub struct LanguageRegistry {
    languages: HashMap<&'static str, Language>,
    fallback: String,
}

impl LanguageRegistry {
    /// Create a registry with the default JavaScript fallback
    pub fn new() -> Self {
        Self::with_fallback("javascript")
    }

    /// Create a registry that maps unknown language tags to `fallback`
    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self {
            languages: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Canonical tag a parse under `tag` will actually use: the tag itself
    /// when recognized, the configured fallback otherwise. Extraction rules
    /// must be selected from this resolved tag, never the raw one, so the
    /// rules stay aligned with the grammar that parsed the source.
    pub fn resolve_tag(&self, tag: &str) -> Result<&'static str> {
        canonical_tag(tag)
            .or_else(|| canonical_tag(&self.fallback))
            .ok_or_else(|| {
                GraphError::from(ParseError::UnsupportedLanguage(self.fallback.clone()))
            })
    }

    /// Resolve a language tag to a cached grammar handle.
    ///
    /// Unknown tags fall back to the configured fallback language with a
    /// warning.
    pub fn language_for(&mut self, tag: &str) -> Result<Language> {
        if canonical_tag(tag).is_none() {
            tracing::warn!(tag, fallback = %self.fallback, "unknown language tag, using fallback");
        }
        let canonical = self.resolve_tag(tag)?;

        if let Some(language) = self.languages.get(canonical) {
            return Ok(language.clone());
        }

        let language = load_grammar(canonical);
        self.languages.insert(canonical, language.clone());
        Ok(language)
    }

    /// Parse source text under the given language tag.
    ///
    /// The parser itself is created per call: grammar handles are the only
    /// state worth caching, and this keeps concurrent builds independent.
    pub fn parse(&mut self, source: &str, tag: &str) -> Result<Tree> {
        let language = self.language_for(tag)?;

        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ParseError::LanguageSetupFailed {
                language: tag.to_string(),
                reason: e.to_string(),
            })?;

        parser
            .parse(source, None)
            .ok_or_else(|| ParseError::ParseFailed(tag.to_string()).into())
    }

    /// Drop all cached grammar handles
    pub fn reset(&mut self) {
        self.languages.clear();
    }

    /// Number of cached grammar handles (for tests and diagnostics)
    pub fn cached_languages(&self) -> usize {
        self.languages.len()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a language tag to its canonical grammar name
pub fn canonical_tag(tag: &str) -> Option<&'static str> {
    match tag.to_lowercase().as_str() {
        "javascript" | "js" | "jsx" | "mjs" | "cjs" => Some("javascript"),
        "typescript" | "ts" => Some("typescript"),
        "tsx" => Some("tsx"),
        "java" => Some("java"),
        "python" | "py" => Some("python"),
        _ => None,
    }
}

/// Map a file extension to a language tag (for CLI language inference)
pub fn tag_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        "js" | "mjs" | "cjs" | "jsx" => Some("javascript"),
        "ts" => Some("typescript"),
        "tsx" => Some("tsx"),
        "java" => Some("java"),
        "py" => Some("python"),
        _ => None,
    }
}

fn load_grammar(canonical: &'static str) -> Language {
    match canonical {
        "typescript" => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        "tsx" => tree_sitter_typescript::LANGUAGE_TSX.into(),
        "java" => tree_sitter_java::LANGUAGE.into(),
        "python" => tree_sitter_python::LANGUAGE.into(),
        // canonical_tag only emits the five names above plus "javascript"
        _ => tree_sitter_javascript::LANGUAGE.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_javascript() {
        let mut registry = LanguageRegistry::new();
        let tree = registry.parse("function foo() {}", "javascript").unwrap();
        assert_eq!(tree.root_node().kind(), "program");
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn test_parse_python() {
        let mut registry = LanguageRegistry::new();
        let tree = registry.parse("def foo():\n    pass\n", "python").unwrap();
        assert_eq!(tree.root_node().kind(), "module");
    }

    #[test]
    fn test_unknown_tag_falls_back_to_javascript() {
        let mut registry = LanguageRegistry::new();
        let tree = registry.parse("class A {}", "unknown-lang").unwrap();
        assert_eq!(tree.root_node().kind(), "program");
    }

    #[test]
    fn test_grammar_handles_are_cached() {
        let mut registry = LanguageRegistry::new();
        registry.parse("x", "javascript").unwrap();
        registry.parse("y", "js").unwrap();
        assert_eq!(registry.cached_languages(), 1);

        registry.parse("z = 1", "python").unwrap();
        assert_eq!(registry.cached_languages(), 2);

        registry.reset();
        assert_eq!(registry.cached_languages(), 0);
    }

    #[test]
    fn test_malformed_source_still_parses() {
        // tree-sitter produces a tree with error markers, not a failure
        let mut registry = LanguageRegistry::new();
        let tree = registry.parse("function ( {{{", "javascript").unwrap();
        assert!(tree.root_node().has_error());
    }

    #[test]
    fn test_resolve_tag_honors_configured_fallback() {
        let registry = LanguageRegistry::with_fallback("python");
        assert_eq!(registry.resolve_tag("java").unwrap(), "java");
        assert_eq!(registry.resolve_tag("mystery-lang").unwrap(), "python");

        let bad = LanguageRegistry::with_fallback("cobol");
        assert!(bad.resolve_tag("mystery-lang").is_err());
    }

    #[test]
    fn test_unknown_tag_parses_with_configured_fallback_grammar() {
        let mut registry = LanguageRegistry::with_fallback("python");
        let tree = registry.parse("def foo():\n    pass\n", "mystery-lang").unwrap();
        assert_eq!(tree.root_node().kind(), "module");
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn test_canonical_tag_aliases() {
        assert_eq!(canonical_tag("JS"), Some("javascript"));
        assert_eq!(canonical_tag("ts"), Some("typescript"));
        assert_eq!(canonical_tag("py"), Some("python"));
        assert_eq!(canonical_tag("cobol"), None);
    }

    #[test]
    fn test_tag_for_extension() {
        assert_eq!(tag_for_extension("mjs"), Some("javascript"));
        assert_eq!(tag_for_extension("tsx"), Some("tsx"));
        assert_eq!(tag_for_extension("java"), Some("java"));
        assert_eq!(tag_for_extension("rs"), None);
    }
}
