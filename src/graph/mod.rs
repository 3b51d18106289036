//! Code relationship graph construction.
//!
//! The pipeline runs in strict one-directional stages:
//!
//! ```text
//! source text -> syntax tree -> {definitions, raw references}
//!             -> resolved edges -> assembled graph -> projections
//! ```
//!
//! Each stage builds its own state locally and hands it to the next; no
//! component mutates a predecessor's output. A build either completes or
//! fails with a structured error; malformed source is not fatal (whatever
//! is structurally recognizable is extracted).

pub mod collector;
pub mod projection;
pub mod resolver;
pub mod strategy;
pub mod types;

pub use projection::{FlatProjection, HierarchicalNode};
pub use strategy::LanguageStrategy;
pub use types::{CodeGraph, Definition, Edge, RawReference, ReferenceKind};

use crate::config::Config;
use crate::error::{ParseError, Result};
use crate::parser::LanguageRegistry;

/// End-to-end graph builder.
///
/// Holds only configuration; every invocation uses its own working state,
/// so concurrent builds on one builder are safe by construction.
pub struct GraphBuilder {
    config: Config,
}

impl GraphBuilder {
    /// Create a builder with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The builder's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the graph for one source snippet under a language tag.
    ///
    /// Creates a fresh [`LanguageRegistry`] for the call; use
    /// [`build_graph_with`](Self::build_graph_with) to share cached
    /// grammar handles across builds.
    pub fn build_graph(&self, source: &str, language: &str) -> Result<CodeGraph> {
        let mut registry =
            LanguageRegistry::with_fallback(self.config.parsing.fallback_language.clone());
        self.build_graph_with(&mut registry, source, language)
    }

    /// Build the graph using an injected grammar registry.
    pub fn build_graph_with(
        &self,
        registry: &mut LanguageRegistry,
        source: &str,
        language: &str,
    ) -> Result<CodeGraph> {
        if source.len() > self.config.parsing.max_source_bytes {
            return Err(ParseError::SourceTooLarge {
                size: source.len(),
                max: self.config.parsing.max_source_bytes,
            }
            .into());
        }

        let tree = registry.parse(source, language)?;
        // Select extraction rules from the tag the registry actually parsed
        // under, so an unknown tag uses the fallback language's rules too
        let strategy = LanguageStrategy::from_tag(registry.resolve_tag(language)?);
        let root = tree.root_node();

        let mut graph = CodeGraph::new(language);
        collector::collect_definitions(root, strategy, source, &mut graph);

        let references = collector::collect_references(root, strategy, source);
        let reference_count = references.len();
        resolver::resolve_edges(&mut graph, references)?;

        projection::colorize(&mut graph, &self.config);
        projection::size_by_degree(&mut graph, &self.config);

        tracing::debug!(
            language,
            nodes = graph.nodes().len(),
            references = reference_count,
            edges = graph.edges().len(),
            "graph build complete"
        );
        Ok(graph)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
