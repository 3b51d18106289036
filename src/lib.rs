//! # code-graph - Code Relationship Graph Builder
//!
//! Builds a directed graph of which functions/classes call or instantiate
//! which others, from a single pasted source snippet, using tree-sitter
//! syntax trees and type-directed heuristics. No symbol table, no import
//! resolution: the pipeline is deliberately syntactic, which keeps it fast
//! and language-agnostic at the cost of name-collision approximations.
//!
//! ## Supported languages
//!
//! JavaScript, TypeScript, Java, and Python. Unknown language tags fall
//! back to the JavaScript-family rules.
//!
//! ## Architecture
//!
//! ```text
//! source text
//!     |  LanguageRegistry (cached tree-sitter grammars)
//!     v
//! syntax tree
//!     |  collect_definitions      collect_references
//!     v                                v
//! definition set  <---- resolve_edges ---- raw references
//!     |
//!     v
//! CodeGraph --- colorize / size_by_degree
//!     |
//!     +--> FlatProjection (nodes + edges + metadata)
//!     +--> HierarchicalNode (kind-grouped drill-down tree)
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: collectors, language strategies, edge resolver, projections
//! - [`parser`]: tree-sitter grammar registry and parse entry point
//! - [`config`]: configuration with TOML file and environment overrides
//! - [`error`]: error types and result alias
//! - [`paths`]: platform config-file locations
//!
//! ## Usage Example
//!
//! ```no_run
//! use code_graph::{Config, GraphBuilder, graph::projection};
//!
//! fn main() -> anyhow::Result<()> {
//!     let builder = GraphBuilder::new(Config::default());
//!     let graph = builder.build_graph("class A { m() { new B(); } }", "javascript")?;
//!     let flat = projection::to_flat(&graph);
//!     println!("{}", serde_json::to_string_pretty(&flat)?);
//!     Ok(())
//! }
//! ```

/// Configuration management with TOML files and environment overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// Graph construction: collectors, strategies, resolver, projections
pub mod graph;

/// Syntax tree acquisition via cached tree-sitter grammars
pub mod parser;

/// Platform path utilities
pub mod paths;

pub use config::Config;
pub use error::{GraphError, Result};
pub use graph::{CodeGraph, GraphBuilder, ReferenceKind};
pub use parser::LanguageRegistry;
