//! Blueprint graph parsing and dependency traversal
//!
//! This crate handles:
//! - Parsing the blueprint graph document (`{ "nodes": [...] }`)
//! - Id lookup and direct dependency resolution
//! - Transitive dependency closure with a shared visited set
//! - Building the per-resolution dependency context

pub mod document;
pub mod graph;
pub mod context;

pub use document::{GraphDocument, DocumentError};
pub use graph::{FormGraph, find_node, direct_dependencies_of, transitive_dependencies_of};
pub use context::{DependencyContext, ContextError};
