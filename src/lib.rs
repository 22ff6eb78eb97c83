//! # Trellis SDK
//!
//! Type-relationship graph engine for static code analysis.
//!
//! Trellis ingests structured declarations describing the types of a
//! codebase (classes, structs, protocols, enums, actors, extensions) and
//! builds a directed, multi-relationship dependency graph between them,
//! supporting focused neighborhood queries for downstream visualization.
//!
//! ## Key Features
//!
//! - **Multi-relationship**: eighteen edge kinds across structural,
//!   protocol-implementation, deep-type, and protocol-internal families
//! - **Fail-soft**: malformed type expressions and unknown external names
//!   degrade to heuristic fallbacks, never errors
//! - **Phantom synthesis**: externally-referenced types become nodes with
//!   reconstructed ancestry, so queries never hit a dangling edge
//! - **Priority traversal**: neighborhood queries expand inheritance before
//!   composition before dependency, under a per-edge cost budget
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis::{build_graph, Declaration, DeclKind, PropertySpec, TraversalMode};
//!
//! let mut feed = Declaration::new("Feed", DeclKind::Class);
//! feed.properties.push(PropertySpec::new("store", "FeedStore", true));
//! let store = Declaration::new("FeedStore", DeclKind::Class);
//!
//! let graph = build_graph([feed, store]);
//!
//! let neighborhood = graph.related("Feed", 2, TraversalMode::Standard);
//! assert!(neighborhood.iter().any(|d| d.name == "FeedStore"));
//! ```

pub mod classify;
pub mod config;
pub mod decl;
pub mod error;
pub mod graph;
pub mod typeexpr;

// Re-exports for convenience
pub use config::TrellisConfig;
pub use decl::{
    declarations_from_json, AccessLevel, AssociatedTypeSpec, DeclKind, Declaration,
    GenericParamSpec, MethodSpec, ParamSpec, PropertySpec, RequirementKind, RequirementSpec,
    SourceLocation, SubscriptSpec, TypeAliasSpec,
};
pub use error::{Result, TrellisError};
pub use graph::{
    build_graph, run_global_passes, GraphNode, GraphStats, IntegrityDiagnostic, Relationship,
    RelationshipFamily, RelationshipKind, TraversalMode, TypeGraph,
};
