//! Type graph module — the structural backbone of Trellis.
//!
//! Provides the graph data model, the mutable store with extension-merge
//! semantics, phantom-node synthesis, the relationship inference passes,
//! and the priority-weighted neighborhood queries.

pub mod builder;
pub mod engine;
pub mod inference;
pub mod phantom;
pub mod query;
pub mod types;

pub use builder::build_graph;
pub use engine::TypeGraph;
pub use inference::{
    run_deep_type, run_global_passes, run_protocol_implementation, run_protocol_internal,
    run_structural,
};
pub use query::TraversalMode;
pub use types::{
    EdgeData, GraphNode, GraphStats, IntegrityDiagnostic, Relationship, RelationshipFamily,
    RelationshipKind,
};
