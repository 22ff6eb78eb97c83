//
//  engine.rs
//  Trellis
//
//  Created by hak (tharun)
//

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::inference;
use super::types::*;
use crate::decl::{DeclKind, Declaration};

/// The type graph — holds all nodes, edges, and indexes for fast lookup.
///
/// Single-writer: `add_declaration`, `add_relationship`, and the inference
/// passes must be serialized onto one logical writer. Reads hand out copies.
#[derive(Clone)]
pub struct TypeGraph {
    /// The directed graph storing type relationships.
    pub(crate) graph: DiGraph<GraphNode, EdgeData>,
    /// Index: type name -> node index. At most one node per name.
    pub(crate) name_index: HashMap<String, NodeIndex>,
    /// Global edge set, deduplicated on the full (from, to, kind, details)
    /// tuple.
    pub(crate) edge_keys: HashSet<EdgeKey>,
    /// Data-integrity warnings collected during construction.
    pub(crate) integrity: Vec<IntegrityDiagnostic>,
    /// How many extension merges have happened.
    pub(crate) extension_merges: usize,
}

impl TypeGraph {
    /// Create a new empty type graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_index: HashMap::new(),
            edge_keys: HashSet::new(),
            integrity: Vec::new(),
            extension_merges: 0,
        }
    }

    // ─── Node Operations ────────────────────────────────────────

    /// Ingest one declaration.
    ///
    /// A fresh name inserts a new node. A known name merges when exactly one
    /// side is an extension and the other a class/struct/actor; any other
    /// collision replaces the stored declaration (last write wins). Either
    /// way the structural inference pass runs for this declaration, and its
    /// nested declarations are ingested as nodes of their own.
    pub fn add_declaration(&mut self, decl: Declaration) {
        let name = decl.name.clone();
        let nested = decl.nested.clone();

        match self.name_index.get(&name).copied() {
            None => {
                self.insert_node(decl);
            }
            Some(idx) => {
                let existing = self.graph[idx].decl.clone();
                let merged = if existing.kind == DeclKind::Extension && decl.kind.is_concrete() {
                    self.extension_merges += 1;
                    debug!(name = %name, "merging earlier extension into primary declaration");
                    merge_extension(decl, &existing)
                } else if decl.kind == DeclKind::Extension && existing.kind.is_concrete() {
                    self.extension_merges += 1;
                    debug!(name = %name, "merging extension into existing declaration");
                    merge_extension(existing, &decl)
                } else {
                    debug!(name = %name, kind = ?decl.kind, "replacing declaration (last write wins)");
                    decl
                };
                if let Some(node) = self.graph.node_weight_mut(idx) {
                    node.decl = merged;
                }
            }
        }

        inference::run_structural(self, &name);

        for child in nested {
            self.add_declaration(child);
        }
    }

    /// Insert a node without collision handling. Callers own the invariant
    /// that `decl.name` is not already indexed.
    pub(crate) fn insert_node(&mut self, decl: Declaration) -> NodeIndex {
        let name = decl.name.clone();
        let idx = self.graph.add_node(GraphNode { decl });
        self.name_index.insert(name, idx);
        idx
    }

    // ─── Edge Operations ────────────────────────────────────────

    /// Record a relationship.
    ///
    /// The target endpoint is synthesized as a phantom node when absent. A
    /// missing source is a data-integrity problem — edges may only be added
    /// alongside their source node — so it is logged and dropped, not
    /// auto-created.
    pub fn add_relationship(
        &mut self,
        from: &str,
        to: &str,
        kind: RelationshipKind,
        details: Option<String>,
    ) {
        let Some(&from_idx) = self.name_index.get(from) else {
            warn!(
                source = %from,
                target = %to,
                kind = ?kind,
                "relationship source was never ingested; dropping edge"
            );
            self.integrity.push(IntegrityDiagnostic {
                source: from.to_string(),
                target: to.to_string(),
                kind,
            });
            return;
        };
        let to_idx = self.ensure_target(to);
        self.record_edge(from_idx, to_idx, kind, details);
    }

    /// Deduplicated edge insert between two existing nodes. Returns whether
    /// the edge was new.
    pub(crate) fn record_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        kind: RelationshipKind,
        details: Option<String>,
    ) -> bool {
        let key = EdgeKey {
            from: self.graph[from].name().to_string(),
            to: self.graph[to].name().to_string(),
            kind,
            details: details.clone(),
        };
        if !self.edge_keys.insert(key) {
            return false;
        }
        self.graph.add_edge(from, to, EdgeData { kind, details });
        true
    }

    // ─── Reads ──────────────────────────────────────────────────

    /// Look up a node by type name.
    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.name_index.get(name).map(|&idx| &self.graph[idx])
    }

    /// Whether a node with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// All nodes, in insertion order.
    pub fn all_nodes(&self) -> Vec<&GraphNode> {
        self.graph.node_weights().collect()
    }

    /// All relationships as plain data, in insertion order.
    pub fn all_relationships(&self) -> Vec<Relationship> {
        self.graph
            .edge_references()
            .map(|edge| Relationship {
                from: self.graph[edge.source()].name().to_string(),
                to: self.graph[edge.target()].name().to_string(),
                kind: edge.weight().kind,
                details: edge.weight().details.clone(),
            })
            .collect()
    }

    /// The outgoing relationships of one node.
    pub fn relationships_from(&self, name: &str) -> Vec<Relationship> {
        let Some(&idx) = self.name_index.get(name) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| Relationship {
                from: name.to_string(),
                to: self.graph[edge.target()].name().to_string(),
                kind: edge.weight().kind,
                details: edge.weight().details.clone(),
            })
            .collect()
    }

    /// Integrity warnings collected so far.
    pub fn diagnostics(&self) -> &[IntegrityDiagnostic] {
        &self.integrity
    }

    /// Graph statistics.
    pub fn stats(&self) -> GraphStats {
        let mut phantom_count = 0;
        let mut protocol_count = 0;
        for node in self.graph.node_weights() {
            if node.is_phantom() {
                phantom_count += 1;
            }
            if node.decl.kind == DeclKind::Protocol {
                protocol_count += 1;
            }
        }
        GraphStats {
            total_nodes: self.graph.node_count(),
            total_edges: self.graph.edge_count(),
            phantom_count,
            protocol_count,
            extension_merge_count: self.extension_merges,
        }
    }

    /// Snapshot of every node's declaration, for the global passes.
    pub(crate) fn snapshot_declarations(&self) -> Vec<Declaration> {
        self.graph
            .node_weights()
            .map(|node| node.decl.clone())
            .collect()
    }
}

impl Default for TypeGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Combine a primary declaration with one extension.
///
/// Conformances union, member lists concatenate; the primary's kind,
/// inherited types, access, and location win. Extensions never contribute
/// supertype information.
fn merge_extension(primary: Declaration, extension: &Declaration) -> Declaration {
    let mut merged = primary;
    for proto in &extension.conformed_protocols {
        if !merged.conformed_protocols.contains(proto) {
            merged.conformed_protocols.push(proto.clone());
        }
    }
    merged.properties.extend(extension.properties.clone());
    merged.methods.extend(extension.methods.clone());
    merged.initializers.extend(extension.initializers.clone());
    merged.subscripts.extend(extension.subscripts.clone());
    merged.type_aliases.extend(extension.type_aliases.clone());
    merged.nested.extend(extension.nested.clone());
    merged
        .associated_types
        .extend(extension.associated_types.clone());
    merged.requirements.extend(extension.requirements.clone());
    merged.generics.extend(extension.generics.clone());
    merged.attributes.extend(extension.attributes.clone());
    merged
}
