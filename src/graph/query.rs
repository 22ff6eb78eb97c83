//
//  query.rs
//  Trellis
//
//  Created by hak (tharun)
//

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use super::engine::TypeGraph;
use super::types::{RelationshipFamily, RelationshipKind};
use crate::decl::Declaration;

/// How a neighborhood query filters and walks edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalMode {
    /// Every edge kind, both directions.
    Standard,
    /// Inheritance/conformance edges only. With `include_descendants` unset
    /// the walk follows outgoing edges only — ancestors, not subtypes.
    InheritanceOnly { include_descendants: bool },
    /// Structural-family edges only.
    CompositionOnly,
    /// Protocol-implementation and protocol-internal families only.
    ProtocolOnly,
}

impl Default for TraversalMode {
    fn default() -> Self {
        TraversalMode::Standard
    }
}

impl TraversalMode {
    fn admits(&self, kind: RelationshipKind) -> bool {
        match self {
            TraversalMode::Standard => true,
            TraversalMode::InheritanceOnly { .. } => matches!(
                kind,
                RelationshipKind::Inherits
                    | RelationshipKind::ProtocolInherits
                    | RelationshipKind::Conforms
                    | RelationshipKind::Implements
            ),
            TraversalMode::CompositionOnly => kind.family() == RelationshipFamily::Structural,
            TraversalMode::ProtocolOnly => matches!(
                kind.family(),
                RelationshipFamily::ProtocolImplementation | RelationshipFamily::ProtocolInternal
            ),
        }
    }

    fn walks_incoming(&self) -> bool {
        !matches!(
            self,
            TraversalMode::InheritanceOnly {
                include_descendants: false
            }
        )
    }
}

/// A candidate discovery waiting in the work-list: ordered by edge priority,
/// ties broken by discovery sequence for determinism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct WorkItem {
    priority: u8,
    seq: u64,
    node: NodeIndex,
    remaining: u32,
}

impl TypeGraph {
    /// The neighborhood of `root` reachable within the depth budget, as
    /// copied declarations (first the root, then nodes in visit order).
    ///
    /// Expansion is priority-ordered, not plain BFS: candidate edges at each
    /// visited node are scored by kind and the best-ranked discovery is
    /// expanded first. Each edge consumes its kind's traversal cost from the
    /// remaining budget; a node is reachable only along a path whose
    /// accumulated cost fits. Visiting is first-discovery-wins — a cheaper
    /// path found later does not re-expand a visited node.
    pub fn related(&self, root: &str, max_depth: u32, mode: TraversalMode) -> Vec<Declaration> {
        let Some(&root_idx) = self.name_index.get(root) else {
            return Vec::new();
        };

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut order: Vec<NodeIndex> = Vec::new();
        let mut worklist: BinaryHeap<Reverse<WorkItem>> = BinaryHeap::new();
        let mut seq: u64 = 0;

        visited.insert(root_idx);
        order.push(root_idx);
        self.enqueue_neighbors(root_idx, max_depth, mode, &visited, &mut worklist, &mut seq);

        while let Some(Reverse(item)) = worklist.pop() {
            if !visited.insert(item.node) {
                continue;
            }
            order.push(item.node);
            self.enqueue_neighbors(item.node, item.remaining, mode, &visited, &mut worklist, &mut seq);
        }

        order.into_iter().map(|idx| self.graph[idx].decl.clone()).collect()
    }

    fn enqueue_neighbors(
        &self,
        node: NodeIndex,
        budget: u32,
        mode: TraversalMode,
        visited: &HashSet<NodeIndex>,
        worklist: &mut BinaryHeap<Reverse<WorkItem>>,
        seq: &mut u64,
    ) {
        let directions: &[Direction] = if mode.walks_incoming() {
            &[Direction::Outgoing, Direction::Incoming]
        } else {
            &[Direction::Outgoing]
        };

        for &direction in directions {
            for edge in self.graph.edges_directed(node, direction) {
                let kind = edge.weight().kind;
                if !mode.admits(kind) {
                    continue;
                }
                let cost = kind.cost();
                if cost > budget {
                    continue;
                }
                let neighbor = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                if visited.contains(&neighbor) {
                    continue;
                }
                worklist.push(Reverse(WorkItem {
                    priority: kind.priority(),
                    seq: *seq,
                    node: neighbor,
                    remaining: budget - cost,
                }));
                *seq += 1;
            }
        }
    }
}
