//
//  phantom.rs
//  Trellis
//
//  Created by hak (tharun)
//

use petgraph::graph::NodeIndex;
use tracing::debug;

use super::engine::TypeGraph;
use super::types::RelationshipKind;
use crate::classify::{classify_external, known_base_chain, PresumedKind};
use crate::decl::Declaration;

impl TypeGraph {
    /// Make sure an edge target exists, synthesizing a phantom node when it
    /// does not.
    ///
    /// A phantom classified as a class also gets its well-known ancestry
    /// reconstructed: each ancestor in the base chain is ensured as a
    /// phantom and linked with an inherits edge, nearest first, so
    /// inheritance-focused queries stay connected instead of terminating at
    /// the first external reference.
    pub(crate) fn ensure_target(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.name_index.get(name) {
            return idx;
        }

        let classification = classify_external(name);
        debug!(
            name = %name,
            kind = ?classification.kind,
            module = classification.module.unwrap_or("unknown"),
            "synthesizing phantom node"
        );
        let idx = self.insert_node(Declaration::phantom(
            name,
            classification.kind.into(),
            classification.module,
        ));

        if classification.kind == PresumedKind::Class {
            let mut prev = idx;
            for ancestor in known_base_chain(name) {
                let ancestor_idx = match self.name_index.get(*ancestor) {
                    Some(&existing) => existing,
                    None => {
                        let ancestor_class = classify_external(ancestor);
                        self.insert_node(Declaration::phantom(
                            *ancestor,
                            ancestor_class.kind.into(),
                            ancestor_class.module,
                        ))
                    }
                };
                self.record_edge(prev, ancestor_idx, RelationshipKind::Inherits, None);
                prev = ancestor_idx;
            }
        }

        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{AccessLevel, DeclKind};
    use crate::graph::types::Relationship;

    #[test]
    fn test_phantom_defaults() {
        let mut graph = TypeGraph::new();
        graph.add_declaration(Declaration::new("Owner", DeclKind::Class));
        graph.add_relationship("Owner", "Widget", RelationshipKind::DependsOn, None);

        let widget = graph.node("Widget").unwrap();
        assert!(widget.is_phantom());
        assert_eq!(widget.decl.access, AccessLevel::Open);
        assert!(widget.decl.location.is_external());
    }

    #[test]
    fn test_phantom_chain_reconstruction() {
        // UIView belongs to a known family with two ancestors; referencing
        // it from one real declaration must produce three phantoms chained
        // by three inherits edges.
        let mut graph = TypeGraph::new();
        let mut decl = Declaration::new("ProfileView", DeclKind::Class);
        decl.inherited_types.push("UIView".to_string());
        graph.add_declaration(decl);

        for name in ["UIView", "UIResponder", "NSObject"] {
            let node = graph.node(name).unwrap();
            assert!(node.is_phantom(), "{name} should be a phantom");
        }
        assert!(!graph.node("ProfileView").unwrap().is_phantom());

        let inherits: Vec<Relationship> = graph
            .all_relationships()
            .into_iter()
            .filter(|r| r.kind == RelationshipKind::Inherits)
            .collect();
        assert_eq!(inherits.len(), 3);
        let has = |from: &str, to: &str| inherits.iter().any(|r| r.from == from && r.to == to);
        assert!(has("ProfileView", "UIView"));
        assert!(has("UIView", "UIResponder"));
        assert!(has("UIResponder", "NSObject"));
    }

    #[test]
    fn test_phantom_module_from_classification() {
        let mut graph = TypeGraph::new();
        graph.add_declaration(Declaration::new("Owner", DeclKind::Class));
        graph.add_relationship("Owner", "CALayer", RelationshipKind::DependsOn, None);
        assert_eq!(
            graph.node("CALayer").unwrap().decl.module.as_deref(),
            Some("QuartzCore")
        );
    }

    #[test]
    fn test_unknown_class_gets_no_ancestry() {
        let mut graph = TypeGraph::new();
        graph.add_declaration(Declaration::new("Owner", DeclKind::Class));
        graph.add_relationship("Owner", "Widget", RelationshipKind::DependsOn, None);

        // One real node, one phantom, one edge — nothing synthesized beyond
        // the referenced name.
        assert_eq!(graph.stats().total_nodes, 2);
        assert_eq!(graph.stats().total_edges, 1);
    }

    #[test]
    fn test_protocol_phantom_has_no_chain() {
        let mut graph = TypeGraph::new();
        graph.add_declaration(Declaration::new("Owner", DeclKind::Class));
        graph.add_relationship("Owner", "FeedDelegate", RelationshipKind::Conforms, None);

        let phantom = graph.node("FeedDelegate").unwrap();
        assert_eq!(phantom.decl.kind, DeclKind::Protocol);
        assert_eq!(graph.stats().total_nodes, 2);
    }
}
