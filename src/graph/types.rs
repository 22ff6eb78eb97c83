//
//  types.rs
//  Trellis
//
//  Created by hak (tharun)
//

use serde::{Deserialize, Serialize};

use crate::decl::Declaration;

/// The kind of a directed relationship between two type nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    // Structural — derived from a declaration's own shape.
    /// Subtype -> supertype.
    Inherits,
    /// Type -> protocol named in its conformance clause.
    Conforms,
    /// Owner -> type of a mutable stored property.
    Composes,
    /// Owner -> type of an immutable stored property.
    Aggregates,
    /// Owner -> type appearing in a method/initializer/subscript signature.
    DependsOn,

    // Protocol implementation.
    /// Concrete type -> protocol it conforms to (protocol node exists).
    Implements,
    /// Protocol -> protocol it refines.
    ProtocolInherits,
    /// Owner -> concrete implementation reachable through a protocol-typed
    /// member (dependency-injection surface).
    InjectedVia,
    /// Concrete type -> protocol whose requirement it satisfies by name.
    FulfillsRequirement,

    // Deep type structure.
    /// Owner -> type argument of a generic base.
    GenericParameter,
    /// Owner -> constraint on one of its generic parameters.
    GenericConstraint,
    /// Owner -> property-wrapper attribute applied to one of its properties.
    WrappedBy,
    /// Owner -> element/value type of a collection-typed member.
    ElementType,

    // Protocol-internal structure.
    /// Protocol -> one of its associated types.
    AssociatedType,
    /// Associated type -> its inherited-type constraint.
    TypeConstraint,
    /// Protocol -> type referenced by a method requirement.
    RequiresMethod,
    /// Protocol -> type referenced by a property requirement.
    RequiresProperty,
    /// Associated type -> its default, or conformer -> aliased type.
    ResolvesAssociatedType,
}

/// The four relationship families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipFamily {
    Structural,
    ProtocolImplementation,
    DeepType,
    ProtocolInternal,
}

impl RelationshipKind {
    pub fn family(&self) -> RelationshipFamily {
        use RelationshipKind::*;
        match self {
            Inherits | Conforms | Composes | Aggregates | DependsOn => {
                RelationshipFamily::Structural
            }
            Implements | ProtocolInherits | InjectedVia | FulfillsRequirement => {
                RelationshipFamily::ProtocolImplementation
            }
            GenericParameter | GenericConstraint | WrappedBy | ElementType => {
                RelationshipFamily::DeepType
            }
            AssociatedType | TypeConstraint | RequiresMethod | RequiresProperty
            | ResolvesAssociatedType => RelationshipFamily::ProtocolInternal,
        }
    }

    /// Expansion priority during traversal. Lower is expanded first.
    pub fn priority(&self) -> u8 {
        use RelationshipKind::*;
        match self {
            Inherits | ProtocolInherits => 0,
            Conforms | Implements => 1,
            AssociatedType | GenericParameter | GenericConstraint => 2,
            Composes => 3,
            Aggregates => 4,
            DependsOn => 5,
            InjectedVia => 6,
            WrappedBy | ElementType | TypeConstraint | RequiresMethod | RequiresProperty
            | ResolvesAssociatedType | FulfillsRequirement => 7,
        }
    }

    /// Depth budget consumed when traversing one edge of this kind.
    pub fn cost(&self) -> u32 {
        use RelationshipKind::*;
        match self {
            Inherits | ProtocolInherits | Conforms | Implements | GenericParameter
            | GenericConstraint | AssociatedType => 1,
            _ => 2,
        }
    }
}

/// Edge payload stored in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    pub kind: RelationshipKind,
    /// Free-text annotation (member name, role). Part of edge identity.
    pub details: Option<String>,
}

/// One relationship, in the plain-data shape handed to export backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
    #[serde(default)]
    pub details: Option<String>,
}

/// Deduplication key for the global edge set — the full tuple, `details`
/// included, so two same-shaped relationships with different annotations
/// stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct EdgeKey {
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
    pub details: Option<String>,
}

/// One node of the type graph: exactly one post-merge declaration. Outgoing
/// edges live on the graph itself.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub decl: Declaration,
}

impl GraphNode {
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn is_phantom(&self) -> bool {
        self.decl.is_phantom
    }
}

/// Counters over the live graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub phantom_count: usize,
    pub protocol_count: usize,
    pub extension_merge_count: usize,
}

/// A data-integrity signal: a relationship was recorded whose `from`
/// endpoint never arrived through `add_declaration`. The edge is dropped,
/// not patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityDiagnostic {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
}

impl std::fmt::Display for IntegrityDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "relationship source '{}' was never ingested (dropped {:?} edge to '{}')",
            self.source, self.kind, self.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families_cover_all_kinds() {
        use RelationshipKind::*;
        let all = [
            Inherits,
            Conforms,
            Composes,
            Aggregates,
            DependsOn,
            Implements,
            ProtocolInherits,
            InjectedVia,
            FulfillsRequirement,
            GenericParameter,
            GenericConstraint,
            WrappedBy,
            ElementType,
            AssociatedType,
            TypeConstraint,
            RequiresMethod,
            RequiresProperty,
            ResolvesAssociatedType,
        ];
        assert_eq!(all.len(), 18);
        for kind in all {
            // Every kind has a family, a priority, and a cost of 1 or 2.
            let _ = kind.family();
            assert!(kind.priority() <= 7);
            assert!(matches!(kind.cost(), 1 | 2));
        }
    }

    #[test]
    fn test_traversal_costs() {
        use RelationshipKind::*;
        for kind in [
            Inherits,
            ProtocolInherits,
            Conforms,
            Implements,
            GenericParameter,
            GenericConstraint,
            AssociatedType,
        ] {
            assert_eq!(kind.cost(), 1);
        }
        for kind in [Composes, Aggregates, DependsOn, InjectedVia, WrappedBy] {
            assert_eq!(kind.cost(), 2);
        }
    }

    #[test]
    fn test_inheritance_outranks_composition() {
        use RelationshipKind::*;
        assert!(Inherits.priority() < Conforms.priority());
        assert!(Conforms.priority() < Composes.priority());
        assert!(Composes.priority() < Aggregates.priority());
        assert!(Aggregates.priority() < DependsOn.priority());
        assert!(DependsOn.priority() < InjectedVia.priority());
        assert!(InjectedVia.priority() < ElementType.priority());
    }

    #[test]
    fn test_kind_serialization_is_kebab_case() {
        let json = serde_json::to_string(&RelationshipKind::DependsOn).unwrap();
        assert_eq!(json, "\"depends-on\"");
        let json = serde_json::to_string(&RelationshipKind::ResolvesAssociatedType).unwrap();
        assert_eq!(json, "\"resolves-associated-type\"");
    }
}
