//
//  inference.rs
//  Trellis
//
//  Created by hak (tharun)
//

//! Relationship inference passes.
//!
//! The structural pass runs per declaration at insert time. The global
//! passes are barrier operations: they query "all nodes"/"all conformers"
//! and must not run until every declaration has been committed — running
//! them early yields a silently incomplete graph, not an error.
//!
//! Every pass is a free function over `&mut TypeGraph` and is idempotent
//! with respect to the deduplicated edge set.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use super::engine::TypeGraph;
use super::types::RelationshipKind;
use crate::classify::{classify_external, PresumedKind};
use crate::decl::{DeclKind, Declaration, RequirementKind};
use crate::typeexpr::{closure_signature, decompose, is_primitive, is_wrapper_attribute};

/// Run every global pass, in order. Call only after ingestion is complete.
pub fn run_global_passes(graph: &mut TypeGraph) {
    debug!("running protocol implementation pass");
    run_protocol_implementation(graph);
    debug!("running deep type pass");
    run_deep_type(graph);
    debug!("running protocol internal structure pass");
    run_protocol_internal(graph);

    let stats = graph.stats();
    info!(
        nodes = stats.total_nodes,
        edges = stats.total_edges,
        phantoms = stats.phantom_count,
        "global inference passes complete"
    );
}

/// Structural pass: relationships derivable from one declaration's own
/// shape. Runs whenever that declaration is inserted or merged.
pub fn run_structural(graph: &mut TypeGraph, name: &str) {
    let Some(node) = graph.node(name) else {
        return;
    };
    let decl = node.decl.clone();

    // Supertypes. Extensions never contribute inheritance; a protocol's
    // inheritance clause refines other protocols.
    if decl.kind != DeclKind::Extension {
        let supertype_kind = if decl.kind == DeclKind::Protocol {
            RelationshipKind::ProtocolInherits
        } else {
            RelationshipKind::Inherits
        };
        for parent in &decl.inherited_types {
            let base = decompose(parent).base;
            graph.add_relationship(&decl.name, &base, supertype_kind, None);
        }
    }

    for proto in &decl.conformed_protocols {
        let base = decompose(proto).base;
        graph.add_relationship(&decl.name, &base, RelationshipKind::Conforms, None);
    }

    for prop in &decl.properties {
        let shape = decompose(&prop.type_expr);
        if shape.is_closure || is_primitive(&shape.base) {
            continue;
        }
        let kind = if prop.is_mutable {
            RelationshipKind::Composes
        } else {
            RelationshipKind::Aggregates
        };
        graph.add_relationship(&decl.name, &shape.base, kind, Some(prop.name.clone()));
    }

    for method in decl.methods.iter().chain(decl.initializers.iter()) {
        for param in &method.params {
            if let Some(target) = edge_target(&param.type_expr) {
                graph.add_relationship(
                    &decl.name,
                    &target,
                    RelationshipKind::DependsOn,
                    Some(format!("{}(parameter: {})", method.name, param.name)),
                );
            }
        }
        if let Some(ret) = &method.return_type {
            if let Some(target) = edge_target(ret) {
                graph.add_relationship(
                    &decl.name,
                    &target,
                    RelationshipKind::DependsOn,
                    Some(format!("{}(return)", method.name)),
                );
            }
        }
    }

    for subscript in &decl.subscripts {
        for param in &subscript.params {
            if let Some(target) = edge_target(&param.type_expr) {
                graph.add_relationship(
                    &decl.name,
                    &target,
                    RelationshipKind::DependsOn,
                    Some(format!("subscript(parameter: {})", param.name)),
                );
            }
        }
        if let Some(target) = edge_target(&subscript.return_type) {
            graph.add_relationship(
                &decl.name,
                &target,
                RelationshipKind::DependsOn,
                Some("subscript(return)".to_string()),
            );
        }
    }
}

/// Protocol-implementation pass: `implements` edges for every conformer of
/// an ingested protocol, and `injected-via` edges for protocol-typed
/// properties and initializer parameters (the dependency-injection surface,
/// without dataflow analysis).
pub fn run_protocol_implementation(graph: &mut TypeGraph) {
    let decls = graph.snapshot_declarations();
    let protocol_names: BTreeSet<String> = decls
        .iter()
        .filter(|d| d.kind == DeclKind::Protocol)
        .map(|d| d.name.clone())
        .collect();

    // protocol name -> concrete conformers, in a deterministic order.
    let mut conformers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for decl in &decls {
        if !decl.kind.is_concrete() {
            continue;
        }
        for proto in &decl.conformed_protocols {
            let base = decompose(proto).base;
            conformers.entry(base).or_default().push(decl.name.clone());
        }
    }

    for (proto, names) in &conformers {
        if !protocol_names.contains(proto) {
            continue;
        }
        for name in names {
            graph.add_relationship(name, proto, RelationshipKind::Implements, None);
        }
    }

    for decl in &decls {
        let members = decl
            .properties
            .iter()
            .map(|p| (p.name.clone(), p.type_expr.clone()))
            .chain(decl.initializers.iter().flat_map(|init| {
                init.params
                    .iter()
                    .map(|p| (p.name.clone(), p.type_expr.clone()))
            }));
        for (member, type_expr) in members {
            let shape = decompose(&type_expr);
            if shape.is_closure || is_primitive(&shape.base) {
                continue;
            }
            let protocol_like = protocol_names.contains(&shape.base)
                || classify_external(&shape.base).kind == PresumedKind::Protocol;
            if !protocol_like {
                continue;
            }
            let Some(implementations) = conformers.get(&shape.base) else {
                continue;
            };
            for implementation in implementations {
                if implementation != &decl.name {
                    graph.add_relationship(
                        &decl.name,
                        implementation,
                        RelationshipKind::InjectedVia,
                        Some(member.clone()),
                    );
                }
            }
        }
    }
}

/// Deep-type pass: re-decompose every member type and surface the structure
/// a flat base name hides — generic arguments, collection elements, closure
/// signatures, property wrappers, generic constraints.
pub fn run_deep_type(graph: &mut TypeGraph) {
    let decls = graph.snapshot_declarations();
    for decl in &decls {
        for prop in &decl.properties {
            if let Some(wrapper) = prop.attributes.iter().find(|a| is_wrapper_attribute(a)) {
                let wrapper_name = wrapper.trim_start_matches('@').to_string();
                graph.add_relationship(
                    &decl.name,
                    &wrapper_name,
                    RelationshipKind::WrappedBy,
                    Some(prop.name.clone()),
                );
            }
            analyze_member_type(graph, &decl.name, &prop.type_expr, &prop.name);
        }

        for method in decl.methods.iter().chain(decl.initializers.iter()) {
            for param in &method.params {
                let context = format!("{}(parameter: {})", method.name, param.name);
                analyze_member_type(graph, &decl.name, &param.type_expr, &context);
            }
            if let Some(ret) = &method.return_type {
                let context = format!("{}(return)", method.name);
                analyze_member_type(graph, &decl.name, ret, &context);
            }
        }

        for subscript in &decl.subscripts {
            for param in &subscript.params {
                let context = format!("subscript(parameter: {})", param.name);
                analyze_member_type(graph, &decl.name, &param.type_expr, &context);
            }
            analyze_member_type(graph, &decl.name, &subscript.return_type, "subscript(return)");
        }

        for generic in &decl.generics {
            if let Some(constraint) = &generic.constraint {
                let base = decompose(constraint).base;
                if !is_primitive(&base) {
                    graph.add_relationship(
                        &decl.name,
                        &base,
                        RelationshipKind::GenericConstraint,
                        Some(generic.name.clone()),
                    );
                }
            }
        }
    }
}

/// Protocol-internal pass: associated types with their constraints and
/// defaults, requirement edges, and conformer-side resolution
/// (`resolves-associated-type` via matching type aliases,
/// `fulfills-requirement` via matching member names).
pub fn run_protocol_internal(graph: &mut TypeGraph) {
    let decls = graph.snapshot_declarations();
    let protocols: Vec<&Declaration> = decls
        .iter()
        .filter(|d| d.kind == DeclKind::Protocol)
        .collect();

    for proto in &protocols {
        for assoc in &proto.associated_types {
            graph.add_relationship(
                &proto.name,
                &assoc.name,
                RelationshipKind::AssociatedType,
                None,
            );
            if let Some(constraint) = &assoc.constraint {
                let base = decompose(constraint).base;
                if !is_primitive(&base) {
                    graph.add_relationship(
                        &assoc.name,
                        &base,
                        RelationshipKind::TypeConstraint,
                        None,
                    );
                }
            }
            if let Some(default) = &assoc.default_type {
                let base = decompose(default).base;
                if !is_primitive(&base) {
                    graph.add_relationship(
                        &assoc.name,
                        &base,
                        RelationshipKind::ResolvesAssociatedType,
                        None,
                    );
                }
            }
        }

        for requirement in &proto.requirements {
            let kind = match requirement.kind {
                RequirementKind::Method => RelationshipKind::RequiresMethod,
                RequirementKind::Property => RelationshipKind::RequiresProperty,
            };
            for type_ref in &requirement.type_refs {
                if let Some(target) = edge_target(type_ref) {
                    graph.add_relationship(
                        &proto.name,
                        &target,
                        kind,
                        Some(requirement.name.clone()),
                    );
                }
            }
        }

        // A protocol's own member lists are requirements too.
        for prop in &proto.properties {
            if let Some(target) = edge_target(&prop.type_expr) {
                graph.add_relationship(
                    &proto.name,
                    &target,
                    RelationshipKind::RequiresProperty,
                    Some(prop.name.clone()),
                );
            }
        }
        for method in &proto.methods {
            for param in &method.params {
                if let Some(target) = edge_target(&param.type_expr) {
                    graph.add_relationship(
                        &proto.name,
                        &target,
                        RelationshipKind::RequiresMethod,
                        Some(method.name.clone()),
                    );
                }
            }
            if let Some(ret) = &method.return_type {
                if let Some(target) = edge_target(ret) {
                    graph.add_relationship(
                        &proto.name,
                        &target,
                        RelationshipKind::RequiresMethod,
                        Some(method.name.clone()),
                    );
                }
            }
        }
    }

    for decl in &decls {
        if !decl.kind.is_concrete() {
            continue;
        }
        for proto_ref in &decl.conformed_protocols {
            let proto_name = decompose(proto_ref).base;
            let Some(proto) = protocols.iter().find(|p| p.name == proto_name) else {
                continue;
            };

            for alias in &decl.type_aliases {
                if proto.associated_types.iter().any(|a| a.name == alias.name) {
                    let base = decompose(&alias.target).base;
                    graph.add_relationship(
                        &decl.name,
                        &base,
                        RelationshipKind::ResolvesAssociatedType,
                        Some(alias.name.clone()),
                    );
                }
            }

            let required: BTreeSet<&str> = proto
                .requirements
                .iter()
                .map(|r| r.name.as_str())
                .chain(proto.properties.iter().map(|p| p.name.as_str()))
                .chain(proto.methods.iter().map(|m| m.name.as_str()))
                .collect();
            let supplied = decl
                .properties
                .iter()
                .map(|p| p.name.as_str())
                .chain(decl.methods.iter().map(|m| m.name.as_str()));
            for member in supplied {
                if required.contains(member) {
                    graph.add_relationship(
                        &decl.name,
                        &proto.name,
                        RelationshipKind::FulfillsRequirement,
                        Some(member.to_string()),
                    );
                }
            }
        }
    }
}

/// The base name a member type contributes an edge to, when it does:
/// closures and builtins contribute none.
fn edge_target(raw: &str) -> Option<String> {
    let shape = decompose(raw);
    if shape.is_closure || is_primitive(&shape.base) {
        return None;
    }
    Some(shape.base)
}

/// Generic/collection/closure analysis for one member type expression.
fn analyze_member_type(graph: &mut TypeGraph, owner: &str, raw: &str, member: &str) {
    let shape = decompose(raw);

    if shape.is_closure {
        if let Some((params, ret)) = closure_signature(raw) {
            for param in &params {
                if let Some(target) = edge_target(param) {
                    graph.add_relationship(
                        owner,
                        &target,
                        RelationshipKind::DependsOn,
                        Some(format!("{member} (closure parameter)")),
                    );
                }
            }
            if let Some(ret) = ret {
                if let Some(target) = edge_target(&ret) {
                    graph.add_relationship(
                        owner,
                        &target,
                        RelationshipKind::DependsOn,
                        Some(format!("{member} (closure return)")),
                    );
                }
            }
        }
        return;
    }

    if shape.is_array && !is_primitive(&shape.base) {
        graph.add_relationship(
            owner,
            &shape.base,
            RelationshipKind::ElementType,
            Some(member.to_string()),
        );
    }

    if shape.generic_args.is_empty() {
        return;
    }
    let is_collection = matches!(shape.base.as_str(), "Array" | "Set" | "Dictionary");
    for arg in &shape.generic_args {
        let arg_base = decompose(arg).base;
        if is_primitive(&arg_base) {
            continue;
        }
        let kind = if is_collection {
            RelationshipKind::ElementType
        } else {
            RelationshipKind::GenericParameter
        };
        graph.add_relationship(owner, &arg_base, kind, Some(member.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{
        AssociatedTypeSpec, GenericParamSpec, MethodSpec, ParamSpec, PropertySpec, RequirementSpec,
        SubscriptSpec, TypeAliasSpec,
    };
    use crate::graph::types::Relationship;
    use std::collections::HashSet;

    fn edge(from: &str, to: &str, kind: RelationshipKind, details: Option<&str>) -> Relationship {
        Relationship {
            from: from.to_string(),
            to: to.to_string(),
            kind,
            details: details.map(str::to_string),
        }
    }

    fn edges_of(graph: &TypeGraph) -> HashSet<Relationship> {
        graph.all_relationships().into_iter().collect()
    }

    #[test]
    fn test_structural_method_dependencies() {
        let mut decl = Declaration::new("Loader", DeclKind::Class);
        let mut method = MethodSpec::new("fetch");
        method.params.push(ParamSpec::new("request", "Request"));
        method.return_type = Some("Response".to_string());
        decl.methods.push(method);
        decl.subscripts.push(SubscriptSpec {
            params: vec![ParamSpec::new("key", "CacheKey")],
            return_type: "Entry".to_string(),
        });

        let mut graph = TypeGraph::new();
        graph.add_declaration(decl);

        let edges = edges_of(&graph);
        assert!(edges.contains(&edge(
            "Loader",
            "Request",
            RelationshipKind::DependsOn,
            Some("fetch(parameter: request)"),
        )));
        assert!(edges.contains(&edge(
            "Loader",
            "Response",
            RelationshipKind::DependsOn,
            Some("fetch(return)"),
        )));
        assert!(edges.contains(&edge(
            "Loader",
            "CacheKey",
            RelationshipKind::DependsOn,
            Some("subscript(parameter: key)"),
        )));
        assert!(edges.contains(&edge(
            "Loader",
            "Entry",
            RelationshipKind::DependsOn,
            Some("subscript(return)"),
        )));
    }

    #[test]
    fn test_structural_skips_primitive_and_closure_properties() {
        let mut decl = Declaration::new("Config", DeclKind::Struct);
        decl.properties.push(PropertySpec::new("count", "Int", true));
        decl.properties
            .push(PropertySpec::new("onChange", "(Int) -> Void", true));

        let mut graph = TypeGraph::new();
        graph.add_declaration(decl);

        assert!(graph
            .all_relationships()
            .iter()
            .all(|r| r.kind != RelationshipKind::Composes));
    }

    #[test]
    fn test_protocol_inheritance_uses_protocol_inherits() {
        let mut proto = Declaration::new("FeedSource", DeclKind::Protocol);
        proto.inherited_types.push("Source".to_string());

        let mut graph = TypeGraph::new();
        graph.add_declaration(proto);

        assert!(edges_of(&graph).contains(&edge(
            "FeedSource",
            "Source",
            RelationshipKind::ProtocolInherits,
            None,
        )));
    }

    #[test]
    fn test_implements_pass() {
        let proto = Declaration::new("Cache", DeclKind::Protocol);
        let mut store = Declaration::new("DiskCache", DeclKind::Class);
        store.conformed_protocols.push("Cache".to_string());

        let mut graph = TypeGraph::new();
        graph.add_declaration(proto);
        graph.add_declaration(store);
        run_global_passes(&mut graph);

        let edges = edges_of(&graph);
        assert!(edges.contains(&edge("DiskCache", "Cache", RelationshipKind::Conforms, None)));
        assert!(edges.contains(&edge(
            "DiskCache",
            "Cache",
            RelationshipKind::Implements,
            None
        )));
    }

    #[test]
    fn test_injection_pass() {
        let proto = Declaration::new("Transport", DeclKind::Protocol);
        let mut http = Declaration::new("HttpTransport", DeclKind::Class);
        http.conformed_protocols.push("Transport".to_string());
        let mut client = Declaration::new("ApiClient", DeclKind::Class);
        client
            .properties
            .push(PropertySpec::new("transport", "Transport", false));
        let mut init = MethodSpec::new("init");
        init.params.push(ParamSpec::new("transport", "Transport"));
        client.initializers.push(init);

        let mut graph = TypeGraph::new();
        graph.add_declaration(proto);
        graph.add_declaration(http);
        graph.add_declaration(client);
        run_global_passes(&mut graph);

        let edges = edges_of(&graph);
        assert!(edges.contains(&edge(
            "ApiClient",
            "HttpTransport",
            RelationshipKind::InjectedVia,
            Some("transport"),
        )));
    }

    #[test]
    fn test_deep_type_generic_and_element_edges() {
        let mut decl = Declaration::new("Feed", DeclKind::Struct);
        decl.properties
            .push(PropertySpec::new("items", "[Item]", true));
        decl.properties
            .push(PropertySpec::new("index", "[String: Entry]", true));
        decl.properties
            .push(PropertySpec::new("publisher", "Publisher<Event>", false));

        let mut graph = TypeGraph::new();
        graph.add_declaration(decl);
        run_global_passes(&mut graph);

        let edges = edges_of(&graph);
        assert!(edges.contains(&edge(
            "Feed",
            "Item",
            RelationshipKind::ElementType,
            Some("items")
        )));
        assert!(edges.contains(&edge(
            "Feed",
            "Entry",
            RelationshipKind::ElementType,
            Some("index")
        )));
        assert!(edges.contains(&edge(
            "Feed",
            "Event",
            RelationshipKind::GenericParameter,
            Some("publisher"),
        )));
        // String is builtin — no element edge for the dictionary key.
        assert!(!edges
            .iter()
            .any(|r| r.to == "String" && r.kind == RelationshipKind::ElementType));
    }

    #[test]
    fn test_deep_type_closure_edges() {
        let mut decl = Declaration::new("Button", DeclKind::Class);
        decl.properties
            .push(PropertySpec::new("onTap", "(TapEvent) -> Feedback", true));

        let mut graph = TypeGraph::new();
        graph.add_declaration(decl);
        run_global_passes(&mut graph);

        let edges = edges_of(&graph);
        assert!(edges.contains(&edge(
            "Button",
            "TapEvent",
            RelationshipKind::DependsOn,
            Some("onTap (closure parameter)"),
        )));
        assert!(edges.contains(&edge(
            "Button",
            "Feedback",
            RelationshipKind::DependsOn,
            Some("onTap (closure return)"),
        )));
    }

    #[test]
    fn test_deep_type_wrapper_edge() {
        let mut decl = Declaration::new("Model", DeclKind::Class);
        let mut prop = PropertySpec::new("items", "[Item]", true);
        prop.attributes.push("Published".to_string());
        decl.properties.push(prop);

        let mut graph = TypeGraph::new();
        graph.add_declaration(decl);
        run_global_passes(&mut graph);

        let edges = edges_of(&graph);
        assert!(edges.contains(&edge(
            "Model",
            "Published",
            RelationshipKind::WrappedBy,
            Some("items")
        )));
        // Collection analysis still runs on the wrapped type.
        assert!(edges.contains(&edge(
            "Model",
            "Item",
            RelationshipKind::ElementType,
            Some("items")
        )));
    }

    #[test]
    fn test_generic_constraint_edge() {
        let mut decl = Declaration::new("Store", DeclKind::Struct);
        decl.generics.push(GenericParamSpec {
            name: "Value".to_string(),
            constraint: Some("Persistable".to_string()),
        });

        let mut graph = TypeGraph::new();
        graph.add_declaration(decl);
        run_global_passes(&mut graph);

        assert!(edges_of(&graph).contains(&edge(
            "Store",
            "Persistable",
            RelationshipKind::GenericConstraint,
            Some("Value"),
        )));
    }

    #[test]
    fn test_protocol_internal_associated_types() {
        let mut proto = Declaration::new("Repository", DeclKind::Protocol);
        proto.associated_types.push(AssociatedTypeSpec {
            name: "Entity".to_string(),
            constraint: Some("Persistable".to_string()),
            default_type: Some("Record".to_string()),
        });

        let mut graph = TypeGraph::new();
        graph.add_declaration(proto);
        run_global_passes(&mut graph);

        let edges = edges_of(&graph);
        assert!(edges.contains(&edge(
            "Repository",
            "Entity",
            RelationshipKind::AssociatedType,
            None
        )));
        assert!(edges.contains(&edge(
            "Entity",
            "Persistable",
            RelationshipKind::TypeConstraint,
            None
        )));
        assert!(edges.contains(&edge(
            "Entity",
            "Record",
            RelationshipKind::ResolvesAssociatedType,
            None,
        )));
    }

    #[test]
    fn test_protocol_fulfillment() {
        let mut proto = Declaration::new("P", DeclKind::Protocol);
        proto.requirements.push(RequirementSpec {
            name: "m".to_string(),
            kind: RequirementKind::Method,
            type_refs: vec![],
        });
        let mut concrete = Declaration::new("X", DeclKind::Struct);
        concrete.conformed_protocols.push("P".to_string());
        concrete.methods.push(MethodSpec::new("m"));

        let mut graph = TypeGraph::new();
        graph.add_declaration(proto);
        graph.add_declaration(concrete);
        run_global_passes(&mut graph);

        let edges = edges_of(&graph);
        assert!(edges.contains(&edge("X", "P", RelationshipKind::Implements, None)));
        assert!(edges.contains(&edge(
            "X",
            "P",
            RelationshipKind::FulfillsRequirement,
            Some("m")
        )));
    }

    #[test]
    fn test_conformer_type_alias_resolves_associated_type() {
        let mut proto = Declaration::new("Repository", DeclKind::Protocol);
        proto.associated_types.push(AssociatedTypeSpec {
            name: "Entity".to_string(),
            constraint: None,
            default_type: None,
        });
        let mut concrete = Declaration::new("UserRepository", DeclKind::Class);
        concrete.conformed_protocols.push("Repository".to_string());
        concrete.type_aliases.push(TypeAliasSpec {
            name: "Entity".to_string(),
            target: "User".to_string(),
        });

        let mut graph = TypeGraph::new();
        graph.add_declaration(proto);
        graph.add_declaration(concrete);
        run_global_passes(&mut graph);

        assert!(edges_of(&graph).contains(&edge(
            "UserRepository",
            "User",
            RelationshipKind::ResolvesAssociatedType,
            Some("Entity"),
        )));
    }

    #[test]
    fn test_requirement_type_refs() {
        let mut proto = Declaration::new("Renderer", DeclKind::Protocol);
        proto.requirements.push(RequirementSpec {
            name: "draw".to_string(),
            kind: RequirementKind::Method,
            type_refs: vec!["Canvas".to_string(), "Int".to_string()],
        });
        proto
            .properties
            .push(PropertySpec::new("viewport", "Viewport", true));

        let mut graph = TypeGraph::new();
        graph.add_declaration(proto);
        run_global_passes(&mut graph);

        let edges = edges_of(&graph);
        assert!(edges.contains(&edge(
            "Renderer",
            "Canvas",
            RelationshipKind::RequiresMethod,
            Some("draw")
        )));
        assert!(edges.contains(&edge(
            "Renderer",
            "Viewport",
            RelationshipKind::RequiresProperty,
            Some("viewport"),
        )));
        assert!(!edges.iter().any(|r| r.to == "Int"));
    }

    #[test]
    fn test_global_passes_are_idempotent() {
        let mut proto = Declaration::new("Cache", DeclKind::Protocol);
        proto.associated_types.push(AssociatedTypeSpec {
            name: "Key".to_string(),
            constraint: Some("Hashable".to_string()),
            default_type: None,
        });
        let mut store = Declaration::new("DiskCache", DeclKind::Class);
        store.conformed_protocols.push("Cache".to_string());
        store
            .properties
            .push(PropertySpec::new("entries", "[Entry]", true));

        let mut graph = TypeGraph::new();
        graph.add_declaration(proto);
        graph.add_declaration(store);
        run_global_passes(&mut graph);
        let first: HashSet<Relationship> = edges_of(&graph);

        run_global_passes(&mut graph);
        let second: HashSet<Relationship> = edges_of(&graph);
        assert_eq!(first, second);
        assert_eq!(
            graph.all_relationships().len(),
            first.len(),
            "re-running passes must not duplicate edges"
        );
    }
}
