//
//  decl.rs
//  Trellis
//
//  Created by hak (tharun)
//

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Class,
    Struct,
    Protocol,
    Enum,
    Actor,
    Extension,
}

impl DeclKind {
    /// Concrete nominal types that can take an extension merge and satisfy
    /// protocol conformances.
    pub fn is_concrete(&self) -> bool {
        matches!(self, DeclKind::Class | DeclKind::Struct | DeclKind::Actor)
    }
}

/// Source-level access control, most permissive first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Open,
    Public,
    Internal,
    FilePrivate,
    Private,
}

impl Default for AccessLevel {
    fn default() -> Self {
        AccessLevel::Internal
    }
}

/// Where a declaration came from.
///
/// Phantom nodes carry the `<external>` sentinel — they were referenced by
/// some edge but never handed over by a producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    #[serde(default)]
    pub line: u32,
}

impl SourceLocation {
    pub const EXTERNAL: &'static str = "<external>";

    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The sentinel location used for synthesized (phantom) nodes.
    pub fn external() -> Self {
        Self {
            file: Self::EXTERNAL.to_string(),
            line: 0,
        }
    }

    pub fn is_external(&self) -> bool {
        self.file == Self::EXTERNAL
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::external()
    }
}

/// A stored property of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    /// Raw type expression as written in source (e.g. `[String: Handler]?`).
    pub type_expr: String,
    /// `var` vs `let`.
    #[serde(default)]
    pub is_mutable: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_lazy: bool,
    #[serde(default)]
    pub is_weak: bool,
    #[serde(default)]
    pub is_unowned: bool,
    /// Attribute names attached to the property (wrapper detection).
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub default_value: Option<String>,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, type_expr: impl Into<String>, is_mutable: bool) -> Self {
        Self {
            name: name.into(),
            type_expr: type_expr.into(),
            is_mutable,
            is_static: false,
            is_lazy: false,
            is_weak: false,
            is_unowned: false,
            attributes: Vec::new(),
            default_value: None,
        }
    }
}

/// One parameter of a method, initializer, or subscript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    #[serde(default)]
    pub label: Option<String>,
    pub name: String,
    pub type_expr: String,
    #[serde(default)]
    pub default_value: Option<String>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        Self {
            label: None,
            name: name.into(),
            type_expr: type_expr.into(),
            default_value: None,
        }
    }
}

/// A method. Initializers reuse this shape with name `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub is_async: bool,
    #[serde(default)]
    pub is_throwing: bool,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: None,
            is_async: false,
            is_throwing: false,
        }
    }
}

/// A subscript declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptSpec {
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    pub return_type: String,
}

/// A `typealias` member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasSpec {
    pub name: String,
    pub target: String,
}

/// An associated type requirement on a protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedTypeSpec {
    pub name: String,
    /// Inherited-type constraint, e.g. `Element: Hashable`.
    #[serde(default)]
    pub constraint: Option<String>,
    /// Default concrete type, if the protocol supplies one.
    #[serde(default)]
    pub default_type: Option<String>,
}

/// What a protocol requirement requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementKind {
    Method,
    Property,
}

/// A protocol requirement and the type names it mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSpec {
    pub name: String,
    pub kind: RequirementKind,
    /// Raw type expressions referenced by the requirement signature.
    #[serde(default)]
    pub type_refs: Vec<String>,
}

/// A generic parameter, optionally constrained (`T: Comparable`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParamSpec {
    pub name: String,
    #[serde(default)]
    pub constraint: Option<String>,
}

/// One ingested type or extension record — the unit handed over by a
/// declaration producer.
///
/// Identity is the unqualified `name`; `module` is carried as data only and
/// does not participate in node identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
    #[serde(default)]
    pub access: AccessLevel,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub inherited_types: Vec<String>,
    #[serde(default)]
    pub conformed_protocols: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
    #[serde(default)]
    pub initializers: Vec<MethodSpec>,
    #[serde(default)]
    pub subscripts: Vec<SubscriptSpec>,
    #[serde(default)]
    pub type_aliases: Vec<TypeAliasSpec>,
    #[serde(default)]
    pub nested: Vec<Declaration>,
    #[serde(default)]
    pub associated_types: Vec<AssociatedTypeSpec>,
    #[serde(default)]
    pub requirements: Vec<RequirementSpec>,
    #[serde(default)]
    pub generics: Vec<GenericParamSpec>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub location: SourceLocation,
    /// True only for nodes synthesized as edge endpoints.
    #[serde(default)]
    pub is_phantom: bool,
}

impl Declaration {
    /// A bare declaration with empty member lists and internal access.
    pub fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            access: AccessLevel::default(),
            module: None,
            inherited_types: Vec::new(),
            conformed_protocols: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            initializers: Vec::new(),
            subscripts: Vec::new(),
            type_aliases: Vec::new(),
            nested: Vec::new(),
            associated_types: Vec::new(),
            requirements: Vec::new(),
            generics: Vec::new(),
            attributes: Vec::new(),
            location: SourceLocation::external(),
            is_phantom: false,
        }
    }

    /// A synthesized node for an externally-referenced name: most permissive
    /// access, sentinel location, phantom flag set.
    pub fn phantom(name: impl Into<String>, kind: DeclKind, module: Option<&str>) -> Self {
        let mut decl = Self::new(name, kind);
        decl.access = AccessLevel::Open;
        decl.module = module.map(str::to_string);
        decl.location = SourceLocation::external();
        decl.is_phantom = true;
        decl
    }
}

/// Parse a JSON array of declarations — the concrete wire shape for
/// producers written in other languages.
pub fn declarations_from_json(input: &str) -> Result<Vec<Declaration>> {
    Ok(serde_json::from_str(input)?)
}
