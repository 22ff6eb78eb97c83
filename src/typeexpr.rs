//
//  typeexpr.rs
//  Trellis
//
//  Created by hak (tharun)
//

//! Type-string decomposition.
//!
//! Turns a raw type expression (`Foo?`, `[Foo]`, `Dictionary<K, V>`,
//! `(A, B) -> C`) into a normalized shape. Never fails — anything the
//! routines cannot make sense of degrades to the `Any` fallback base.

/// Fallback base for empty or unparseable expressions.
pub const FALLBACK_BASE: &str = "Any";

/// Builtin names excluded from relationship edges: numeric, text, boolean,
/// date/identifier value types, and collection-literal container names.
const PRIMITIVE_TYPES: &[&str] = &[
    "Int", "Int8", "Int16", "Int32", "Int64", "UInt", "UInt8", "UInt16", "UInt32", "UInt64",
    "Float", "Double", "CGFloat", "Decimal", "NSNumber", "String", "Character", "Substring",
    "NSString", "Bool", "Date", "TimeInterval", "DateComponents", "UUID", "URL", "Data",
    "IndexPath", "Array", "Dictionary", "Set", "Optional", "Result", "Void", "Any", "AnyObject",
    "AnyHashable", "Never", "Self",
];

/// Attribute names that wrap a property's storage rather than describing it.
const WRAPPER_ATTRIBUTES: &[&str] = &[
    "Published",
    "State",
    "Binding",
    "ObservedObject",
    "StateObject",
    "EnvironmentObject",
    "Environment",
    "AppStorage",
    "SceneStorage",
    "FocusState",
];

/// Normalized shape of one type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedType {
    /// Unqualified base name (`Foo` for `Mod.Foo<Bar>?`).
    pub base: String,
    pub is_optional: bool,
    pub is_array: bool,
    /// The expression is a function type; its parts come from
    /// [`closure_signature`], not from `base`.
    pub is_closure: bool,
    /// Raw generic argument expressions, top-level split.
    pub generic_args: Vec<String>,
}

impl DecomposedType {
    fn fallback() -> Self {
        Self {
            base: FALLBACK_BASE.to_string(),
            is_optional: false,
            is_array: false,
            is_closure: false,
            generic_args: Vec::new(),
        }
    }

    fn named(base: String) -> Self {
        Self {
            base,
            is_optional: false,
            is_array: false,
            is_closure: false,
            generic_args: Vec::new(),
        }
    }
}

/// Decompose a raw type expression into its normalized shape.
pub fn decompose(raw: &str) -> DecomposedType {
    let trimmed = strip_annotations(raw.trim());
    if trimmed.is_empty() {
        return DecomposedType::fallback();
    }

    // Optional sugar strips one level and recurses; deeper optionals OR in.
    if trimmed.len() > 1 && (trimmed.ends_with('?') || trimmed.ends_with('!')) {
        let mut inner = decompose(&trimmed[..trimmed.len() - 1]);
        inner.is_optional = true;
        return inner;
    }

    // A top-level arrow marks a function type. The base name is meaningless;
    // parameter/return analysis goes through `closure_signature`.
    if find_top_level(trimmed, "->").is_some() {
        let mut closure = DecomposedType::fallback();
        closure.is_closure = true;
        return closure;
    }

    // Bracket sugar: `[T]` array, `[K: V]` dictionary.
    if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() > 2 {
        let inner = &trimmed[1..trimmed.len() - 1];
        if let Some(colon) = find_top_level(inner, ":") {
            let key = inner[..colon].trim();
            let value = inner[colon + 1..].trim();
            let mut dict = DecomposedType::named("Dictionary".to_string());
            dict.generic_args = vec![key.to_string(), value.to_string()];
            return dict;
        }
        let mut element = decompose(inner);
        element.is_array = true;
        return element;
    }

    // Parenthesized: `(T)` unwraps, a bare tuple stays opaque.
    if trimmed.starts_with('(') && trimmed.ends_with(')') {
        let inner = &trimmed[1..trimmed.len() - 1];
        let parts = split_top_level(inner);
        if parts.len() == 1 {
            return decompose(&parts[0]);
        }
        return DecomposedType::fallback();
    }

    // Generic application: `Name<Args>`.
    if let Some(open) = trimmed.find('<') {
        if trimmed.ends_with('>') {
            let mut generic = DecomposedType::named(finish_base(&trimmed[..open]));
            generic.generic_args = split_top_level(&trimmed[open + 1..trimmed.len() - 1]);
            return generic;
        }
    }

    DecomposedType::named(finish_base(trimmed))
}

/// Split an argument list on top-level commas only. A depth counter tracks
/// `<`, `(`, `[` openers so commas inside nested generics, tuples, or
/// brackets never split. Shared between generic arguments and closure
/// parameter lists.
pub fn split_top_level(args: &str) -> Vec<String> {
    let bytes = args.as_bytes();
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            // `->` is one token; its `>` must not close a bracket.
            b'-' if bytes.get(i + 1) == Some(&b'>') => {
                i += 2;
                continue;
            }
            b'<' | b'(' | b'[' => depth += 1,
            b'>' | b')' | b']' => depth -= 1,
            b',' if depth == 0 => {
                let piece = args[start..i].trim();
                if !piece.is_empty() {
                    parts.push(piece.to_string());
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    let tail = args[start..].trim();
    if !tail.is_empty() {
        parts.push(tail.to_string());
    }
    parts
}

/// Extract the parameter list and return segment of a function type.
///
/// Returns `None` when the expression has no top-level `->`. An empty,
/// `Void`, or `()` return segment yields `None` for the return slot.
pub fn closure_signature(raw: &str) -> Option<(Vec<String>, Option<String>)> {
    let trimmed = strip_annotations(raw.trim());
    let arrow = find_top_level(trimmed, "->")?;

    let mut params_text = trimmed[..arrow].trim();
    for effect in ["rethrows", "throws", "async"] {
        if let Some(stripped) = params_text.strip_suffix(effect) {
            params_text = stripped.trim_end();
        }
    }
    let params_inner = params_text
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(params_text);
    let params = split_top_level(params_inner);

    let return_text = trimmed[arrow + 2..].trim();
    let ret = match return_text {
        "" | "Void" | "()" => None,
        other => Some(other.to_string()),
    };
    Some((params, ret))
}

/// Whether a base name belongs to the builtin exclusion table.
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// Whether an attribute name is a recognized property wrapper.
pub fn is_wrapper_attribute(attribute: &str) -> bool {
    WRAPPER_ATTRIBUTES.contains(&attribute.trim_start_matches('@'))
}

/// Find the byte offset of `needle` at bracket depth zero, if any.
/// Byte-wise scan: indexing must stay safe on non-ASCII type names.
fn find_top_level(text: &str, needle: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let needle = needle.as_bytes();
    let mut depth: i32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        if depth == 0 && bytes[i..].starts_with(needle) {
            return Some(i);
        }
        match bytes[i] {
            b'-' if bytes.get(i + 1) == Some(&b'>') => {
                i += 2;
                continue;
            }
            b'<' | b'(' | b'[' => depth += 1,
            b'>' | b')' | b']' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Drop leading attributes and ownership/existential keywords that do not
/// affect the referenced type name.
fn strip_annotations(raw: &str) -> &str {
    let mut rest = raw.trim_start();
    loop {
        if rest.starts_with('@') {
            match rest.find(char::is_whitespace) {
                Some(end) => rest = rest[end..].trim_start(),
                None => return "",
            }
            continue;
        }
        let mut stripped = false;
        for keyword in ["inout", "some", "any", "borrowing", "consuming"] {
            if let Some(tail) = rest.strip_prefix(keyword) {
                if tail.starts_with(char::is_whitespace) {
                    rest = tail.trim_start();
                    stripped = true;
                    break;
                }
            }
        }
        if !stripped {
            return rest;
        }
    }
}

/// Reduce to the last dot component and reject leftovers that still carry
/// structure characters — those degrade to the fallback base.
fn finish_base(text: &str) -> String {
    let name = text.trim().rsplit('.').next().unwrap_or("").trim();
    if name.is_empty() || name.contains(|c: char| "<>[](),:-".contains(c) || c.is_whitespace()) {
        return FALLBACK_BASE.to_string();
    }
    name.to_string()
}
