//
//  classify.rs
//  Trellis
//
//  Created by hak (tharun)
//

//! Name-based classification of external types.
//!
//! This module isolates the engine's only guessy logic behind a static,
//! data-driven rule table, so it can be swapped for a precise symbol table
//! without touching the graph algorithms. Rules are checked in order; the
//! first match wins.

use crate::decl::DeclKind;

/// Best-guess kind for an unresolved name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresumedKind {
    Class,
    Struct,
    Protocol,
}

impl From<PresumedKind> for DeclKind {
    fn from(kind: PresumedKind) -> Self {
        match kind {
            PresumedKind::Class => DeclKind::Class,
            PresumedKind::Struct => DeclKind::Struct,
            PresumedKind::Protocol => DeclKind::Protocol,
        }
    }
}

/// Classification result: presumed kind plus the presumed owning module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: PresumedKind,
    pub module: Option<&'static str>,
}

enum Matcher {
    Exact(&'static str),
    Prefix(&'static str),
    Suffix(&'static str),
}

struct Rule {
    matcher: Matcher,
    kind: PresumedKind,
    module: Option<&'static str>,
}

const fn exact(name: &'static str, kind: PresumedKind, module: Option<&'static str>) -> Rule {
    Rule {
        matcher: Matcher::Exact(name),
        kind,
        module,
    }
}

const fn prefix(text: &'static str, kind: PresumedKind, module: Option<&'static str>) -> Rule {
    Rule {
        matcher: Matcher::Prefix(text),
        kind,
        module,
    }
}

const fn suffix(text: &'static str, kind: PresumedKind) -> Rule {
    Rule {
        matcher: Matcher::Suffix(text),
        kind,
        module: None,
    }
}

/// Prioritized classification rules. Exact names first, then the
/// protocol-ish suffixes, then framework prefixes.
const RULES: &[Rule] = &[
    exact("NSObject", PresumedKind::Class, Some("Foundation")),
    exact("Codable", PresumedKind::Protocol, Some("Swift")),
    exact("Decodable", PresumedKind::Protocol, Some("Swift")),
    exact("Encodable", PresumedKind::Protocol, Some("Swift")),
    exact("Equatable", PresumedKind::Protocol, Some("Swift")),
    exact("Hashable", PresumedKind::Protocol, Some("Swift")),
    exact("Comparable", PresumedKind::Protocol, Some("Swift")),
    exact("Identifiable", PresumedKind::Protocol, Some("Swift")),
    exact("Sendable", PresumedKind::Protocol, Some("Swift")),
    exact("Error", PresumedKind::Protocol, Some("Swift")),
    exact("Sequence", PresumedKind::Protocol, Some("Swift")),
    exact("Collection", PresumedKind::Protocol, Some("Swift")),
    exact("CustomStringConvertible", PresumedKind::Protocol, Some("Swift")),
    exact("ObservableObject", PresumedKind::Protocol, Some("Combine")),
    exact("View", PresumedKind::Protocol, Some("SwiftUI")),
    suffix("Protocol", PresumedKind::Protocol),
    suffix("Delegate", PresumedKind::Protocol),
    suffix("DataSource", PresumedKind::Protocol),
    suffix("Representable", PresumedKind::Protocol),
    suffix("able", PresumedKind::Protocol),
    suffix("ible", PresumedKind::Protocol),
    prefix("UI", PresumedKind::Class, Some("UIKit")),
    prefix("NS", PresumedKind::Class, Some("Foundation")),
    prefix("CA", PresumedKind::Class, Some("QuartzCore")),
    prefix("SK", PresumedKind::Class, Some("SpriteKit")),
    prefix("MK", PresumedKind::Class, Some("MapKit")),
    prefix("AV", PresumedKind::Class, Some("AVFoundation")),
    prefix("CL", PresumedKind::Class, Some("CoreLocation")),
    prefix("WK", PresumedKind::Class, Some("WebKit")),
    prefix("CG", PresumedKind::Struct, Some("CoreGraphics")),
];

/// Immediate-to-root ancestor chains for well-known external class families.
/// Consulted only when a phantom classifies as a class; unknown names get no
/// synthesized ancestry.
const BASE_CHAINS: &[(&str, &[&str])] = &[
    ("UIResponder", &["NSObject"]),
    ("UIView", &["UIResponder", "NSObject"]),
    ("UIViewController", &["UIResponder", "NSObject"]),
    ("UIControl", &["UIView", "UIResponder", "NSObject"]),
    ("UIButton", &["UIControl", "UIView", "UIResponder", "NSObject"]),
    ("UISwitch", &["UIControl", "UIView", "UIResponder", "NSObject"]),
    ("UITextField", &["UIControl", "UIView", "UIResponder", "NSObject"]),
    ("UILabel", &["UIView", "UIResponder", "NSObject"]),
    ("UIImageView", &["UIView", "UIResponder", "NSObject"]),
    ("UIStackView", &["UIView", "UIResponder", "NSObject"]),
    ("UIScrollView", &["UIView", "UIResponder", "NSObject"]),
    ("UITableView", &["UIScrollView", "UIView", "UIResponder", "NSObject"]),
    ("UICollectionView", &["UIScrollView", "UIView", "UIResponder", "NSObject"]),
    ("UITableViewCell", &["UIView", "UIResponder", "NSObject"]),
    ("UICollectionViewCell", &["UIView", "UIResponder", "NSObject"]),
    ("UIWindow", &["UIView", "UIResponder", "NSObject"]),
    ("UIApplication", &["UIResponder", "NSObject"]),
    ("NSManagedObject", &["NSObject"]),
    ("CALayer", &["NSObject"]),
    ("SKNode", &["UIResponder", "NSObject"]),
    ("SKScene", &["SKNode", "UIResponder", "NSObject"]),
];

/// Classify an unresolved name into a presumed kind and owning module.
pub fn classify_external(name: &str) -> Classification {
    for rule in RULES {
        let matched = match rule.matcher {
            Matcher::Exact(text) => name == text,
            // A framework prefix only counts when followed by another
            // uppercase letter (UIView, not Unit).
            Matcher::Prefix(text) => {
                name.len() > text.len()
                    && name.starts_with(text)
                    && name[text.len()..].starts_with(|c: char| c.is_ascii_uppercase())
            }
            Matcher::Suffix(text) => name.len() > text.len() && name.ends_with(text),
        };
        if matched {
            return Classification {
                kind: rule.kind,
                module: rule.module,
            };
        }
    }

    let kind = if name.starts_with(|c: char| c.is_uppercase()) {
        PresumedKind::Class
    } else {
        PresumedKind::Struct
    };
    Classification { kind, module: None }
}

/// Ordered immediate-to-root ancestor names for a well-known external class.
pub fn known_base_chain(name: &str) -> &'static [&'static str] {
    BASE_CHAINS
        .iter()
        .find(|(family, _)| *family == name)
        .map(|(_, chain)| *chain)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_rules() {
        assert_eq!(classify_external("NSObject").kind, PresumedKind::Class);
        assert_eq!(classify_external("NSObject").module, Some("Foundation"));
        assert_eq!(classify_external("Codable").kind, PresumedKind::Protocol);
        assert_eq!(classify_external("View").kind, PresumedKind::Protocol);
    }

    #[test]
    fn test_prefix_rules() {
        let c = classify_external("UITableView");
        assert_eq!(c.kind, PresumedKind::Class);
        assert_eq!(c.module, Some("UIKit"));
        assert_eq!(classify_external("CGRect").kind, PresumedKind::Struct);
        // Prefix requires a following uppercase letter.
        assert_eq!(classify_external("Unit").module, None);
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(
            classify_external("ScrollViewDelegate").kind,
            PresumedKind::Protocol
        );
        assert_eq!(
            classify_external("FeedDataSource").kind,
            PresumedKind::Protocol
        );
        assert_eq!(classify_external("Cacheable").kind, PresumedKind::Protocol);
        assert_eq!(
            classify_external("Convertible").kind,
            PresumedKind::Protocol
        );
    }

    #[test]
    fn test_fallback() {
        assert_eq!(classify_external("Widget").kind, PresumedKind::Class);
        assert_eq!(classify_external("widget").kind, PresumedKind::Struct);
    }

    #[test]
    fn test_base_chains() {
        assert_eq!(known_base_chain("UIView"), ["UIResponder", "NSObject"]);
        assert_eq!(
            known_base_chain("UIButton"),
            ["UIControl", "UIView", "UIResponder", "NSObject"]
        );
        assert!(known_base_chain("Widget").is_empty());
    }
}
