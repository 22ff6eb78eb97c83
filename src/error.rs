//
//  error.rs
//  Trellis
//
//  Created by hak (tharun)
//

use thiserror::Error;

/// Errors surfaced at the crate boundary.
///
/// The graph engine itself is fail-soft: malformed type expressions degrade
/// to a fallback type and unknown names are classified heuristically, so the
/// only hard errors live at the ingestion/configuration edges.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// The declaration stream handed over by a producer was not valid JSON
    /// for the expected `Declaration` shape.
    #[error("invalid declaration input: {0}")]
    InvalidDeclarations(#[from] serde_json::Error),

    /// A configuration document failed to parse.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TrellisError>;
