//! Error taxonomy.
//!
//! All configuration and load validation happens eagerly at construction, so
//! a broken pattern or rule set fails before any phrase is processed. A
//! template that matches nothing and a rule that derives nothing are normal
//! outcomes, not errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::PendLink;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type; each variant wraps a subsystem error transparently.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Saturation(#[from] SaturationError),
}

/// Raised while compiling a pattern template or constructing a rule.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("pattern template is empty")]
    EmptyTemplate,

    #[error("malformed slot token '{token}'")]
    MalformedSlot { token: String },

    #[error("unknown grammar class '{code}' in slot '{token}'")]
    UnknownClass { code: String, token: String },

    #[error("slot id '{id}' appears more than once in template")]
    DuplicateSlot { id: String },

    #[error("class '{code}' is repeated without consistent numbering")]
    AmbiguousNumbering { code: String },

    #[error("slot '{token}' has an empty literal alternative")]
    EmptyAlternative { token: String },

    #[error("{field} '{id}' does not name a slot in the template")]
    UnknownRole { field: &'static str, id: String },

    #[error("unknown link type '{name}'")]
    UnknownLinkType { name: String },

    #[error("rule '{rule}': output variable '{variable}' is not bound by any condition")]
    UnboundVariable { rule: String, variable: String },
}

/// Raised while loading a pattern configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read pattern file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pattern file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("pattern file {path}, record {index}: {source}")]
    Record {
        path: PathBuf,
        index: usize,
        #[source]
        source: ConfigurationError,
    },
}

/// Raised by the reasoner when the defensive round cap is exceeded.
///
/// Carries the partial fact set so a misconfigured rule set can be diagnosed
/// from what it actually derived.
#[derive(Debug, Error)]
pub enum SaturationError {
    #[error("saturation did not converge within {rounds} rounds ({} facts so far)", .facts.len())]
    NotConverged { rounds: usize, facts: Vec<PendLink> },
}
