//! Engine error types.
//!
//! Problems with user declarations are never errors: they are reported as
//! [`Diagnostic`](crate::Diagnostic)s and the pass continues. The types here
//! cover the few things that can fail around a pass.

use std::path::PathBuf;

/// Building a [`RuleRegistry`](crate::RuleRegistry) failed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a rule named '{name}' is already registered")]
    DuplicateRule { name: &'static str },
}

/// Loading an [`EngineConfig`](crate::EngineConfig) failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

/// A generation pass did not complete.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("generation pass was cancelled")]
    Cancelled,
}
