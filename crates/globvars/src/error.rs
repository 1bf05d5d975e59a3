//! Error types for the globvars crate.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while resolving a variable reference.
///
/// The display strings of [`Undefined`](ResolveError::Undefined) and
/// [`InappropriateType`](ResolveError::InappropriateType) are part of the public
/// contract: hosts surface them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A path segment does not exist. `path` runs up to and including the
    /// missing segment.
    #[error("Property \"{path}\" is not defined.")]
    Undefined { path: String },

    /// The full path resolves to something other than a string or number.
    #[error("The \"{path}\" property has an inappropriate type.")]
    InappropriateType { path: String },

    /// Variables reference each other in a loop. The chain ends with the
    /// variable that closed the loop.
    #[error("Circular reference detected: {}", .chain.join(" -> "))]
    CircularReference { chain: Vec<String> },
}

impl ResolveError {
    /// The dotted path the error is about.
    ///
    /// For circular references this is the variable that closed the loop.
    pub fn path(&self) -> &str {
        match self {
            ResolveError::Undefined { path } | ResolveError::InappropriateType { path } => path,
            ResolveError::CircularReference { chain } => {
                chain.last().map(String::as_str).unwrap_or_default()
            }
        }
    }
}

/// Errors raised while setting up a [`GlobalVars`](crate::GlobalVars) instance.
#[derive(Debug, Error)]
pub enum GlobalVarsError {
    /// The prefix could not be compiled into a matcher.
    #[error("invalid variable prefix: {0}")]
    InvalidPrefix(#[from] regex::Error),

    /// The variable data contains a reference that cannot be resolved.
    #[error("invalid variable data: {0}")]
    Resolve(#[from] ResolveError),
}

/// Errors raised while loading options or variable data.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error.
    #[error("failed to parse YAML variables{}: {source}", location(.path))]
    Yaml {
        path: Option<PathBuf>,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON parse error.
    #[error("failed to parse JSON variables{}: {source}", location(.path))]
    Json {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    /// The file extension is not one of the recognized configuration formats.
    #[error("unsupported variables file {} (expected one of: {})", .path.display(), crate::config::CONFIG_EXTENSIONS.join(", "))]
    UnsupportedExtension { path: PathBuf },
}

impl ConfigError {
    pub(crate) fn with_path(self, file: &Path) -> Self {
        match self {
            ConfigError::Yaml { source, .. } => ConfigError::Yaml {
                path: Some(file.to_path_buf()),
                source,
            },
            ConfigError::Json { source, .. } => ConfigError::Json {
                path: Some(file.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Result type for globvars operations.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
