//! Options and variable data loading.
//!
//! Options can be built in code or read from YAML or JSON:
//!
//! ```yaml
//! prefix: "--const-"
//! data:
//!   colors:
//!     primary: red
//! ```
//!
//! A *data file* is just the tree, without the `prefix`/`data` wrapper; see
//! [`Options::from_data_file`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::node::Table;
use crate::pattern::DEFAULT_PREFIX;

/// Recognized configuration file extensions.
pub const CONFIG_EXTENSIONS: &[&str] = &[".yaml", ".yml", ".json"];

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    fn parse<T: for<'de> Deserialize<'de>>(self, content: &str) -> Result<T, ConfigError> {
        match self {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml { path: None, source })
            }
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|source| ConfigError::Json { path: None, source })
            }
        }
    }
}

/// Configuration of a [`GlobalVars`](crate::GlobalVars) instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Reference prefix. `None` or an empty string means [`DEFAULT_PREFIX`].
    pub prefix: Option<String>,
    /// Variable tree. Empty by default, which makes every reference undefined.
    pub data: Table,
}

impl Options {
    /// Options with the given data and the default prefix.
    pub fn new(data: Table) -> Self {
        Self { prefix: None, data }
    }

    /// Sets the reference prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// The effective prefix.
    pub fn prefix(&self) -> &str {
        self.prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(DEFAULT_PREFIX)
    }

    /// Parses options from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        ConfigFormat::Yaml.parse(yaml)
    }

    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        ConfigFormat::Json.parse(json)
    }

    /// Reads options from a `.yaml`, `.yml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_file(path.as_ref())
    }

    /// Reads a bare variable tree from a file and wraps it with the default prefix.
    pub fn from_data_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_file(path.as_ref()).map(Self::new)
    }
}

fn read_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ConfigError> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedExtension {
        path: path.to_path_buf(),
    })?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // An empty YAML document means "no variables".
    if format == ConfigFormat::Yaml && content.trim().is_empty() {
        return format.parse("{}");
    }
    format.parse(&content).map_err(|e| e.with_path(path))
}
