//! Error types for stylesheet processing.

use std::path::PathBuf;

use globvars::ResolveError;
use thiserror::Error;

/// Errors raised while processing a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    /// A value in the stylesheet references a variable that cannot be substituted.
    #[error("{plugin}: {}{line}:{column}: {source}", file_prefix(.file))]
    Variable {
        /// Identifier of the plugin that raised the error.
        plugin: &'static str,
        /// Stylesheet path, when known.
        file: Option<PathBuf>,
        /// 1-based line of the offending value.
        line: u32,
        /// 1-based column of the offending value.
        column: u32,
        source: ResolveError,
    },
}

impl CssError {
    /// The underlying resolution error.
    pub fn resolve_error(&self) -> &ResolveError {
        match self {
            CssError::Variable { source, .. } => source,
        }
    }
}

fn file_prefix(file: &Option<PathBuf>) -> String {
    file.as_ref()
        .map(|p| format!("{}:", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undefined() -> ResolveError {
        ResolveError::Undefined {
            path: "color".to_string(),
        }
    }

    #[test]
    fn display_without_file() {
        let err = CssError::Variable {
            plugin: "global-vars",
            file: None,
            line: 1,
            column: 11,
            source: undefined(),
        };
        assert_eq!(
            err.to_string(),
            "global-vars: 1:11: Property \"color\" is not defined."
        );
    }

    #[test]
    fn display_with_file() {
        let err = CssError::Variable {
            plugin: "global-vars",
            file: Some(PathBuf::from("app.css")),
            line: 3,
            column: 5,
            source: undefined(),
        };
        assert_eq!(
            err.to_string(),
            "global-vars: app.css:3:5: Property \"color\" is not defined."
        );
        assert_eq!(err.resolve_error(), &undefined());
    }
}
