//! Rewriting whole stylesheets.

use std::path::{Path, PathBuf};

use globvars::GlobalVars;
use tracing::debug;

use crate::error::CssError;
use crate::walker::collect_spans;

/// Identifier attached to every error raised while processing a stylesheet.
pub const PLUGIN_NAME: &str = "global-vars";

/// Rewrites every declaration value and at-rule prelude in `css`.
///
/// Comments and everything else are copied through byte for byte. Processing
/// stops at the first value that fails to rewrite.
///
/// # Example
///
/// ```
/// use globvars::{GlobalVars, Options};
/// use globvars_css::process_css;
///
/// let vars = GlobalVars::new(Options::from_yaml("data: { color: red }").unwrap()).unwrap();
/// assert_eq!(
///     process_css("a {color: $global.color}", &vars).unwrap(),
///     "a {color: red}",
/// );
/// ```
pub fn process_css(css: &str, vars: &GlobalVars) -> Result<String, CssError> {
    rewrite_stylesheet(css, vars, None)
}

/// A [`GlobalVars`] instance bound to an optional source file name for error reporting.
#[derive(Debug, Clone)]
pub struct Processor {
    vars: GlobalVars,
    file: Option<PathBuf>,
}

impl Processor {
    /// Creates a processor for anonymous input.
    pub fn new(vars: GlobalVars) -> Self {
        Self { vars, file: None }
    }

    /// Names the stylesheet in error messages.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// The variables used for rewriting.
    pub fn vars(&self) -> &GlobalVars {
        &self.vars
    }

    /// Rewrites a stylesheet.
    pub fn process(&self, css: &str) -> Result<String, CssError> {
        rewrite_stylesheet(css, &self.vars, self.file.as_deref())
    }
}

fn rewrite_stylesheet(
    css: &str,
    vars: &GlobalVars,
    file: Option<&Path>,
) -> Result<String, CssError> {
    let spans = collect_spans(css);
    let mut output = String::with_capacity(css.len());
    let mut last = 0;
    let mut rewritten = 0;

    for span in spans {
        for range in span.code_ranges() {
            let value = &css[range.clone()];
            if !vars.has_references(value) {
                continue;
            }

            let replacement = vars.rewrite(value).map_err(|source| CssError::Variable {
                plugin: PLUGIN_NAME,
                file: file.map(Path::to_path_buf),
                line: span.line,
                column: span.column,
                source,
            })?;

            output.push_str(&css[last..range.start]);
            output.push_str(&replacement);
            last = range.end;
            rewritten += 1;
        }
    }

    output.push_str(&css[last..]);
    debug!(values = rewritten, "rewrote stylesheet");
    Ok(output)
}
