//! Reference matching.
//!
//! A [`VariablePattern`] finds every `<prefix><dotted.path>` in a piece of text.
//! The prefix is matched literally; the path is the longest run of ASCII word
//! characters, dots and hyphens that follows it.

use std::ops::Range;

use regex::{CaptureMatches, Regex};

use crate::error::GlobalVarsError;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "$global.";

/// Capture rule for the dotted path after the prefix.
const PATH_PATTERN: &str = r"([A-Za-z0-9_.\-]+)";

/// Compiled matcher for variable references.
///
/// # Example
///
/// ```
/// use globvars::VariablePattern;
///
/// let pattern = VariablePattern::new("$global.").unwrap();
/// let paths: Vec<_> = pattern
///     .references("$global.padding.vertical $global.padding.horizontal")
///     .map(|r| r.path())
///     .collect();
/// assert_eq!(paths, ["padding.vertical", "padding.horizontal"]);
/// ```
#[derive(Debug, Clone)]
pub struct VariablePattern {
    prefix: String,
    regex: Regex,
}

impl VariablePattern {
    /// Compiles a matcher for the given prefix.
    ///
    /// Any string is accepted; metacharacters in the prefix match literally.
    /// Only a prefix large enough to exceed the regex size limit fails.
    pub fn new(prefix: &str) -> Result<Self, GlobalVarsError> {
        let regex = Regex::new(&format!("{}{}", regex::escape(prefix), PATH_PATTERN))?;
        Ok(Self {
            prefix: prefix.to_string(),
            regex,
        })
    }

    /// The prefix this pattern was compiled from.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `true` if `text` contains at least one reference.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Iterates over all non-overlapping references in `text`, left to right.
    pub fn references<'r, 't>(&'r self, text: &'t str) -> References<'r, 't> {
        References {
            inner: self.regex.captures_iter(text),
        }
    }
}

/// One reference found in a text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'t> {
    matched: &'t str,
    path: &'t str,
    range: Range<usize>,
}

impl<'t> Reference<'t> {
    /// The full matched text, prefix included.
    pub fn as_str(&self) -> &'t str {
        self.matched
    }

    /// The dotted path after the prefix.
    pub fn path(&self) -> &'t str {
        self.path
    }

    /// Byte offset of the match start.
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Byte offset just past the match.
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Byte range of the match in the scanned text.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

/// Iterator returned by [`VariablePattern::references`].
#[derive(Debug)]
pub struct References<'r, 't> {
    inner: CaptureMatches<'r, 't>,
}

impl<'r, 't> Iterator for References<'r, 't> {
    type Item = Reference<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let captures = self.inner.next()?;
        let (whole, path) = (captures.get(0)?, captures.get(1)?);
        Some(Reference {
            matched: whole.as_str(),
            path: path.as_str(),
            range: whole.range(),
        })
    }
}
