//! The per-configuration entry point.

use tracing::debug;

use crate::config::Options;
use crate::error::{GlobalVarsError, ResolveError};
use crate::node::Table;
use crate::pattern::VariablePattern;
use crate::rewrite::rewrite;
use crate::store::ResolvedStore;

/// A compiled pattern and the resolved store built for it.
///
/// Build one per configuration and reuse it for every value of a document.
/// Rewriting only reads the store, so a `GlobalVars` can be shared across
/// threads.
///
/// # Example
///
/// ```
/// use globvars::{GlobalVars, Options, Table};
///
/// let mut data = Table::new();
/// data.insert("color".into(), "red".into());
///
/// let vars = GlobalVars::new(Options::new(data)).unwrap();
/// assert_eq!(vars.rewrite("1px solid $global.color").unwrap(), "1px solid red");
/// ```
#[derive(Debug, Clone)]
pub struct GlobalVars {
    pattern: VariablePattern,
    store: ResolvedStore,
}

impl GlobalVars {
    /// Compiles the prefix and resolves the variable data.
    ///
    /// # Errors
    ///
    /// Fails if the data contains a reference that is undefined, names a table,
    /// or is part of a cycle.
    pub fn new(options: Options) -> Result<Self, GlobalVarsError> {
        Self::from_parts(options.prefix(), &options.data)
    }

    /// Shorthand for [`GlobalVars::new`] with the default prefix.
    pub fn with_data(data: Table) -> Result<Self, GlobalVarsError> {
        Self::new(Options::new(data))
    }

    fn from_parts(prefix: &str, data: &Table) -> Result<Self, GlobalVarsError> {
        let pattern = VariablePattern::new(prefix)?;
        let store = ResolvedStore::build(data, &pattern)?;
        debug!(prefix, variables = data.len(), "global variables ready");
        Ok(Self { pattern, store })
    }

    /// Rewrites one text value, substituting every reference.
    pub fn rewrite(&self, value: &str) -> Result<String, ResolveError> {
        rewrite(value, &self.store, &self.pattern)
    }

    /// Returns `true` if `value` contains a reference.
    pub fn has_references(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }

    /// The reference prefix.
    pub fn prefix(&self) -> &str {
        self.pattern.prefix()
    }

    /// The compiled reference pattern.
    pub fn pattern(&self) -> &VariablePattern {
        &self.pattern
    }

    /// The resolved variable store.
    pub fn store(&self) -> &ResolvedStore {
        &self.store
    }
}
