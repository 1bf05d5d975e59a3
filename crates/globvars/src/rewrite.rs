//! Text rewriting.

use tracing::trace;

use crate::error::ResolveError;
use crate::pattern::VariablePattern;
use crate::resolve::resolve_path;
use crate::store::ResolvedStore;

/// Replaces every reference in `text` with the value it names in `store`.
///
/// Matches are taken from the original text only; substituted values are never
/// rescanned. The first reference that fails to resolve aborts the rewrite.
///
/// # Example
///
/// ```
/// use globvars::{rewrite, ResolvedStore, Table, VariablePattern};
///
/// let pattern = VariablePattern::new("$global.").unwrap();
/// let mut data = Table::new();
/// data.insert("gap".into(), 8.into());
/// let store = ResolvedStore::build(&data, &pattern).unwrap();
///
/// assert_eq!(
///     rewrite("calc($global.gap * 2px)", &store, &pattern).unwrap(),
///     "calc(8 * 2px)",
/// );
/// ```
pub fn rewrite(
    text: &str,
    store: &ResolvedStore,
    pattern: &VariablePattern,
) -> Result<String, ResolveError> {
    rewrite_with(text, pattern, |path| resolve_path(store.table(), path))
}

/// Splices `resolve(path)` over each reference in `text`.
fn rewrite_with<'t, F>(
    text: &'t str,
    pattern: &VariablePattern,
    mut resolve: F,
) -> Result<String, ResolveError>
where
    F: FnMut(&'t str) -> Result<String, ResolveError>,
{
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for reference in pattern.references(text) {
        trace!(path = reference.path(), "substituting reference");
        output.push_str(&text[last..reference.start()]);
        output.push_str(&resolve(reference.path())?);
        last = reference.end();
    }

    output.push_str(&text[last..]);
    Ok(output)
}
