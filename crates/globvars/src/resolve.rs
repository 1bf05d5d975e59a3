//! Nested path lookup.

use crate::error::ResolveError;
use crate::node::{Table, VarNode};

pub(crate) const PATH_SEPARATOR: char = '.';

/// Resolves a dotted path to the text of the leaf it names.
///
/// Each segment must name a key of the table reached so far. The final value
/// must be a string or a number; numbers are converted with plain decimal
/// formatting.
///
/// # Errors
///
/// - [`ResolveError::Undefined`] with the path up to the first missing segment.
/// - [`ResolveError::InappropriateType`] with the full path when it ends on a table.
///
/// # Example
///
/// ```
/// use globvars::{resolve_path, ResolveError, Table, VarNode};
///
/// let mut data = Table::new();
/// data.insert("colors".into(), [("primary", "red")].into_iter().collect::<VarNode>());
///
/// assert_eq!(resolve_path(&data, "colors.primary").unwrap(), "red");
/// assert_eq!(
///     resolve_path(&data, "colors.secondary"),
///     Err(ResolveError::Undefined { path: "colors.secondary".into() }),
/// );
/// ```
pub fn resolve_path(root: &Table, path: &str) -> Result<String, ResolveError> {
    lookup(root, path)?
        .leaf_text()
        .map(|text| text.into_owned())
        .ok_or_else(|| ResolveError::InappropriateType {
            path: path.to_string(),
        })
}

/// Walks `path` through `root` and returns whatever node it ends on.
pub(crate) fn lookup<'a>(root: &'a Table, path: &str) -> Result<&'a VarNode, ResolveError> {
    let mut table = Some(root);
    let mut node = None;

    for (depth, segment) in path.split(PATH_SEPARATOR).enumerate() {
        let next = table
            .and_then(|t| t.get(segment))
            .ok_or_else(|| ResolveError::Undefined {
                path: leading_segments(path, depth + 1),
            })?;
        table = next.as_branch();
        node = Some(next);
    }

    // `split` always yields at least one segment.
    node.ok_or_else(|| ResolveError::Undefined {
        path: path.to_string(),
    })
}

fn leading_segments(path: &str, count: usize) -> String {
    path.split(PATH_SEPARATOR)
        .take(count)
        .collect::<Vec<_>>()
        .join(".")
}
