//! Resolved variable store.
//!
//! Variables may reference other variables with the same syntax used in
//! stylesheets:
//!
//! ```yaml
//! colors:
//!   main: red
//!   lighter: color($global.colors.main l(+30%))
//! ```
//!
//! [`ResolvedStore::build`] substitutes those references once, so rewriting a
//! stylesheet value afterwards is a direct lookup.
//!
//! # Resolution order
//!
//! A referenced string is resolved before it is spliced in, depth first, so a
//! variable may reference one that is declared later. Each string leaf is
//! resolved once and memoized. A reference chain that comes back to a leaf that
//! is still being resolved fails with [`ResolveError::CircularReference`].
//! Chains of any length are resolved without recursion.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::node::{Table, VarNode};
use crate::pattern::{Reference, VariablePattern};
use crate::resolve::{lookup, resolve_path, PATH_SEPARATOR};

/// Variable tree with every internal reference substituted.
///
/// Has the same shape as the raw tree it was built from. Only
/// [`ResolvedStore::build`] produces one, so holding a `ResolvedStore` means
/// every string leaf is final.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedStore {
    table: Table,
}

impl ResolvedStore {
    /// Resolves all internal references in `raw`.
    ///
    /// `raw` is not modified; the store is a new tree.
    ///
    /// # Errors
    ///
    /// Fails on the first reference inside the data that is undefined, names a
    /// table, or takes part in a cycle.
    pub fn build(raw: &Table, pattern: &VariablePattern) -> Result<Self, ResolveError> {
        let mut builder = StoreBuilder {
            raw,
            pattern,
            resolved: HashMap::new(),
        };
        let table = builder.resolve_table(raw, &mut Vec::new())?;

        debug!(
            prefix = pattern.prefix(),
            strings = builder.resolved.len(),
            "resolved variable store"
        );
        Ok(Self { table })
    }

    /// The resolved tree.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Looks up the text of a leaf by dotted path.
    pub fn get(&self, path: &str) -> Result<String, ResolveError> {
        resolve_path(&self.table, path)
    }

    /// Returns `true` if the store holds no variables.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

type LeafKey<'a> = Vec<&'a str>;

struct StoreBuilder<'a> {
    raw: &'a Table,
    pattern: &'a VariablePattern,
    /// Final text of every string leaf resolved so far.
    resolved: HashMap<LeafKey<'a>, String>,
}

/// A string leaf whose references are being substituted.
struct Frame<'a> {
    key: LeafKey<'a>,
    text: &'a str,
    references: std::vec::IntoIter<Reference<'a>>,
    output: String,
    last: usize,
}

impl<'a> Frame<'a> {
    fn new(key: LeafKey<'a>, text: &'a str, pattern: &'a VariablePattern) -> Self {
        Self {
            key,
            text,
            // Collected up front so a waiting frame holds no regex search state.
            references: pattern.references(text).collect::<Vec<_>>().into_iter(),
            output: String::with_capacity(text.len()),
            last: 0,
        }
    }

    /// Copies the text up to the next reference and returns its path.
    fn next_reference(&mut self) -> Option<&'a str> {
        let reference = self.references.next()?;
        self.output.push_str(&self.text[self.last..reference.start()]);
        self.last = reference.end();
        Some(reference.path())
    }

    fn finish(mut self) -> (LeafKey<'a>, String) {
        self.output.push_str(&self.text[self.last..]);
        (self.key, self.output)
    }
}

impl<'a> StoreBuilder<'a> {
    fn resolve_table(
        &mut self,
        table: &'a Table,
        key: &mut LeafKey<'a>,
    ) -> Result<Table, ResolveError> {
        let mut resolved = Table::new();

        for (name, node) in table {
            key.push(name);
            let value = match node {
                VarNode::String(text) => VarNode::String(self.resolve_leaf(key.clone(), text)?),
                VarNode::Number(n) => VarNode::Number(*n),
                VarNode::Branch(child) => VarNode::Branch(self.resolve_table(child, key)?),
            };
            key.pop();
            resolved.insert(name.clone(), value);
        }

        Ok(resolved)
    }

    /// Resolves one string leaf and every leaf it depends on.
    ///
    /// Leaves waiting on a dependency are kept on an explicit stack, outermost
    /// first, so the length of a reference chain is bounded by memory rather
    /// than by the call stack.
    fn resolve_leaf(&mut self, key: LeafKey<'a>, text: &'a str) -> Result<String, ResolveError> {
        if let Some(done) = self.resolved.get(&key) {
            return Ok(done.clone());
        }

        let mut current = Frame::new(key, text, self.pattern);
        let mut waiting: Vec<Frame<'a>> = Vec::new();

        loop {
            let Some(path) = current.next_reference() else {
                let (key, value) = current.finish();
                self.resolved.insert(key, value.clone());
                match waiting.pop() {
                    Some(mut parent) => {
                        parent.output.push_str(&value);
                        current = parent;
                        continue;
                    }
                    None => return Ok(value),
                }
            };

            trace!(path, "substituting internal reference");
            let text = match lookup(self.raw, path)? {
                VarNode::String(text) => text,
                VarNode::Number(n) => {
                    current.output.push_str(&n.to_string());
                    continue;
                }
                VarNode::Branch(_) => {
                    return Err(ResolveError::InappropriateType {
                        path: path.to_string(),
                    })
                }
            };

            let key: LeafKey<'a> = path.split(PATH_SEPARATOR).collect();
            if let Some(done) = self.resolved.get(&key) {
                current.output.push_str(done);
                continue;
            }

            let visiting = || waiting.iter().chain(std::iter::once(&current));
            if let Some(start) = visiting().position(|frame| frame.key == key) {
                let chain = visiting()
                    .skip(start)
                    .map(|frame| &frame.key)
                    .chain(std::iter::once(&key))
                    .map(|k| k.join("."))
                    .collect();
                return Err(ResolveError::CircularReference { chain });
            }

            let next = Frame::new(key, text, self.pattern);
            waiting.push(std::mem::replace(&mut current, next));
        }
    }
}
