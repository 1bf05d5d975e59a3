//! Variable tree types.
//!
//! A variable tree is a [`Table`] of named [`VarNode`]s. Leaves are strings or
//! numbers; branches are nested tables. Only leaves can be substituted into
//! stylesheet text.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A level of the variable tree, keyed by identifier.
pub type Table = BTreeMap<String, VarNode>;

/// One node of the variable tree.
///
/// Deserializes from YAML or JSON: strings and numbers become leaves, maps become
/// branches. Booleans, nulls and sequences are rejected.
///
/// # Example
///
/// ```
/// use globvars::{Number, VarNode};
///
/// let colors: VarNode = [("primary", "red"), ("secondary", "blue")]
///     .into_iter()
///     .collect();
/// assert!(colors.is_branch());
///
/// let ratio = VarNode::from(0.5625);
/// assert_eq!(ratio.leaf_text().as_deref(), Some("0.5625"));
/// assert_eq!(ratio, VarNode::Number(Number::F64(0.5625)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarNode {
    /// String leaf. May contain references to other variables.
    String(String),
    /// Numeric leaf.
    Number(Number),
    /// Nested table.
    Branch(Table),
}

impl VarNode {
    /// Returns `true` if this is a nested table.
    pub fn is_branch(&self) -> bool {
        matches!(self, VarNode::Branch(_))
    }

    /// Extracts the nested table, if this is a branch.
    pub fn as_branch(&self) -> Option<&Table> {
        match self {
            VarNode::Branch(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the text substituted for this node, or `None` for branches.
    pub fn leaf_text(&self) -> Option<Cow<'_, str>> {
        match self {
            VarNode::String(s) => Some(Cow::Borrowed(s)),
            VarNode::Number(n) => Some(Cow::Owned(n.to_string())),
            VarNode::Branch(_) => None,
        }
    }
}

impl From<&str> for VarNode {
    fn from(s: &str) -> Self {
        VarNode::String(s.to_string())
    }
}

impl From<String> for VarNode {
    fn from(s: String) -> Self {
        VarNode::String(s)
    }
}

impl From<Table> for VarNode {
    fn from(table: Table) -> Self {
        VarNode::Branch(table)
    }
}

impl From<Number> for VarNode {
    fn from(n: Number) -> Self {
        VarNode::Number(n)
    }
}

impl<K, V> FromIterator<(K, V)> for VarNode
where
    K: Into<String>,
    V: Into<VarNode>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        VarNode::Branch(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Numeric leaf value.
///
/// Integers keep their exact representation; everything else is an `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer (values above `i64::MAX`).
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) if n.is_nan() => f.write_str("NaN"),
            Number::F64(n) if n.is_infinite() => {
                f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Negative zero prints as plain zero.
            Number::F64(n) if n == 0.0 => f.write_str("0"),
            Number::F64(n) if n.abs() >= 1e21 || n.abs() < 1e-6 => write_exponent(f, n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

/// Writes `n` as `1.5e-7` or `1e+21`.
fn write_exponent(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{}e+{}", mantissa, exponent)
        }
        _ => f.write_str(&text),
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(n: $t) -> Self {
                Number::I64(n as i64)
            }
        })*
    };
}

// Unsigned values that fit an i64 are stored as I64, matching what the
// YAML and JSON deserializers produce for the same literal.
macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(n: $t) -> Self {
                match i64::try_from(n) {
                    Ok(n) => Number::I64(n),
                    Err(_) => Number::U64(n as u64),
                }
            }
        })*
    };
}

macro_rules! impl_node_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for VarNode {
            fn from(n: $t) -> Self {
                VarNode::Number(n.into())
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_node_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<f32> for Number {
    fn from(n: f32) -> Self {
        Number::F64(n as f64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}
