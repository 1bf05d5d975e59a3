//! Globvars - Nested global variables for stylesheet values.
//!
//! Globvars replaces references such as `$global.colors.primary` inside
//! stylesheet values with literal values taken from a nested variable tree.
//! It provides:
//!
//! - A literal-prefix reference matcher with a configurable prefix
//! - Dotted-path lookup with type validation (only strings and numbers substitute)
//! - A build step that resolves references between variables, in dependency
//!   order, with cycle detection
//! - YAML and JSON loading of options and variable data
//!
//! # Quick Start
//!
//! ```rust
//! use globvars::{GlobalVars, Options};
//!
//! let options = Options::from_yaml(r#"
//! data:
//!   colors:
//!     main: red
//!     lighter: color($global.colors.main l(+30%))
//!   aspect-ratios:
//!     video-height: 0.5625
//! "#).unwrap();
//!
//! let vars = GlobalVars::new(options).unwrap();
//!
//! assert_eq!(vars.rewrite("$global.colors.lighter").unwrap(), "color(red l(+30%))");
//! assert_eq!(
//!     vars.rewrite("calc($global.aspect-ratios.video-height * 1%)").unwrap(),
//!     "calc(0.5625 * 1%)",
//! );
//! ```
//!
//! # Errors
//!
//! Rewriting fails on the first reference that cannot be substituted:
//!
//! | Error | Message |
//! |-------|---------|
//! | [`ResolveError::Undefined`] | `Property "colors.secondary" is not defined.` |
//! | [`ResolveError::InappropriateType`] | `The "colors" property has an inappropriate type.` |
//! | [`ResolveError::CircularReference`] | `Circular reference detected: a -> b -> a` |
//!
//! Errors inside the variable data itself are reported when the
//! [`GlobalVars`] instance is built, not when a value is rewritten.

mod config;
mod error;
mod node;
mod pattern;
mod resolve;
mod rewrite;
mod store;
mod vars;

// Re-export public API
pub use config::{ConfigFormat, Options, CONFIG_EXTENSIONS};
pub use error::{ConfigError, GlobalVarsError, ResolveError, Result};
pub use node::{Number, Table, VarNode};
pub use pattern::{Reference, References, VariablePattern, DEFAULT_PREFIX};
pub use resolve::resolve_path;
pub use rewrite::rewrite;
pub use store::ResolvedStore;
pub use vars::GlobalVars;
