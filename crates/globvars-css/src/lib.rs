//! Global variable substitution for CSS stylesheets.
//!
//! `globvars-css` walks a stylesheet and rewrites every declaration value and
//! at-rule prelude through a [`GlobalVars`] instance. Selectors, comments and
//! formatting are preserved exactly.
//!
//! ```rust
//! use globvars::{GlobalVars, Options};
//! use globvars_css::Processor;
//!
//! let options = Options::from_yaml(r#"
//! data:
//!   screen:
//!     notebook: 1400px
//!     tablet: 1100px
//! "#).unwrap();
//!
//! let processor = Processor::new(GlobalVars::new(options).unwrap());
//! let css = processor
//!     .process("@media ($global.screen.tablet >= width < $global.screen.notebook){div {color: red}}")
//!     .unwrap();
//!
//! assert_eq!(css, "@media (1100px >= width < 1400px){div {color: red}}");
//! ```
//!
//! Errors name the plugin, the position of the offending value and the
//! resolution failure:
//!
//! ```text
//! global-vars: theme.css:3:15: Property "colors.secondary" is not defined.
//! ```
//!
//! The `globvars` binary wraps [`Processor`] for use from the command line.

mod error;
mod processor;
pub mod walker;

pub use error::CssError;
pub use processor::{process_css, Processor, PLUGIN_NAME};

pub use globvars::GlobalVars;
