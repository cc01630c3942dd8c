//! Tree-sitter adapter for CSS.
//!
//! Wraps the `tree-sitter-css` grammar shipped with ast-grep-language and
//! exposes the handful of operations rules need: a kind-filtered walk,
//! 1-based node positions, raw and canonical node text, and the list of
//! structural syntax errors found while parsing.

pub mod errors;
pub mod node;
pub mod parser;

pub use errors::CssError;
pub use node::{block_declarations, canonicalize, kinds, CssNode, Declaration};
pub use parser::{CssParser, ParseError, Stylesheet};
