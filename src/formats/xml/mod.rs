//! XML input: the document tree and the parser that builds it.

pub mod document;
pub mod parser;
pub mod syntax;

pub use document::{Attribute, Document, Element, Node, Text};
pub use parser::{DEFAULT_MAX_DEPTH, parse, parse_with_depth};
