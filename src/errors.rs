//! Defines the custom error types for the service.
//!
//! This uses `thiserror` for clean, boilerplate-free error handling.
//! `ParseError` is the typed failure of a single conversion; it never
//! leaves the request it belongs to. `ConverterError` covers the
//! process-level failures (configuration, binding, serving).

use thiserror::Error;

/// Why an XML document could not be converted.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML Syntax Error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("Invalid UTF-8 in markup: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Document contains no root element")]
    Empty,

    #[error("Unclosed element: <{0}>")]
    Unclosed(String),

    #[error("Mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedEnd { expected: String, found: String },

    #[error("Closing tag without an open element: </{0}>")]
    UnexpectedEnd(String),

    #[error("Multiple root elements: <{0}> follows the root element")]
    MultipleRoots(String),

    #[error("Character data outside the root element")]
    TextOutsideRoot,

    #[error("Invalid XML name: {0:?}")]
    InvalidName(String),

    #[error("Invalid XML character U+{0:04X}")]
    InvalidChar(u32),

    #[error("Attributes of <{0}> must be separated by whitespace")]
    AttributeSpacing(String),

    #[error("Element nesting exceeds the maximum depth of {0}")]
    TooDeep(usize),

    #[error("JSON Rendering Error: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("I/O Error: {1} - {0}")]
    Io(#[source] std::io::Error, String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl From<std::io::Error> for ConverterError {
    fn from(err: std::io::Error) -> Self {
        ConverterError::Io(err, "IO operation failed".to_string())
    }
}
