//! Input and output formats handled by the service.
//!
//! XML comes in, is parsed into a `xml::Document`, and leaves as JSON text
//! rendered by the `json` module.

pub mod json;
pub mod xml;

/// Formats the service speaks on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON format
    Json,
    /// Plain-text diagnostics (the `BAD REQUEST` body)
    Text,
}

impl Format {
    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Text => "text/plain; charset=utf-8",
        }
    }
}
