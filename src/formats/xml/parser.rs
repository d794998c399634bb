//! XML text to `Document` tree, built on the `quick-xml` pull reader.
//!
//! The reader is non-recursive: open elements live on an explicit stack,
//! so hostile nesting is bounded by `max_depth` rather than by the
//! thread's stack size.

use crate::errors::ParseError;
use crate::formats::xml::document::{Attribute, Document, Element, Node, Text};
use crate::formats::xml::syntax;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Default bound on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Parse a complete XML document.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    parse_with_depth(input, DEFAULT_MAX_DEPTH)
}

/// Parse a complete XML document, rejecting nesting deeper than `max_depth`.
pub fn parse_with_depth(input: &str, max_depth: usize) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(input);
    // End tags are matched against our own stack so the error names both tags.
    reader.config_mut().check_end_names = false;

    let mut builder = TreeBuilder::new(max_depth);

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let element = element_from(&start)?;
                builder.open(element)?;
            }
            Event::Empty(start) => {
                let element = element_from(&start)?;
                builder.open(element)?;
                builder.close(None)?;
            }
            Event::End(end) => {
                let name = std::str::from_utf8(end.name().as_ref())?.to_string();
                syntax::check_name(&name)?;
                builder.close(Some(name))?;
            }
            Event::Text(text) => {
                let unescaped = text.unescape()?;
                builder.text(&unescaped, false)?;
            }
            Event::CData(cdata) => {
                let raw = std::str::from_utf8(&cdata)?;
                builder.text(raw, true)?;
            }
            Event::Eof => return builder.finish(),
            // Declarations, comments, processing instructions, DOCTYPE.
            _ => {}
        }
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, ParseError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    syntax::check_name(&name)?;
    syntax::check_attribute_spacing(&name, start.attributes_raw())?;
    let mut element = Element::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let name = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        syntax::check_name(&name)?;
        let value = attribute.unescape_value()?.into_owned();
        syntax::check_chars(&value)?;
        element.attributes.push(Attribute { name, value });
    }

    Ok(element)
}

/// Character data collected since the last piece of element markup.
#[derive(Default)]
struct PendingText {
    buffer: String,
    verbatim: bool,
}

impl PendingText {
    fn push(&mut self, text: &str, verbatim: bool) {
        self.buffer.push_str(text);
        self.verbatim |= verbatim;
    }

    fn take(&mut self) -> Option<Text> {
        let trimmed = self.buffer.trim();
        let text = (!trimmed.is_empty()).then(|| Text {
            value: trimmed.to_string(),
            verbatim: self.verbatim,
        });
        self.buffer.clear();
        self.verbatim = false;
        text
    }
}

struct TreeBuilder {
    open: Vec<Element>,
    pending: PendingText,
    root: Option<Element>,
    max_depth: usize,
}

impl TreeBuilder {
    fn new(max_depth: usize) -> Self {
        Self {
            open: Vec::new(),
            pending: PendingText::default(),
            root: None,
            max_depth,
        }
    }

    fn open(&mut self, element: Element) -> Result<(), ParseError> {
        if self.open.is_empty() && self.root.is_some() {
            return Err(ParseError::MultipleRoots(element.name));
        }
        if self.open.len() >= self.max_depth {
            return Err(ParseError::TooDeep(self.max_depth));
        }
        self.flush_text();
        self.open.push(element);
        Ok(())
    }

    /// Close the innermost element. `None` closes a self-closing tag.
    fn close(&mut self, name: Option<String>) -> Result<(), ParseError> {
        self.flush_text();

        let element = match self.open.pop() {
            Some(element) => element,
            None => return Err(ParseError::UnexpectedEnd(name.unwrap_or_default())),
        };

        if let Some(found) = name {
            if found != element.name {
                return Err(ParseError::MismatchedEnd {
                    expected: element.name,
                    found,
                });
            }
        }

        match self.open.last_mut() {
            Some(parent) => parent.content.push(Node::Element(element)),
            None => self.root = Some(element),
        }
        Ok(())
    }

    fn text(&mut self, text: &str, verbatim: bool) -> Result<(), ParseError> {
        syntax::check_chars(text)?;
        if self.open.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(ParseError::TextOutsideRoot);
        }
        self.pending.push(text, verbatim);
        Ok(())
    }

    fn flush_text(&mut self) {
        if let Some(text) = self.pending.take() {
            if let Some(current) = self.open.last_mut() {
                current.content.push(Node::Text(text));
            }
        }
    }

    fn finish(mut self) -> Result<Document, ParseError> {
        if let Some(unclosed) = self.open.pop() {
            return Err(ParseError::Unclosed(unclosed.name));
        }
        self.root
            .map(|root| Document { root })
            .ok_or(ParseError::Empty)
    }
}
