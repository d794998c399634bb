//! In-memory XML tree produced by the parser.
//!
//! The tree keeps only what the JSON mapping needs: element names,
//! attributes in source order, and the interleaving of child elements
//! with character data. Comments, processing instructions and the
//! DOCTYPE never make it in here.

/// A parsed XML document. Always has exactly one root element.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

/// A named element with its attributes and content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Qualified tag name as written, prefix included (`ns:item`).
    pub name: String,

    /// Attributes in source order, values already unescaped.
    pub attributes: Vec<Attribute>,

    /// Child elements and text segments in document order.
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

/// A run of character data between two pieces of markup.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Trimmed, unescaped text. Never empty.
    pub value: String,

    /// Set when any part of the run came from a CDATA section.
    pub verbatim: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Iterate over the child elements, skipping text.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.content.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// The element's text when it holds nothing but a single text run.
    ///
    /// This is the shape that collapses to a bare scalar in JSON.
    pub fn sole_text(&self) -> Option<&Text> {
        if !self.attributes.is_empty() {
            return None;
        }
        match self.content.as_slice() {
            [Node::Text(text)] => Some(text),
            _ => None,
        }
    }

    /// True for `<a/>` and `<a></a>` (whitespace-only content included).
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.content.is_empty()
    }
}
