//! Well-formedness checks that `quick-xml` leaves to the caller.
//!
//! Names follow the XML 1.0 `Name` production, character data the `Char`
//! production. Attribute lists must separate each attribute with
//! whitespace.

use crate::errors::ParseError;

fn is_name_start(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// `Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Reject anything that is not a valid XML `Name`.
pub fn check_name(name: &str) -> Result<(), ParseError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => is_name_start(first) && chars.all(is_name_char),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidName(name.to_string()))
    }
}

/// Reject text containing a character outside the XML `Char` range.
pub fn check_chars(text: &str) -> Result<(), ParseError> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(bad) => Err(ParseError::InvalidChar(u32::from(bad))),
        None => Ok(()),
    }
}

/// Check that every quoted attribute value is followed by whitespace,
/// `/`, or the end of the tag.
///
/// `raw` is the attribute part of a start tag, name excluded.
pub fn check_attribute_spacing(element: &str, raw: &[u8]) -> Result<(), ParseError> {
    let mut quote: Option<u8> = None;
    let mut bytes = raw.iter().peekable();

    while let Some(&b) = bytes.next() {
        match quote {
            Some(q) if b == q => {
                quote = None;
                if let Some(&&next) = bytes.peek() {
                    if !next.is_ascii_whitespace() && next != b'/' {
                        return Err(ParseError::AttributeSpacing(element.to_string()));
                    }
                }
            }
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None => {}
        }
    }
    Ok(())
}
