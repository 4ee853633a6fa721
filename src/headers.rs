//! Lazy header enumeration
//!
//! Headers are never collected into a map or vector: the enumerator walks
//! the decoded header text line by line and yields `(name, value)` views
//! into it. A malformed line is skipped, not an error; one broken header
//! must not take down an otherwise readable message.

use crate::chars;
use crate::values::HeaderValues;

const CRLF: &str = "\r\n";

/// A single header: `(name, value)` views into the message text
///
/// The name is everything before the first `:` on the line, trimmed, and is
/// guaranteed to consist of field characters. The value is everything after
/// the `:`, trimmed, and may contain arbitrary text; stricter grammars are
/// applied by the compound header parsers, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> Header<'a> {
    /// Header name, trimmed
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Header value, trimmed
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// Split the value into its comma-separated sub-values
    pub fn values(&self) -> HeaderValues<'a> {
        HeaderValues::new(self.value)
    }
}

/// View over the header lines of a message
#[derive(Debug, Clone, Copy)]
pub struct Headers<'a> {
    lines: &'a str,
}

impl<'a> Headers<'a> {
    /// Create a view over raw CRLF-delimited header lines
    pub fn new(lines: &'a str) -> Self {
        Headers { lines }
    }

    /// Iterate over the valid headers
    pub fn iter(&self) -> HeaderIter<'a> {
        HeaderIter {
            remaining: self.lines,
            done: false,
        }
    }
}

impl<'a> IntoIterator for Headers<'a> {
    type Item = Header<'a>;
    type IntoIter = HeaderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Headers<'a> {
    type Item = Header<'a>;
    type IntoIter = HeaderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward-only cursor over header lines
///
/// An empty line ends the header block for good; lines without a `:`, with
/// an invalid name or with an empty value are silently skipped. The cursor
/// never revisits a line; restart by asking [`Headers::iter`] again.
#[derive(Debug, Clone, Copy)]
pub struct HeaderIter<'a> {
    remaining: &'a str,
    done: bool,
}

impl<'a> Iterator for HeaderIter<'a> {
    type Item = Header<'a>;

    fn next(&mut self) -> Option<Header<'a>> {
        while !self.done {
            let line_end = chars::index_of_crlf(self.remaining.as_bytes(), 0)?;
            let line = &self.remaining[..line_end];
            self.remaining = &self.remaining[line_end + CRLF.len()..];

            if line.is_empty() {
                self.done = true;
                return None;
            }
            if let Some(header) = parse_header_line(line) {
                return Some(header);
            }
        }

        None
    }
}

fn parse_header_line(line: &str) -> Option<Header<'_>> {
    let colon = line.find(':')?;

    let name = line[..colon].trim();
    if name.is_empty() || !chars::is_field(name.as_bytes()) {
        return None;
    }

    let value = line[colon + 1..].trim();
    if value.is_empty() {
        return None;
    }

    Some(Header { name, value })
}
