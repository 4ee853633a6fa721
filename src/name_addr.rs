//! Name-address header parsing (`From`, `To`, `Contact`, `Route`, ...)
//!
//! Grammar: `[display-name] <uri>[;params]`, or a bare URI with an optional
//! parameter tail. When the URI is bracket-delimited the brackets stay part
//! of the URI view; they are the authoritative wire form. When no `<...>`
//! is present the first `;` ends the URI and starts the parameters.

use crate::chars;
use crate::error::{SipError, SipResult};
use crate::params::Parameters;

/// Parsed name-address header value
#[derive(Debug, Clone, Copy)]
pub struct NameAddressHeader<'a> {
    display_name: &'a str,
    uri: &'a str,
    parameters: Parameters<'a>,
}

impl<'a> NameAddressHeader<'a> {
    /// Parse a name-address header value, e.g.
    /// `"Alice <sip:alice@atlanta.com>;tag=1928301774"`
    pub fn parse(text: &'a str) -> SipResult<Self> {
        let display_name = read_display_name(text);
        let trimmed_display_name = display_name.trim();
        if !is_display_name_valid(trimmed_display_name) {
            return Err(SipError::parse_with_context(
                "display name must be a quoted string or token characters",
                "name-addr",
            ));
        }

        let after_display_name = text[display_name.len()..].trim_start();
        let uri = read_uri(after_display_name);
        let trimmed_uri = uri.trim_end();
        validate_uri(trimmed_uri)?;

        let tail = after_display_name[uri.len()..].trim();
        if !tail.is_empty() && !tail.starts_with(';') {
            return Err(SipError::parse_with_context(
                "unexpected text after uri",
                "name-addr",
            ));
        }

        Ok(NameAddressHeader {
            display_name: trimmed_display_name,
            uri: trimmed_uri,
            parameters: Parameters::new(tail),
        })
    }

    /// The display name, trimmed; quoted display names keep their quotes.
    /// Empty when the header has none.
    pub fn display_name(&self) -> &'a str {
        self.display_name
    }

    /// The URI; `<...>` brackets are retained when present
    pub fn uri(&self) -> &'a str {
        self.uri
    }

    /// The parameter tail after the URI
    pub fn parameters(&self) -> Parameters<'a> {
        self.parameters
    }
}

/// Everything before the `<` that opens the URI, or empty when the URI is
/// bare. A quoted display name is skipped first so a `<` inside quotes does
/// not count.
fn read_display_name(text: &str) -> &str {
    let skip = match quoted_display_span(text) {
        Some((start, len)) => start + len,
        None => 0,
    };
    match text[skip..].find('<') {
        Some(i) => &text[..skip + i],
        None => "",
    }
}

/// Locate a leading quoted display name: `(start, distance to closing quote)`
fn quoted_display_span(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let start = chars::index_of_separator_excluding_whitespace(bytes, 0)?;
    if bytes[start] != b'"' {
        return None;
    }
    let end = chars::index_of_non_escaped(bytes, b'"', start + 1)?;
    Some((start, end - start))
}

fn read_uri(text: &str) -> &str {
    if text.starts_with('<') {
        if let Some(end) = text.find('>') {
            return &text[..end + 1];
        }
    }
    match text.find(';') {
        Some(i) if i > 0 => &text[..i],
        _ => text,
    }
}

fn is_display_name_valid(name: &str) -> bool {
    name.is_empty()
        || chars::is_quoted(name.as_bytes())
        || chars::is_token_or_whitespace(name.as_bytes())
}

fn validate_uri(uri: &str) -> SipResult<()> {
    let inner = match in_brackets(uri) {
        true => &uri[1..uri.len() - 1],
        false => uri,
    };
    if inner.is_empty() || !chars::is_uri(inner.as_bytes()) {
        return Err(SipError::parse_with_context(
            "uri must be non-empty URI characters",
            "name-addr",
        ));
    }
    Ok(())
}

fn in_brackets(uri: &str) -> bool {
    uri.len() > 1 && uri.starts_with('<') && uri.ends_with('>')
}
