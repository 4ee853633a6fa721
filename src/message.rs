//! Top-level message parsing
//!
//! A message arrives as one already-framed byte buffer; framing across a
//! transport stream is the caller's job. Parsing splits the buffer at the
//! CRLF CRLF header terminator, validates the header block as UTF-8 exactly
//! once, parses the first line, and hands back views into the buffer. The
//! body is never treated as text.

use std::fmt;
use std::str;

use crate::chars;
use crate::error::{SipError, SipResult};
use crate::headers::Headers;
use crate::types::Method;

/// The one protocol version this crate speaks
pub const VERSION: &str = "SIP/2.0";

const CRLF: &str = "\r\n";
const END_OF_HEADERS: &[u8] = b"\r\n\r\n";
const STATUS_CODE_LENGTH: usize = 3;

/// Split a raw buffer into `(header bytes, body bytes)` at the first
/// CRLF CRLF. The header slice includes the terminator; the body may be
/// empty. Fails with [`SipError::Incomplete`] when the terminator is
/// missing; the caller should retry once more bytes have arrived.
pub fn split_headers(bytes: &[u8]) -> SipResult<(&[u8], &[u8])> {
    let index = bytes
        .windows(END_OF_HEADERS.len())
        .position(|window| window == END_OF_HEADERS)
        .ok_or(SipError::Incomplete)?;

    let split = index + END_OF_HEADERS.len();
    Ok((&bytes[..split], &bytes[split..]))
}

/// A parsed SIP request
///
/// All text fields are views into the input buffer; nothing is copied.
///
/// ```
/// use sipwire::Request;
///
/// let message = b"REGISTER sip:ss2.wcom.com SIP/2.0\r\nCSeq: 1 REGISTER\r\n\r\n";
/// let request = Request::parse(message).unwrap();
/// assert_eq!(request.method(), "REGISTER");
/// assert_eq!(request.uri(), "sip:ss2.wcom.com");
/// assert_eq!(request.headers().iter().count(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    header_text: &'a str,
    header_lines: &'a str,
    method: &'a str,
    uri: &'a str,
    version: &'a str,
    body: &'a [u8],
}

impl<'a> Request<'a> {
    /// Parse a request from one raw message buffer
    pub fn parse(bytes: &'a [u8]) -> SipResult<Self> {
        let (header_text, header_lines, first_line, body) = slice_message(bytes)?;

        let (method, rest) = slice_word(first_line);
        if method.is_empty() || !chars::is_token(method.as_bytes()) {
            return Err(SipError::parse_with_context(
                "method must be a non-empty token",
                "request line",
            ));
        }

        let rest = skip_single_space(rest).ok_or_else(|| {
            SipError::parse_with_context("missing uri", "request line")
        })?;
        let (uri, rest) = slice_word(rest);
        if uri.is_empty() || !chars::is_uri(uri.as_bytes()) {
            return Err(SipError::parse_with_context(
                "uri must be non-empty URI characters",
                "request line",
            ));
        }

        let rest = skip_single_space(rest).ok_or_else(|| {
            SipError::parse_with_context("missing version", "request line")
        })?;
        let (version, rest) = slice_word(rest);
        if version != VERSION {
            return Err(SipError::parse_with_context(
                "version must be SIP/2.0",
                "request line",
            ));
        }
        if !rest.is_empty() {
            return Err(SipError::parse_with_context(
                "unexpected text after version",
                "request line",
            ));
        }

        Ok(Request {
            header_text,
            header_lines,
            method,
            uri,
            version,
            body,
        })
    }

    /// The request method token
    pub fn method(&self) -> &'a str {
        self.method
    }

    /// The method mapped to a [`Method`]
    pub fn method_kind(&self) -> Method {
        Method::from_token(self.method)
    }

    /// The request URI, exactly as it appeared on the wire
    pub fn uri(&self) -> &'a str {
        self.uri
    }

    /// The protocol version (always the `SIP/2.0` literal)
    pub fn version(&self) -> &'a str {
        self.version
    }

    /// The header lines as a lazy, restartable enumerable view
    pub fn headers(&self) -> Headers<'a> {
        Headers::new(self.header_lines)
    }

    /// The raw body bytes (may be binary; never validated as text)
    pub fn body(&self) -> &'a [u8] {
        self.body
    }

    /// The decoded header block, first line and terminator included
    pub fn as_str(&self) -> &'a str {
        self.header_text
    }
}

impl fmt::Display for Request<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_text)
    }
}

/// A parsed SIP response
///
/// The reason phrase is the only first-line field that may contain spaces;
/// it runs to the end of the line verbatim, trailing whitespace included.
#[derive(Debug, Clone, Copy)]
pub struct Response<'a> {
    header_text: &'a str,
    header_lines: &'a str,
    version: &'a str,
    status_code: &'a str,
    reason_phrase: &'a str,
    body: &'a [u8],
}

impl<'a> Response<'a> {
    /// Parse a response from one raw message buffer
    pub fn parse(bytes: &'a [u8]) -> SipResult<Self> {
        let (header_text, header_lines, first_line, body) = slice_message(bytes)?;

        let (version, rest) = slice_word(first_line);
        if version != VERSION {
            return Err(SipError::parse_with_context(
                "version must be SIP/2.0",
                "status line",
            ));
        }

        let rest = skip_single_space(rest).ok_or_else(|| {
            SipError::parse_with_context("missing status code", "status line")
        })?;
        let (status_code, rest) = slice_word(rest);
        if status_code.len() != STATUS_CODE_LENGTH || !chars::is_digits(status_code.as_bytes()) {
            return Err(SipError::parse_with_context(
                "status code must be exactly three digits",
                "status line",
            ));
        }

        let reason_phrase = skip_single_space(rest).ok_or_else(|| {
            SipError::parse_with_context("missing reason phrase", "status line")
        })?;

        Ok(Response {
            header_text,
            header_lines,
            version,
            status_code,
            reason_phrase,
            body,
        })
    }

    /// The protocol version (always the `SIP/2.0` literal)
    pub fn version(&self) -> &'a str {
        self.version
    }

    /// The three-digit status code as text
    pub fn status_code(&self) -> &'a str {
        self.status_code
    }

    /// The reason phrase, verbatim to the end of the line
    pub fn reason_phrase(&self) -> &'a str {
        self.reason_phrase
    }

    /// The header lines as a lazy, restartable enumerable view
    pub fn headers(&self) -> Headers<'a> {
        Headers::new(self.header_lines)
    }

    /// The raw body bytes (may be binary; never validated as text)
    pub fn body(&self) -> &'a [u8] {
        self.body
    }

    /// The decoded header block, first line and terminator included
    pub fn as_str(&self) -> &'a str {
        self.header_text
    }
}

impl fmt::Display for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_text)
    }
}

/// Common front half of request and response parsing: split off the header
/// block, decode it, and slice out the first line.
fn slice_message(bytes: &[u8]) -> SipResult<(&str, &str, &str, &[u8])> {
    let (header_bytes, body) = split_headers(bytes)?;

    let header_text = str::from_utf8(header_bytes)
        .map_err(|_| SipError::parse("header block is not valid UTF-8"))?;

    // The terminator is present, so the first CRLF always is too.
    let line_end = chars::index_of_crlf(header_text.as_bytes(), 0).unwrap_or(0);
    let first_line = &header_text[..line_end];
    let header_lines = &header_text[line_end + CRLF.len()..];

    Ok((header_text, header_lines, first_line, body))
}

/// The text up to the first space, and the rest starting at that space
fn slice_word(line: &str) -> (&str, &str) {
    match line.find(' ') {
        Some(i) => (&line[..i], &line[i..]),
        None => (line, ""),
    }
}

/// Require exactly one leading space and step over it
fn skip_single_space(rest: &str) -> Option<&str> {
    rest.strip_prefix(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_headers() {
        let (headers, body) = split_headers(b"A: 1\r\n\r\nbody").unwrap();
        assert_eq!(headers, b"A: 1\r\n\r\n");
        assert_eq!(body, b"body");

        let (headers, body) = split_headers(b"A: 1\r\n\r\n").unwrap();
        assert_eq!(headers, b"A: 1\r\n\r\n");
        assert!(body.is_empty());
    }

    #[test]
    fn test_split_headers_at_start() {
        let (headers, body) = split_headers(b"\r\n\r\nrest").unwrap();
        assert_eq!(headers, b"\r\n\r\n");
        assert_eq!(body, b"rest");
    }

    #[test]
    fn test_split_headers_incomplete() {
        let err = split_headers(b"REGISTER sip:x SIP/2.0\r\nA: 1\r\n").unwrap_err();
        assert!(err.is_incomplete());
        assert!(split_headers(b"").unwrap_err().is_incomplete());
        assert!(split_headers(b"\r\n").unwrap_err().is_incomplete());
    }

    #[test]
    fn test_binary_body_survives() {
        let mut message = b"REGISTER sip:x SIP/2.0\r\n\r\n".to_vec();
        message.extend_from_slice(&[0, 159, 146, 150, 255]);

        let request = Request::parse(&message).unwrap();
        assert_eq!(request.body(), &[0, 159, 146, 150, 255]);
    }

    #[test]
    fn test_invalid_utf8_in_headers_is_rejected() {
        let mut message = b"REGISTER sip:x SIP/2.0\r\nA: ".to_vec();
        message.push(0xff);
        message.extend_from_slice(b"\r\n\r\n");

        assert!(Request::parse(&message).is_err());
    }

    #[test]
    fn test_display_renders_header_block() {
        let message = b"REGISTER sip:x SIP/2.0\r\nA: 1\r\n\r\nbody";
        let request = Request::parse(message).unwrap();
        assert_eq!(request.to_string(), "REGISTER sip:x SIP/2.0\r\nA: 1\r\n\r\n");
    }
}
