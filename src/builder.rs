//! Message building
//!
//! [`MessageBuilder`] is the inverse of parsing: it assembles a first line,
//! headers and a body into one canonical wire buffer. It is a persistent
//! value: every mutator consumes the builder and returns a new one, so any
//! intermediate step can be cloned and reused as a branching point.
//!
//! Builder inputs are caller-controlled, not network bytes. Invalid
//! arguments are programmer errors and panic immediately, before anything
//! is written.

use crate::chars;
use crate::message::VERSION;

const CRLF: &str = "\r\n";
const STATUS_CODE_LENGTH: usize = 3;
// two spaces + "SIP/2.0" + CRLF around the two variable first-line fields
const FIRST_LINE_EXTRA: usize = 2 + VERSION.len() + CRLF.len();
// ":" + CRLF around a header name/value pair
const HEADER_EXTRA: usize = 1 + CRLF.len();

/// Immutable accumulator for one outgoing message
///
/// ```
/// use sipwire::MessageBuilder;
///
/// let message = MessageBuilder::new()
///     .set_request_line("REGISTER", "sip:ss2.wcom.com")
///     .add_header("CSeq", "1 REGISTER")
///     .set_body(b"hello".to_vec())
///     .build();
/// assert!(message.starts_with(b"REGISTER sip:ss2.wcom.com SIP/2.0\r\n"));
/// assert!(message.ends_with(b"\r\nhello"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    header: String,
    first_line_length: usize,
    body: Vec<u8>,
}

impl MessageBuilder {
    /// Create an empty builder with no first line, headers or body
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the request line: `<method> <uri> SIP/2.0`
    ///
    /// Headers added before this call are kept.
    ///
    /// # Panics
    ///
    /// Panics if the method is empty or not a token, or if the URI is empty
    /// or contains non-URI characters.
    pub fn set_request_line(self, method: &str, uri: &str) -> Self {
        assert!(
            !method.is_empty() && chars::is_token(method.as_bytes()),
            "method must be a non-empty token: {method:?}"
        );
        assert!(
            !uri.is_empty() && chars::is_uri(uri.as_bytes()),
            "uri must be non-empty URI characters: {uri:?}"
        );

        let rest = &self.header[self.first_line_length..];
        let mut header =
            String::with_capacity(method.len() + uri.len() + FIRST_LINE_EXTRA + rest.len());
        header.push_str(method);
        header.push(' ');
        header.push_str(uri);
        header.push(' ');
        header.push_str(VERSION);
        header.push_str(CRLF);
        let first_line_length = header.len();
        header.push_str(rest);

        MessageBuilder {
            header,
            first_line_length,
            body: self.body,
        }
    }

    /// Set (or replace) the status line: `SIP/2.0 <status> <reason>`
    ///
    /// Headers added before this call are kept.
    ///
    /// # Panics
    ///
    /// Panics if the status code is not exactly three digits, or if the
    /// reason phrase contains a CR or LF. An empty reason phrase is fine.
    pub fn set_response_line(self, status_code: &str, reason_phrase: &str) -> Self {
        assert!(
            status_code.len() == STATUS_CODE_LENGTH && chars::is_digits(status_code.as_bytes()),
            "status code must be exactly three digits: {status_code:?}"
        );
        assert!(
            !chars::has_cr_or_lf(reason_phrase.as_bytes()),
            "reason phrase must not contain CR or LF: {reason_phrase:?}"
        );

        let rest = &self.header[self.first_line_length..];
        let mut header = String::with_capacity(
            status_code.len() + reason_phrase.len() + FIRST_LINE_EXTRA + rest.len(),
        );
        header.push_str(VERSION);
        header.push(' ');
        header.push_str(status_code);
        header.push(' ');
        header.push_str(reason_phrase);
        header.push_str(CRLF);
        let first_line_length = header.len();
        header.push_str(rest);

        MessageBuilder {
            header,
            first_line_length,
            body: self.body,
        }
    }

    /// Append one header line: `<name>:<value>`
    ///
    /// # Panics
    ///
    /// Panics if the name is empty or contains non-field characters, or if
    /// the value is empty.
    pub fn add_header(self, name: &str, value: &str) -> Self {
        validate_header(name, value);

        let mut header =
            String::with_capacity(self.header.len() + name.len() + value.len() + HEADER_EXTRA);
        header.push_str(&self.header);
        push_header(&mut header, name, value);

        MessageBuilder {
            header,
            first_line_length: self.first_line_length,
            body: self.body,
        }
    }

    /// Append several header lines at once
    ///
    /// # Panics
    ///
    /// Panics on the first invalid pair; the whole batch is validated
    /// before any of it is written.
    pub fn add_headers(self, headers: &[(&str, &str)]) -> Self {
        for (name, value) in headers {
            validate_header(name, value);
        }

        let added: usize = headers
            .iter()
            .map(|(name, value)| name.len() + value.len() + HEADER_EXTRA)
            .sum();
        let mut header = String::with_capacity(self.header.len() + added);
        header.push_str(&self.header);
        for (name, value) in headers {
            push_header(&mut header, name, value);
        }

        MessageBuilder {
            header,
            first_line_length: self.first_line_length,
            body: self.body,
        }
    }

    /// Attach the body bytes, replacing any previous body
    pub fn set_body(self, body: Vec<u8>) -> Self {
        MessageBuilder { body, ..self }
    }

    /// Serialize to one contiguous buffer:
    /// `<first line>\r\n(<name>:<value>\r\n)*\r\n<body>`
    ///
    /// # Panics
    ///
    /// Panics if no first line was set.
    pub fn build(self) -> Vec<u8> {
        assert!(
            self.first_line_length != 0,
            "a request or response line must be set before build"
        );

        let mut message = Vec::with_capacity(self.header.len() + CRLF.len() + self.body.len());
        message.extend_from_slice(self.header.as_bytes());
        message.extend_from_slice(CRLF.as_bytes());
        message.extend_from_slice(&self.body);
        message
    }
}

fn validate_header(name: &str, value: &str) {
    assert!(
        !name.is_empty() && chars::is_field(name.as_bytes()),
        "header name must be non-empty field characters: {name:?}"
    );
    assert!(!value.is_empty(), "header value must not be empty: {name}");
}

fn push_header(header: &mut String, name: &str, value: &str) {
    header.push_str(name);
    header.push(':');
    header.push_str(value);
    header.push_str(CRLF);
}
