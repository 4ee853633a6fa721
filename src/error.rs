//! Error handling for sipwire
//!
//! A single error type covers every failure the parser can report. Parsing
//! untrusted network bytes never panics; a malformed message is an ordinary
//! `Err` value the caller is expected to handle.

use std::error::Error as StdError;
use std::fmt;

/// Unified error type for sipwire operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SipError {
    /// The header block terminator (CRLF CRLF) was not found.
    ///
    /// This is the "need more bytes" signal: the buffer may simply hold a
    /// truncated message, and the caller should retry once more bytes have
    /// arrived.
    Incomplete,

    /// The message, a header, or a compound header value failed to parse
    Parse {
        message: String,
        context: Option<String>,
    },
}

impl fmt::Display for SipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SipError::Incomplete => {
                write!(f, "Header block not terminated (missing CRLF CRLF)")
            }
            SipError::Parse { message, context } => {
                write!(f, "Parse error: {}", message)?;
                if let Some(ctx) = context {
                    write!(f, " ({})", ctx)?;
                }
                Ok(())
            }
        }
    }
}

impl StdError for SipError {}

impl SipError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        SipError::Parse {
            message: message.into(),
            context: None,
        }
    }

    /// Create a parse error with additional context
    pub fn parse_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        SipError::Parse {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Check whether this error means "the message is not complete yet"
    ///
    /// Incomplete input is recoverable: feed the parser the same buffer again
    /// once more bytes are available. Every other error is a verdict on the
    /// bytes themselves.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, SipError::Incomplete)
    }

    /// Get error category for metrics
    pub fn category(&self) -> &'static str {
        match self {
            SipError::Incomplete => "incomplete",
            SipError::Parse { .. } => "parsing",
        }
    }
}

/// Result type for sipwire operations
pub type SipResult<T> = Result<T, SipError>;
