//! CSeq header parsing

use crate::chars;
use crate::error::{SipError, SipResult};
use crate::types::Method;

/// Parsed `CSeq` header: a sequence number followed by a method token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CSeqHeader<'a> {
    method: &'a str,
    sequence_number: &'a str,
}

impl<'a> CSeqHeader<'a> {
    /// Parse a CSeq header value, e.g. `"314159 INVITE"`
    pub fn parse(text: &'a str) -> SipResult<Self> {
        let trimmed = text.trim();

        let sequence_number = match chars::index_of_whitespace(trimmed.as_bytes()) {
            Some(i) => &trimmed[..i],
            None => trimmed,
        };
        if sequence_number.is_empty() || !chars::is_digits(sequence_number.as_bytes()) {
            return Err(SipError::parse_with_context(
                "sequence number must be one or more digits",
                "CSeq",
            ));
        }

        let method = trimmed[sequence_number.len()..].trim_start();
        if method.is_empty() || !chars::is_token(method.as_bytes()) {
            return Err(SipError::parse_with_context(
                "method must be a token",
                "CSeq",
            ));
        }

        Ok(CSeqHeader {
            method,
            sequence_number,
        })
    }

    /// The method token
    pub fn method(&self) -> &'a str {
        self.method
    }

    /// The sequence number, digits as text
    pub fn sequence_number(&self) -> &'a str {
        self.sequence_number
    }

    /// The sequence number as an integer, `None` if it does not fit a u32
    pub fn sequence(&self) -> Option<u32> {
        self.sequence_number.parse().ok()
    }

    /// The method mapped to a [`Method`]
    pub fn method_kind(&self) -> Method {
        Method::from_token(self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let header = CSeqHeader::parse("99 ACK").unwrap();
        assert_eq!(header.method(), "ACK");
        assert_eq!(header.sequence_number(), "99");
        assert_eq!(header.sequence(), Some(99));
        assert_eq!(header.method_kind(), Method::ACK);
    }

    #[test]
    fn test_whitespace_tolerance() {
        let header = CSeqHeader::parse("99      ACK").unwrap();
        assert_eq!((header.method(), header.sequence_number()), ("ACK", "99"));

        let header = CSeqHeader::parse("  99  ACK      ").unwrap();
        assert_eq!((header.method(), header.sequence_number()), ("ACK", "99"));
    }

    #[test]
    fn test_exotic_method_token() {
        let header = CSeqHeader::parse("99 +A~CK|").unwrap();
        assert_eq!((header.method(), header.sequence_number()), ("+A~CK|", "99"));
        assert_eq!(
            header.method_kind(),
            Method::UNKNOWN("+A~CK|".to_string())
        );
    }

    #[test]
    fn test_missing_parts() {
        assert!(CSeqHeader::parse("1").is_err());
        assert!(CSeqHeader::parse("ACK").is_err());
        assert!(CSeqHeader::parse("").is_err());
    }

    #[test]
    fn test_invalid_sequence_number() {
        assert!(CSeqHeader::parse("99a ACK").is_err());
    }

    #[test]
    fn test_invalid_method() {
        assert!(CSeqHeader::parse("99 (ACK);").is_err());
        assert!(CSeqHeader::parse("99 qwer asdf").is_err());
    }
}
