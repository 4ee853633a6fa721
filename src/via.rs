//! Via header parsing

use crate::chars;
use crate::error::{SipError, SipResult};
use crate::message::VERSION;
use crate::params::Parameters;

/// Parsed `Via` header: `SIP/2.0/<protocol> <host>[;params]`
#[derive(Debug, Clone, Copy)]
pub struct ViaHeader<'a> {
    protocol: &'a str,
    host: &'a str,
    parameters: Parameters<'a>,
}

impl<'a> ViaHeader<'a> {
    /// Parse a Via header value, e.g.
    /// `"SIP/2.0/UDP server10.biloxi.com;branch=z9hG4bKnashds8"`
    pub fn parse(text: &'a str) -> SipResult<Self> {
        let rest = text.strip_prefix(VERSION).ok_or_else(|| {
            SipError::parse_with_context("must start with the SIP/2.0 literal", "Via")
        })?;
        let rest = rest.strip_prefix('/').ok_or_else(|| {
            SipError::parse_with_context("missing / between version and protocol", "Via")
        })?;

        let protocol = match chars::index_of_whitespace(rest.as_bytes()) {
            Some(i) => &rest[..i],
            None => rest,
        };
        if protocol.is_empty() || !chars::is_token(protocol.as_bytes()) {
            return Err(SipError::parse_with_context(
                "transport protocol must be a token",
                "Via",
            ));
        }

        let rest = rest[protocol.len()..].trim_start();
        let host = match rest.find(|c: char| c.is_whitespace() || c == ';') {
            Some(i) => &rest[..i],
            None => rest,
        };
        if host.is_empty() || !chars::is_host(host.as_bytes()) {
            return Err(SipError::parse_with_context(
                "host must be alphanumeric characters, - or .",
                "Via",
            ));
        }

        let tail = rest[host.len()..].trim();
        if !tail.is_empty() && !tail.starts_with(';') {
            return Err(SipError::parse_with_context(
                "unexpected text after host",
                "Via",
            ));
        }

        Ok(ViaHeader {
            protocol,
            host,
            parameters: Parameters::new(tail),
        })
    }

    /// Always the exact literal `SIP/2.0`
    pub fn version(&self) -> &'static str {
        VERSION
    }

    /// The transport protocol token (UDP, TCP, ...)
    pub fn protocol(&self) -> &'a str {
        self.protocol
    }

    /// The sender host
    pub fn host(&self) -> &'a str {
        self.host
    }

    /// The parameter tail
    pub fn parameters(&self) -> Parameters<'a> {
        self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_header() {
        let header = ViaHeader::parse(
            "SIP/2.0/UDP  server10.biloxi.com  ; branch=  z9hG4bKnashds8 ; received =192.0.2.3;test",
        )
        .unwrap();

        assert_eq!(header.version(), "SIP/2.0");
        assert_eq!(header.protocol(), "UDP");
        assert_eq!(header.host(), "server10.biloxi.com");

        let mut params = header.parameters().iter();
        let branch = params.next().unwrap();
        assert_eq!((branch.name(), branch.value()), ("branch", "z9hG4bKnashds8"));
        let received = params.next().unwrap();
        assert_eq!((received.name(), received.value()), ("received", "192.0.2.3"));
        let test = params.next().unwrap();
        assert_eq!(test.name(), "test");
        assert!(test.is_flag());
        assert!(params.next().is_none());
    }

    #[test]
    fn test_valid_headers() {
        assert!(ViaHeader::parse("SIP/2.0/UDP server10.biloxi.com").is_ok());
        assert!(ViaHeader::parse("SIP/2.0/+*5 server10.biloxi.com").is_ok());
        assert!(ViaHeader::parse("SIP/2.0/UDP server").is_ok());
        assert!(ViaHeader::parse("SIP/2.0/UDP server  ;").is_ok());
    }

    #[test]
    fn test_wrong_version_literal() {
        assert!(ViaHeader::parse("SIP/3.0/UDP server10.biloxi.com").is_err());
        assert!(ViaHeader::parse("server10.biloxi.com").is_err());
        assert!(ViaHeader::parse("UDP server10.biloxi.com").is_err());
        assert!(ViaHeader::parse("SIP/2.0 server10.biloxi.com").is_err());
    }

    #[test]
    fn test_invalid_protocol() {
        assert!(ViaHeader::parse("SIP/2.0/@UDP] server10.biloxi.com").is_err());
        assert!(ViaHeader::parse("SIP/2.0/     server10.biloxi.com").is_err());
    }

    #[test]
    fn test_missing_or_invalid_host() {
        assert!(ViaHeader::parse("SIP/2.0/UDP").is_err());
        assert!(ViaHeader::parse("SIP/2.0/UDP      ").is_err());
        assert!(ViaHeader::parse("SIP/2.0/UDP ;test: asdf").is_err());
        assert!(ViaHeader::parse("SIP/2.0/UDP server10@biloxi.com").is_err());
    }

    #[test]
    fn test_trailing_text_after_host() {
        assert!(ViaHeader::parse("SIP/2.0/UDP asdf server10.biloxi.com").is_err());
    }
}
