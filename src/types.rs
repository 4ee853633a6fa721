//! Common types shared across the library

use strum_macros::{Display, EnumString};

/// SIP methods as defined in RFC 3261 and extensions
///
/// The parser keeps every method as a borrowed text view; this enum is a
/// convenience for callers that want to dispatch on well-known methods
/// without string comparisons. Unrecognized methods are preserved verbatim
/// in the `UNKNOWN` variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Method {
    INVITE,
    ACK,
    OPTIONS,
    BYE,
    CANCEL,
    REGISTER,
    PRACK,     // RFC 3262
    SUBSCRIBE, // RFC 6665
    NOTIFY,    // RFC 6665
    PUBLISH,   // RFC 3903
    INFO,      // RFC 6086
    REFER,     // RFC 3515
    MESSAGE,   // RFC 3428
    UPDATE,    // RFC 3311
    #[strum(default)]
    UNKNOWN(String),
}

impl Method {
    /// Map raw method text to a `Method`, keeping unknown methods as-is
    pub fn from_token(token: &str) -> Method {
        token
            .parse()
            .unwrap_or_else(|_| Method::UNKNOWN(token.to_string()))
    }
}
