//! sipwire - zero-copy SIP message parsing and building
//!
//! This library turns a raw datagram buffer into a structured request or
//! response view without copying the payload, and turns structured fields
//! back into a canonical wire buffer. Header text, first-line fields and
//! parameters are all borrowed views into the original buffer; enumeration
//! of headers, value lists and parameter tails is lazy and allocation free.
//!
//! The crate is purely syntax level: no transactions, no dialogs, no
//! timers, no I/O. Every operation is synchronous and bounded by input
//! length, so independent buffers can be parsed concurrently without any
//! synchronization.

pub mod chars;

mod builder;
mod cseq;
mod error;
mod headers;
mod message;
mod name_addr;
mod params;
mod types;
mod values;
mod via;

pub use builder::MessageBuilder;
pub use cseq::CSeqHeader;
pub use error::{SipError, SipResult};
pub use headers::{Header, HeaderIter, Headers};
pub use message::{split_headers, Request, Response, VERSION};
pub use name_addr::NameAddressHeader;
pub use params::{Parameter, ParameterIter, Parameters};
pub use types::Method;
pub use values::{HeaderValueIter, HeaderValues};
pub use via::ViaHeader;
