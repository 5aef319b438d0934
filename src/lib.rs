//! A lightweight, `#![no_std]`-capable CoAP (RFC 7252) message codec and
//! request dispatcher, ideal for embedded environments.
//!
//! ## Overview
//! This crate parses a received datagram into a [`Packet`] and serializes a
//! [`Packet`] back into wire bytes, plus a minimal [`handle_request`]
//! dispatch shim that binds parsed URI paths to handlers. Every byte view
//! — token, option values, payload — borrows from the caller's buffer; there
//! is no allocation during parse or build.
//!
//! ## Usage
//! ```rust
//! use coap_core::{CoapOption, MessageClass, Packet, RequestType};
//!
//! let mut request = Packet::new();
//! request.header.message_id = 1;
//! request.header.code = MessageClass::Request(RequestType::Get);
//! request.add_option(CoapOption { number: 11, value: b"sensors" }).unwrap();
//!
//! let mut buf = [0u8; 32];
//! let written = request.build(&mut buf).unwrap();
//!
//! let parsed = Packet::parse(&buf[..written]).unwrap();
//! assert_eq!(parsed.header.message_id, 1);
//! assert_eq!(parsed.find_option(11)[0].value, b"sensors");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod log;

#[cfg_attr(tarpaulin, skip)]
pub mod error;

mod dispatch;
mod header;
mod option;
mod packet;
mod response;

pub use dispatch::{build_endpoints, handle_request, Endpoint, Handler};
pub use error::Error;
pub use header::{
    Header, MessageClass, MessageType, RequestType, ResponseType,
};
pub use option::CoapOption;
pub use packet::{
    ContentFormat, Packet, MAXOPT, OPTION_CONTENT_FORMAT, OPTION_URI_PATH,
};
pub use response::make_response;
