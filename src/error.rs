//! The errors of the `coap-core` module.

use core::fmt;
#[cfg(feature = "std")]
use std::error;

/// The errors that can occur when parsing or building a packet, or when
/// dispatching a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Fewer than 4 bytes were provided for the fixed header.
    HeaderTooShort,
    /// The header's version field was not 1.
    VersionNot1,
    /// The declared token length exceeds the remaining buffer, or exceeds 8.
    TokenTooShort,
    /// Not enough bytes remained for an option header plus its extensions.
    OptionTooShortForHeader,
    /// An option's delta nibble was 15 outside of the payload marker position.
    OptionDeltaInvalid,
    /// An option's length nibble was 15.
    OptionLenInvalid,
    /// An option's declared value length extends past the buffer.
    OptionTooBig,
    /// The cursor was already past the end of the buffer before the option
    /// loop began (e.g. a token length that left no room for the options
    /// the header's token length implied).
    OptionOverrunsPacket,
    /// The output buffer is too small to hold the bytes being written.
    BufferTooSmall,
    /// An internal inconsistency was detected (e.g. a token length on build
    /// that disagrees with the length of the token bytes actually provided).
    Unsupported,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::HeaderTooShort => write!(f, "CoAP error: header too short"),
            Error::VersionNot1 => write!(f, "CoAP error: version is not 1"),
            Error::TokenTooShort => write!(f, "CoAP error: token too short"),
            Error::OptionTooShortForHeader => {
                write!(f, "CoAP error: option too short for header")
            }
            Error::OptionDeltaInvalid => {
                write!(f, "CoAP error: invalid option delta")
            }
            Error::OptionLenInvalid => {
                write!(f, "CoAP error: invalid option length")
            }
            Error::OptionTooBig => write!(f, "CoAP error: option too big"),
            Error::OptionOverrunsPacket => {
                write!(f, "CoAP error: option overruns packet")
            }
            Error::BufferTooSmall => write!(f, "CoAP error: buffer too small"),
            Error::Unsupported => write!(f, "CoAP error: unsupported"),
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for Error {}
