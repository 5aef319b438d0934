//! The packet model: header, token, ordered options, and payload, all held
//! as borrowed views into a buffer the caller owns. Parsing never copies
//! and never allocates; the option array has a fixed compile-time
//! capacity ([`MAXOPT`]).

use heapless::Vec as HVec;

use crate::error::Error;
use crate::header::Header;
use crate::option::{parse_option, write_option, CoapOption};

/// Well-known CoAP option numbers referenced by this crate (RFC 7252 §12.2).
pub const OPTION_URI_PATH: u16 = 11;
pub const OPTION_CONTENT_FORMAT: u16 = 12;

/// Maximum number of options a single packet can hold. A packet with more
/// options than this on the wire has its extra options silently truncated;
/// callers that need strictness should inspect `packet.options().len() ==
/// MAXOPT` and independently re-validate the buffer tail.
pub const MAXOPT: usize = 16;

/// The IANA Content-Format registry values relevant to the option carried
/// in the Content-Format option (number 12). Used to tag an [`Endpoint`]
/// in the link-format descriptor and to stage the two-byte value
/// [`crate::response::make_response`] writes into its scratch buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentFormat {
    TextPlain,
    ApplicationLinkFormat,
    ApplicationXML,
    ApplicationOctetStream,
    ApplicationEXI,
    ApplicationJSON,
    ApplicationCBOR,
}

impl From<ContentFormat> for usize {
    fn from(format: ContentFormat) -> usize {
        match format {
            ContentFormat::TextPlain => 0,
            ContentFormat::ApplicationLinkFormat => 40,
            ContentFormat::ApplicationXML => 41,
            ContentFormat::ApplicationOctetStream => 42,
            ContentFormat::ApplicationEXI => 47,
            ContentFormat::ApplicationJSON => 50,
            ContentFormat::ApplicationCBOR => 60,
        }
    }
}

impl TryFrom<usize> for ContentFormat {
    type Error = Error;

    fn try_from(number: usize) -> Result<ContentFormat, Error> {
        match number {
            0 => Ok(ContentFormat::TextPlain),
            40 => Ok(ContentFormat::ApplicationLinkFormat),
            41 => Ok(ContentFormat::ApplicationXML),
            42 => Ok(ContentFormat::ApplicationOctetStream),
            47 => Ok(ContentFormat::ApplicationEXI),
            50 => Ok(ContentFormat::ApplicationJSON),
            60 => Ok(ContentFormat::ApplicationCBOR),
            _ => Err(Error::Unsupported),
        }
    }
}

/// A parsed or to-be-built CoAP message: header, token, options, and
/// payload, all borrowed from (or destined for) a single caller-owned
/// buffer.
#[derive(Debug, Clone)]
pub struct Packet<'a> {
    pub header: Header,
    token: &'a [u8],
    pub(crate) options: HVec<CoapOption<'a>, MAXOPT>,
    pub payload: &'a [u8],
}

impl<'a> Default for Packet<'a> {
    fn default() -> Self {
        Packet {
            header: Header::default(),
            token: &[],
            options: HVec::new(),
            payload: &[],
        }
    }
}

impl<'a> Packet<'a> {
    /// Maximum datagram size this crate expects to hand to a transport.
    /// 1280 bytes keeps a packet deliverable over either UDP or TCP;
    /// callers who only ever run over UDP and want more headroom can opt
    /// into the higher ceiling with the `udp` feature. Advisory only —
    /// `parse`/`build` don't enforce it, since the caller's buffer is the
    /// real bound.
    #[cfg(not(feature = "udp"))]
    pub const MAX_SIZE: usize = 1280;

    /// Maximum datagram size with the `udp` feature enabled.
    #[cfg(feature = "udp")]
    pub const MAX_SIZE: usize = 64_000;

    /// Creates an empty packet (default header, no token, no options, no
    /// payload) ready to be filled in before [`Packet::build`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses `buf` into a packet. Every byte offset, length, and the
    /// payload marker are validated against `buf`'s actual length before
    /// being trusted; a malformed message is rejected with a specific
    /// [`Error`] rather than read past its bounds.
    pub fn parse(buf: &'a [u8]) -> Result<Packet<'a>, Error> {
        let header = Header::parse(buf).map_err(|e| {
            coap_debug!("rejecting datagram: {:?}", e);
            e
        })?;

        let tkl = header.get_token_length();
        if tkl > 8 {
            return Err(Error::TokenTooShort);
        }
        let token_end = 4 + tkl as usize;
        if token_end > buf.len() {
            return Err(Error::TokenTooShort);
        }
        let token = &buf[4..token_end];

        let mut cursor = token_end;
        let end = buf.len();
        if cursor > end {
            return Err(Error::OptionOverrunsPacket);
        }

        let mut options: HVec<CoapOption<'a>, MAXOPT> = HVec::new();
        let mut running_delta: u16 = 0;
        while cursor < end && options.len() < MAXOPT && buf[cursor] != 0xFF {
            let (option, used) = parse_option(&buf[cursor..], running_delta)?;
            running_delta = option.number;
            cursor += used;
            // Capacity was just checked above, so this can never fail.
            let _ = options.push(option);
        }

        let payload: &'a [u8] =
            if cursor < end && buf[cursor] == 0xFF && cursor + 1 < end {
                &buf[cursor + 1..]
            } else {
                &buf[cursor..cursor]
            };

        Ok(Packet {
            header,
            token,
            options,
            payload,
        })
    }

    /// Serializes the packet into `buf`, returning the number of bytes
    /// written. Options must already be in ascending-number order (the
    /// sorted invariant); this does not re-sort them.
    pub fn build(&self, buf: &mut [u8]) -> Result<usize, Error> {
        if self.header.get_token_length() as usize != self.token.len() {
            return Err(Error::Unsupported);
        }
        if buf.len() < 4 + self.token.len() {
            return Err(Error::BufferTooSmall);
        }

        self.header.write(&mut buf[0..4])?;
        buf[4..4 + self.token.len()].copy_from_slice(self.token);
        let mut pos = 4 + self.token.len();

        let mut running_delta: u16 = 0;
        for option in self.options.iter() {
            let written = write_option(&mut buf[pos..], option, running_delta)?;
            pos += written;
            running_delta = option.number;
        }

        if !self.payload.is_empty() {
            *buf.get_mut(pos).ok_or(Error::BufferTooSmall)? = 0xFF;
            pos += 1;
            let end = pos + self.payload.len();
            if end > buf.len() {
                return Err(Error::BufferTooSmall);
            }
            buf[pos..end].copy_from_slice(self.payload);
            pos = end;
        }

        Ok(pos)
    }

    /// Sets the token and updates the header's token-length field to
    /// match. Panics if `token.len() > 8`; use [`Packet::parse`] for
    /// untrusted input, which rejects overlength tokens instead.
    pub fn set_token(&mut self, token: &'a [u8]) {
        assert!(token.len() <= 8);
        self.header.set_token_length(token.len() as u8);
        self.token = token;
    }

    /// Returns the token, a byte view of length `header.get_token_length()`.
    #[inline]
    pub fn token(&self) -> &'a [u8] {
        self.token
    }

    /// Appends an option. Caller is responsible for appending in
    /// ascending-number order to preserve the sorted invariant; this never
    /// reorders on insert. Returns [`Error::Unsupported`] if the option
    /// array is already at [`MAXOPT`] capacity.
    pub fn add_option(&mut self, option: CoapOption<'a>) -> Result<(), Error> {
        self.options.push(option).map_err(|_| Error::Unsupported)
    }

    /// Returns every decoded option, in ascending-number order.
    #[inline]
    pub fn options(&self) -> &[CoapOption<'a>] {
        &self.options
    }

    /// Returns the contiguous run of options matching `number`, relying on
    /// the sorted invariant: skip strictly-smaller numbers, capture the
    /// first equal option, continue while equal, stop at the first
    /// strictly-greater number.
    pub fn find_option(&self, number: u16) -> &[CoapOption<'a>] {
        let mut start = None;
        let mut count = 0;
        for (i, opt) in self.options.iter().enumerate() {
            if opt.number == number {
                if start.is_none() {
                    start = Some(i);
                }
                count += 1;
            } else if opt.number > number {
                break;
            } else if start.is_some() {
                break;
            }
        }
        match start {
            Some(i) => &self.options[i..i + count],
            None => &[],
        }
    }
}
