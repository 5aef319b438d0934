//! Binds parsed URI paths to handlers, and emits an RFC 6690 CoRE Link
//! Format descriptor for an endpoint table.
//!
//! There is no session or connection state here: given a request packet and
//! a static endpoint table, find the matching endpoint (or synthesize
//! `4.04 Not Found`) and invoke its handler.

use crate::error::Error;
use crate::header::RequestType;
use crate::option::CoapOption;
use crate::packet::{Packet, OPTION_URI_PATH};
use crate::response::make_response;
use crate::{header::ResponseType, packet::ContentFormat};

/// A handler receives a scratch buffer to stage any synthesized response
/// bytes in, the request, the response to fill in, and the request's
/// message id. Its `Result` is how a handler's outcome propagates back to
/// the caller of [`handle_request`].
pub type Handler =
    fn(&mut [u8], &Packet, &mut Packet, u16) -> Result<(), Error>;

/// A single routable resource: the method and path it answers to, the
/// content-format it's advertised under in the link-format descriptor
/// (`None` means "unadvertised" and causes [`build_endpoints`] to skip the
/// entry), and the handler to invoke on a match.
pub struct Endpoint {
    pub method: RequestType,
    pub path: &'static [&'static str],
    pub content_format: Option<ContentFormat>,
    pub handler: Handler,
}

/// Matches `request` against `endpoints` in order and invokes the first
/// matching handler. If none matches — including when the request carries
/// no `URI-Path` options at all and no endpoint with an empty path is
/// registered — synthesizes a `4.04 Not Found` acknowledgement that echoes
/// the request's token and message id, with no payload.
///
/// A request with zero `URI-Path` options is treated as a request for the
/// root path: it can match an [`Endpoint`] whose `path` is `&[]`.
pub fn handle_request<'a>(
    endpoints: &[Endpoint],
    scratch: &'a mut [u8],
    request: &Packet<'a>,
    response: &mut Packet<'a>,
) -> Result<(), Error> {
    let path_options = request.find_option(OPTION_URI_PATH);

    for endpoint in endpoints {
        if request.header.code
            != crate::header::MessageClass::Request(endpoint.method)
        {
            continue;
        }
        if path_options.len() != endpoint.path.len() {
            continue;
        }
        let matches = path_options
            .iter()
            .zip(endpoint.path.iter())
            .all(|(opt, seg)| opt.value == seg.as_bytes());
        if matches {
            return (endpoint.handler)(
                scratch,
                request,
                response,
                request.header.message_id,
            );
        }
    }

    coap_info!("no endpoint matched request {}", request.header.message_id);
    make_response(
        scratch,
        response,
        &[],
        request.header.message_id,
        request.token(),
        ResponseType::NotFound,
        None,
    )
}

/// A bounded cursor over a caller-provided byte buffer: every write
/// explicitly checks remaining capacity rather than relying on
/// length-accounting arithmetic scattered through the caller.
struct Cursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            return Err(Error::BufferTooSmall);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    fn write_decimal(&mut self, mut value: u16) -> Result<(), Error> {
        let mut digits = [0u8; 5];
        let mut n = 0;
        loop {
            digits[n] = b'0' + (value % 10) as u8;
            n += 1;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        for i in (0..n).rev() {
            self.write(&[digits[i]])?;
        }
        Ok(())
    }
}

/// Walks `endpoints` and writes a comma-separated RFC 6690 CoRE Link Format
/// descriptor of the form `</seg1/seg2>;ct=N,...` into `out`, skipping any
/// endpoint whose `content_format` is `None`. Returns the number of bytes
/// written (not including a terminating NUL, which is still appended if
/// there is room).
pub fn build_endpoints(
    endpoints: &[Endpoint],
    out: &mut [u8],
) -> Result<usize, Error> {
    let mut cursor = Cursor::new(out);
    let mut first = true;

    for endpoint in endpoints {
        let Some(content_format) = endpoint.content_format else {
            continue;
        };

        if !first {
            cursor.write(b",")?;
        }
        first = false;

        cursor.write(b"<")?;
        for segment in endpoint.path {
            cursor.write(b"/")?;
            cursor.write(segment.as_bytes())?;
        }
        cursor.write(b">;ct=")?;
        cursor.write_decimal(usize::from(content_format) as u16)?;
    }

    let len = cursor.pos;
    cursor.write(&[0])?;
    Ok(len)
}
