//! Response synthesis: filling in a [`Packet`] as an acknowledgement to a
//! request, with an optional Content-Format option.

use crate::{
    error::Error,
    header::{Header, MessageClass, MessageType, ResponseType},
    option::CoapOption,
    packet::{ContentFormat, Packet, OPTION_CONTENT_FORMAT},
};

/// Fills `response` in as an acknowledgement: version 1, type
/// Acknowledgement, `rsp_code`, `msg_id`, and `token` copied from the
/// request. If `content_format` is `Some`, its two-byte registry value is
/// staged into `scratch` and appended as a single Content-Format option
/// (number 12) before `content` is set as the payload.
///
/// Fails with [`Error::BufferTooSmall`] if `scratch` cannot hold the two
/// content-format bytes.
pub fn make_response<'a>(
    scratch: &'a mut [u8],
    response: &mut Packet<'a>,
    content: &'a [u8],
    msg_id: u16,
    token: &'a [u8],
    rsp_code: ResponseType,
    content_format: Option<ContentFormat>,
) -> Result<(), Error> {
    let mut header = Header::new();
    header.set_version(1);
    header.set_type(MessageType::Acknowledgement);
    header.code = MessageClass::Response(rsp_code);
    header.message_id = msg_id;
    response.header = header;
    response.set_token(token);

    if let Some(format) = content_format {
        if scratch.len() < 2 {
            return Err(Error::BufferTooSmall);
        }
        let value = usize::from(format) as u16;
        scratch[0..2].copy_from_slice(&value.to_be_bytes());
        response.add_option(CoapOption {
            number: OPTION_CONTENT_FORMAT,
            value: &scratch[0..2],
        })?;
    }

    response.payload = content;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fills_header_and_echoes_token() {
        let mut scratch = [0u8; 2];
        let mut response = Packet::new();
        make_response(
            &mut scratch,
            &mut response,
            b"hi",
            42,
            &[0xAB, 0xCD],
            ResponseType::Content,
            None,
        )
        .unwrap();

        assert_eq!(response.header.get_version(), 1);
        assert_eq!(response.header.get_type(), MessageType::Acknowledgement);
        assert_eq!(
            response.header.code,
            MessageClass::Response(ResponseType::Content)
        );
        assert_eq!(response.header.message_id, 42);
        assert_eq!(response.token(), &[0xAB, 0xCD]);
        assert_eq!(response.payload, b"hi");
        assert!(response.options.is_empty());
    }

    #[test]
    fn stages_content_format_option() {
        let mut scratch = [0u8; 2];
        let mut response = Packet::new();
        make_response(
            &mut scratch,
            &mut response,
            b"{}",
            1,
            &[],
            ResponseType::Content,
            Some(ContentFormat::ApplicationJSON),
        )
        .unwrap();

        assert_eq!(response.options.len(), 1);
        assert_eq!(response.options[0].number, OPTION_CONTENT_FORMAT);
        assert_eq!(response.options[0].value, &[0x00, 0x32]);
    }

    #[test]
    fn reports_buffer_too_small_for_content_format() {
        let mut scratch = [0u8; 1];
        let mut response = Packet::new();
        let result = make_response(
            &mut scratch,
            &mut response,
            b"",
            1,
            &[],
            ResponseType::Content,
            Some(ContentFormat::TextPlain),
        );
        assert_eq!(result, Err(Error::BufferTooSmall));
    }

    #[test]
    fn not_found_has_no_options_or_payload() {
        let mut scratch = [0u8; 2];
        let mut response = Packet::new();
        make_response(
            &mut scratch,
            &mut response,
            &[],
            7,
            &[],
            ResponseType::NotFound,
            None,
        )
        .unwrap();
        assert_eq!(u8::from(response.header.code), 0x84);
        assert!(response.payload.is_empty());
    }
}
