//! Charset lookup and streaming transcoding via `encoding_rs`
//!
//! Both directions always use the replacing APIs: malformed bytes decode
//! to U+FFFD and unmappable characters encode to numeric character
//! references, so character data never fails a session.

use crate::error::CodecError;
use encoding_rs::{CoderResult, Decoder, Encoder, Encoding};

/// Headroom for replacement output when the transcoder reports a full
/// output buffer despite the worst-case reservation.
const REPLACEMENT_HEADROOM: usize = 64;

/// Resolve a charset label ("utf-8", "shift_jis", ...) to an encoding.
pub fn lookup(label: &str) -> Result<&'static Encoding, CodecError> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| CodecError::UnsupportedCharset {
        label: label.to_string(),
    })
}

/// Decode `bytes` onto the end of `out`, replacing malformed input.
///
/// With `last` set, pending partial sequences held in the decoder state
/// are flushed as replacements.
pub(crate) fn decode_append(decoder: &mut Decoder, bytes: &[u8], out: &mut String, last: bool) {
    let mut consumed = 0;
    loop {
        let remaining = &bytes[consumed..];
        if let Some(needed) = decoder.max_utf8_buffer_length(remaining.len()) {
            out.reserve(needed);
        }
        let (result, read, _had_replacements) = decoder.decode_to_string(remaining, out, last);
        consumed += read;
        match result {
            CoderResult::InputEmpty => return,
            CoderResult::OutputFull => out.reserve(REPLACEMENT_HEADROOM),
        }
    }
}

/// Encode `text` onto the end of `out`, replacing unmappable characters.
///
/// With `last` set, the encoder state is finalized (required by stateful
/// output encodings).
pub(crate) fn encode_append(encoder: &mut Encoder, text: &str, out: &mut Vec<u8>, last: bool) {
    let mut consumed = 0;
    loop {
        let remaining = &text[consumed..];
        if let Some(needed) = encoder.max_buffer_length_from_utf8_if_no_unmappables(remaining.len())
        {
            out.reserve(needed);
        }
        let (result, read, _had_unmappables) = encoder.encode_from_utf8_to_vec(remaining, out, last);
        consumed += read;
        match result {
            CoderResult::InputEmpty => return,
            // Unmappables expand into numeric character references beyond
            // the no-unmappables estimate.
            CoderResult::OutputFull => out.reserve(REPLACEMENT_HEADROOM),
        }
    }
}
