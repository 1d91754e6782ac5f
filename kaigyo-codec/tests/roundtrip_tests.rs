//! Encode-then-decode behavior across charsets and delimiter policies

use kaigyo_codec::{
    CodecConfig, DecoderConfig, EncoderConfig, LineDecoder, LineDelimiter, LineEncoder, Newline,
    VecChunkSink, VecChunkSource,
};
use proptest::prelude::*;

fn encode_lines(lines: &[String], charset: &str, newline: Newline) -> Vec<u8> {
    let sink = VecChunkSink::new();
    let config = EncoderConfig {
        charset: charset.to_string(),
        newline,
    };
    let mut encoder = LineEncoder::new(sink, &config).unwrap();
    for line in lines {
        encoder.add_line(line).unwrap();
    }
    encoder.finish().unwrap();
    let sink = encoder.into_inner();
    sink.segments().first().cloned().unwrap_or_default()
}

fn decode_chunks(
    chunks: Vec<Vec<u8>>,
    charset: &str,
    delimiter: Option<LineDelimiter>,
) -> Vec<String> {
    let config = DecoderConfig {
        charset: charset.to_string(),
        line_delimiter: delimiter,
    };
    let mut decoder = LineDecoder::new(VecChunkSource::single_segment(chunks), &config).unwrap();
    assert!(decoder.next_file());
    let mut out = Vec::new();
    while let Some(line) = decoder.poll().unwrap() {
        out.push(line);
    }
    out
}

#[test]
fn test_shift_jis_roundtrip() {
    let lines: Vec<String> = ["日本語", "テキスト", ""].iter().map(|s| s.to_string()).collect();
    let bytes = encode_lines(&lines, "shift_jis", Newline::Lf);
    assert_eq!(decode_chunks(vec![bytes], "shift_jis", None), lines);
}

#[test]
fn test_config_views_roundtrip() {
    // The two halves of one configuration document agree on the wire form.
    let config = CodecConfig::builder()
        .newline(Newline::Lf)
        .line_delimiter(LineDelimiter::Lf)
        .build()
        .unwrap();

    let sink = VecChunkSink::new();
    let mut encoder = LineEncoder::new(sink, &config.encoder()).unwrap();
    encoder.add_line("alpha").unwrap();
    encoder.add_line("beta").unwrap();
    encoder.finish().unwrap();
    let bytes = encoder.into_inner().segments()[0].clone();

    let mut decoder = LineDecoder::new(
        VecChunkSource::single_segment(vec![bytes]),
        &config.decoder(),
    )
    .unwrap();
    assert!(decoder.next_file());
    let lines: Vec<String> = decoder.map(Result::unwrap).collect();
    // Matching-policy recognition keeps the empty line after the final
    // terminator.
    assert_eq!(lines, vec!["alpha", "beta", ""]);
}

// Line content that cannot collide with terminators or the byte-order
// mark.
fn arb_lines() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zA-Z0-9 .,ぁ-ん日本語]{0,16}", 0..8)
}

proptest! {
    #[test]
    fn prop_generic_recognition_recovers_lines(lines in arb_lines()) {
        for newline in [Newline::Crlf, Newline::Lf, Newline::Cr] {
            let bytes = encode_lines(&lines, "utf-8", newline);
            let decoded = decode_chunks(vec![bytes], "utf-8", None);
            prop_assert_eq!(&decoded, &lines);
        }
    }

    #[test]
    fn prop_matching_policy_keeps_trailing_empty_line(lines in arb_lines()) {
        for newline in [Newline::Crlf, Newline::Lf, Newline::Cr] {
            let bytes = encode_lines(&lines, "utf-8", newline);
            let decoded = decode_chunks(
                vec![bytes],
                "utf-8",
                Some(newline.as_line_delimiter()),
            );
            let mut expected = lines.clone();
            if !expected.is_empty() {
                expected.push(String::new());
            }
            prop_assert_eq!(&decoded, &expected);
        }
    }

    #[test]
    fn prop_chunk_boundaries_do_not_change_lines(lines in arb_lines()) {
        // Feeding one byte per chunk splits every multi-byte character and
        // every CRLF pair across a chunk boundary.
        let bytes = encode_lines(&lines, "utf-8", Newline::Crlf);
        let whole = decode_chunks(vec![bytes.clone()], "utf-8", None);
        let split = decode_chunks(
            bytes.iter().map(|b| vec![*b]).collect(),
            "utf-8",
            None,
        );
        prop_assert_eq!(&split, &whole);
    }
}
