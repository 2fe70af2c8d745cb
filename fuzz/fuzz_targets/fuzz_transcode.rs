#![no_main]
//! Drives the decoder with arbitrary bytes and arbitrary chunking, then
//! re-encodes what replace-mode decoding produced. Checks:
//! - no panics on any input;
//! - chunked streaming decode equals whole-buffer decode (chunk boundaries
//!   must be invisible);
//! - replace-mode output always re-encodes cleanly (replacement never
//!   introduces a defect).

use arbitrary::Arbitrary;
use cesutf::{
    ByteSource, DecodeOptions, Decoder, EncodeOptions, ErrorPolicy, Format, Outcome, UnitSink,
    batch,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    cesu: bool,
    chunk: u8,
    data: Vec<u8>,
}

fn chunked_decode(format: Format, bytes: &[u8], chunk: usize) -> Vec<u16> {
    let decoder = Decoder::new(format);
    let options = DecodeOptions {
        policy: ErrorPolicy::Replace,
        ..DecodeOptions::default()
    };
    let mut pending: Vec<u8> = Vec::new();
    let mut out: Vec<u16> = Vec::new();
    let mut feed = |pending: &mut Vec<u8>, last: bool| {
        let mut unit_buf = [0u16; 2];
        let mut src = ByteSource::new(pending);
        loop {
            let mut dst = UnitSink::new(&mut unit_buf);
            let outcome = decoder.decode(&mut src, &mut dst);
            out.extend_from_slice(dst.produced());
            match outcome {
                Outcome::Underflow => break,
                Outcome::Overflow => {}
                Outcome::Malformed(n) => {
                    out.push(options.replacement);
                    src.advance(n);
                }
                Outcome::Unmappable(_) => unreachable!("decoder reported unmappable"),
            }
        }
        let consumed = src.position();
        if last && consumed < pending.len() {
            // Complete input: the leftover valid-so-far prefix is one
            // malformed run, same as the batch layer's flush.
            out.push(options.replacement);
            pending.clear();
        } else {
            pending.drain(..consumed);
        }
    };
    for piece in bytes.chunks(chunk) {
        pending.extend_from_slice(piece);
        feed(&mut pending, false);
    }
    feed(&mut pending, true);
    out
}

fuzz_target!(|input: Input| {
    let format = if input.cesu {
        Format::Cesu8
    } else {
        Format::Utf8
    };
    let replace = DecodeOptions {
        policy: ErrorPolicy::Replace,
        ..DecodeOptions::default()
    };

    let whole = batch::decode_to_vec(format, &input.data, &replace).unwrap();

    let chunk = 1 + usize::from(input.chunk % 9);
    let streamed = chunked_decode(format, &input.data, chunk);
    assert_eq!(streamed, whole, "chunk boundaries changed the output");

    // Report mode must agree with replace mode up to the first defect and
    // must never panic.
    let _ = batch::decode_to_vec(format, &input.data, &DecodeOptions::default());

    // Replace-mode decode output contains no unpaired surrogates in UTF-8
    // (U+FFFD substitution), so re-encoding it must succeed there; CESU-8
    // decoding can surface lone halves, which encode reports as defects.
    let encode = EncodeOptions {
        policy: ErrorPolicy::Replace,
        ..EncodeOptions::default()
    };
    let _ = batch::encode_to_vec(format, &whole, &encode).unwrap();
});
