//! Array-in/array-out convenience layer over the streaming engines.
//!
//! These are the entry points string-construction code uses: the whole
//! input is present, so a trailing truncated sequence is a defect rather
//! than an underflow, and the caller picks per call whether defects stop
//! the conversion ([`ErrorPolicy::Report`]) or are substituted and skipped
//! ([`ErrorPolicy::Replace`]). Either way a defective sequence is never
//! partially written.

use alloc::vec::Vec;

use crate::{
    cursor::{ByteSink, ByteSource, UnitSink, UnitSource},
    decoder::Decoder,
    encoder::Encoder,
    error::TranscodeError,
    format::Format,
    options::{DecodeOptions, EncodeOptions, ErrorPolicy},
    outcome::Outcome,
};

/// Decodes `bytes` into `dst`, returning the number of code units written.
///
/// # Errors
///
/// Under [`ErrorPolicy::Report`], the first malformed run stops the call
/// with [`TranscodeError::Malformed`]. Either policy reports
/// [`TranscodeError::DestinationFull`] if `dst` runs out of room.
pub fn decode_to_units(
    format: Format,
    bytes: &[u8],
    dst: &mut [u16],
    options: &DecodeOptions,
) -> Result<usize, TranscodeError> {
    let decoder = Decoder::new(format);
    let mut src = ByteSource::new(bytes);
    let mut sink = UnitSink::new(dst);
    loop {
        match decoder.decode(&mut src, &mut sink) {
            Outcome::Underflow => {
                let left = src.remaining();
                if left == 0 {
                    return Ok(sink.position());
                }
                // The input is complete, so a valid-so-far trailing prefix
                // can never be finished: it is one malformed run.
                match options.policy {
                    ErrorPolicy::Report => {
                        return Err(TranscodeError::Malformed {
                            at: src.position(),
                            len: left,
                        });
                    }
                    ErrorPolicy::Replace => {
                        if !sink.put(options.replacement) {
                            return Err(TranscodeError::DestinationFull {
                                written: sink.position(),
                            });
                        }
                        return Ok(sink.position());
                    }
                }
            }
            Outcome::Overflow => {
                return Err(TranscodeError::DestinationFull {
                    written: sink.position(),
                });
            }
            Outcome::Malformed(len) => match options.policy {
                ErrorPolicy::Report => {
                    return Err(TranscodeError::Malformed {
                        at: src.position(),
                        len,
                    });
                }
                ErrorPolicy::Replace => {
                    if !sink.put(options.replacement) {
                        return Err(TranscodeError::DestinationFull {
                            written: sink.position(),
                        });
                    }
                    src.advance(len);
                }
            },
            Outcome::Unmappable(_) => {
                unreachable!("byte-to-unit decoding has no unmappable sequences")
            }
        }
    }
}

/// Encodes `units` into `dst`, returning the number of bytes written.
///
/// # Errors
///
/// Under [`ErrorPolicy::Report`], the first unpaired surrogate stops the
/// call with [`TranscodeError::Unmappable`]. Either policy reports
/// [`TranscodeError::DestinationFull`] if `dst` runs out of room.
pub fn encode_from_units(
    format: Format,
    units: &[u16],
    dst: &mut [u8],
    options: &EncodeOptions,
) -> Result<usize, TranscodeError> {
    let encoder = Encoder::new(format);
    let mut src = UnitSource::new(units);
    let mut sink = ByteSink::new(dst);
    loop {
        match encoder.encode(&mut src, &mut sink) {
            Outcome::Underflow => {
                debug_assert!(
                    src.remaining() == 0,
                    "every unit class is decidable without more input"
                );
                return Ok(sink.position());
            }
            Outcome::Overflow => {
                return Err(TranscodeError::DestinationFull {
                    written: sink.position(),
                });
            }
            Outcome::Unmappable(len) => match options.policy {
                ErrorPolicy::Report => {
                    return Err(TranscodeError::Unmappable {
                        at: src.position(),
                        len,
                    });
                }
                ErrorPolicy::Replace => {
                    // The replacement travels through a scratch cursor
                    // built only on this recovery path.
                    let mut scratch = ByteSource::new(options.replacement.as_bytes());
                    while let Some(b) = scratch.get() {
                        if !sink.put(b) {
                            return Err(TranscodeError::DestinationFull {
                                written: sink.position(),
                            });
                        }
                    }
                    src.advance(len);
                }
            },
            Outcome::Malformed(_) => {
                unreachable!("the encoder reports surrogate defects as unmappable")
            }
        }
    }
}

/// Decodes `bytes` into a freshly sized vector of code units.
///
/// # Errors
///
/// Propagates [`decode_to_units`] failures; the vector is sized so that
/// `DestinationFull` cannot occur.
pub fn decode_to_vec(
    format: Format,
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<Vec<u16>, TranscodeError> {
    // Every source byte yields at most one output unit (a 4-byte sequence
    // yields two units, and a replaced run of n >= 1 bytes yields one).
    let mut out = alloc::vec![0u16; bytes.len()];
    let written = decode_to_units(format, bytes, &mut out, options)?;
    out.truncate(written);
    Ok(out)
}

/// Encodes `units` into a freshly sized byte vector.
///
/// # Errors
///
/// Propagates [`encode_from_units`] failures; the vector is sized so that
/// `DestinationFull` cannot occur.
pub fn encode_to_vec(
    format: Format,
    units: &[u16],
    options: &EncodeOptions,
) -> Result<Vec<u8>, TranscodeError> {
    // At most 3 bytes per unit in either format (a pair is 4 or 6 bytes
    // for its 2 units), unless the replacement is longer than that.
    let per_unit = options.replacement.as_bytes().len().max(3);
    let mut out = alloc::vec![0u8; units.len() * per_unit];
    let written = encode_from_units(format, units, &mut out, options)?;
    out.truncate(written);
    Ok(out)
}
