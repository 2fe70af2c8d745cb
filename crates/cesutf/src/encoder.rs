//! Code unit → byte sequence encoder for UTF-8 and CESU-8.
//!
//! The encoder walks the source one unit at a time, with a single unit of
//! look-ahead when it meets a surrogate half. Destination capacity is
//! verified for the whole sequence about to be produced before the first
//! byte is written, and the source position moves only on success, so an
//! [`Outcome::Overflow`] or [`Outcome::Unmappable`] report always leaves
//! both cursors at a clean sequence boundary.

use crate::{
    cursor::{ByteSink, UnitSource},
    format::Format,
    outcome::Outcome,
    surrogate,
};

/// Streaming code unit → byte engine for one [`Format`].
///
/// Stateless between calls, like the decoder: a conversion is resumable
/// from the cursors alone. Note that the surrogate look-ahead requires the
/// pair to be present in one source window; a high surrogate at the end of
/// the source reports [`Outcome::Unmappable`] rather than `Underflow`, so
/// streaming callers must not split a pair across feeds.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    format: Format,
}

impl Encoder {
    /// An engine producing `format`.
    #[must_use]
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    /// The wire grammar this engine produces.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// Encodes from `src` into `dst` until one side runs out or an
    /// unpaired surrogate is found.
    ///
    /// On `Unmappable(n)` the source position is immediately before the
    /// offending run of `n` units and nothing of it has been written. On
    /// `Underflow`/`Overflow` the cursors reflect the largest consistent
    /// prefix processed.
    pub fn encode(&self, src: &mut UnitSource<'_>, dst: &mut ByteSink<'_>) -> Outcome {
        ascii_prefix(src, dst);
        loop {
            let Some(unit) = src.lookahead(0) else {
                return Outcome::Underflow;
            };
            if unit < 0x80 {
                if !dst.put(unit as u8) {
                    return Outcome::Overflow;
                }
                src.advance(1);
            } else if unit < 0x800 {
                if !dst.put2(0xC0 | (unit >> 6) as u8, 0x80 | (unit & 0x3F) as u8) {
                    return Outcome::Overflow;
                }
                src.advance(1);
            } else if surrogate::is_surrogate(unit) {
                let scalar = match surrogate::parse(unit, src) {
                    Ok(scalar) => scalar,
                    Err(outcome) => return outcome,
                };
                if let Some(outcome) = self.put_supplementary(scalar, dst) {
                    return outcome;
                }
                src.advance(2);
            } else {
                if !put3(dst, unit) {
                    return Outcome::Overflow;
                }
                src.advance(1);
            }
        }
    }

    /// Writes one supplementary scalar: a 4-byte sequence in UTF-8, two
    /// independent 3-byte sequences in CESU-8. All or nothing either way.
    fn put_supplementary(&self, scalar: u32, dst: &mut ByteSink<'_>) -> Option<Outcome> {
        match self.format {
            Format::Utf8 => {
                if !dst.put4(
                    0xF0 | (scalar >> 18) as u8,
                    0x80 | ((scalar >> 12) & 0x3F) as u8,
                    0x80 | ((scalar >> 6) & 0x3F) as u8,
                    0x80 | (scalar & 0x3F) as u8,
                ) {
                    return Some(Outcome::Overflow);
                }
            }
            Format::Cesu8 => {
                // Both triples must fit before either is written.
                if dst.remaining() < 6 {
                    return Some(Outcome::Overflow);
                }
                let (high, low) = surrogate::decompose(scalar);
                let wrote = put3(dst, high) && put3(dst, low);
                debug_assert!(wrote, "capacity was checked for both triples");
            }
        }
        None
    }
}

fn put3(dst: &mut ByteSink<'_>, unit: u16) -> bool {
    dst.put3(
        0xE0 | (unit >> 12) as u8,
        0x80 | ((unit >> 6) & 0x3F) as u8,
        0x80 | (unit & 0x3F) as u8,
    )
}

/// Bulk copy of a leading ASCII run when both cursors permit direct access.
fn ascii_prefix(src: &mut UnitSource<'_>, dst: &mut ByteSink<'_>) {
    if !dst.is_direct() {
        return;
    }
    let Some(window) = src.direct_window() else {
        return;
    };
    let run = window
        .iter()
        .take_while(|&&u| u < 0x80)
        .count()
        .min(dst.remaining());
    for &u in &window[..run] {
        let wrote = dst.put(u as u8);
        debug_assert!(wrote, "run was clamped to the sink's remaining space");
    }
    src.advance(run);
}
