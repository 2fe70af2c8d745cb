//! Byte sequence → code unit decoder for UTF-8 and CESU-8.
//!
//! Overview
//! - The decoder keeps no state between calls beyond the cursor positions:
//!   the lead byte's bit pattern alone selects the sequence branch, so a
//!   conversion interrupted by [`Outcome::Underflow`] or
//!   [`Outcome::Overflow`] resumes from the cursors with no carried bytes.
//! - Every look at the input goes through `lookahead`; positions advance
//!   only once a whole sequence has been validated and its output written.
//!   That makes "no partial emission" and "no re-consumption" structural
//!   rather than something each branch has to re-establish.
//!
//! Malformed reporting
//! - Skip lengths are minimal: the report covers exactly the prefix that
//!   proves the sequence invalid, so a caller substituting a replacement
//!   resynchronizes at the earliest byte that could start a fresh sequence.
//!   A non-continuation follower is deliberately *not* included in the skip;
//!   it is re-examined as a lead byte on the next call.
//! - Near end of input the decoder still inspects every byte it has: a
//!   violation in the available prefix is reported immediately instead of
//!   waiting for bytes that could never repair it. Only a still-valid prefix
//!   yields `Underflow`.

use crate::{
    cursor::{ByteSource, UnitSink},
    format::Format,
    outcome::Outcome,
    surrogate,
};

#[inline]
fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Streaming byte → code unit engine for one [`Format`].
///
/// Call [`decode`](Self::decode) in a loop, refilling the source on
/// [`Outcome::Underflow`] and draining the destination on
/// [`Outcome::Overflow`]. The engine holds no interior state, so one
/// instance can serve many independent conversions (one at a time; the
/// cursors are `&mut` and the engine is not a synchronization point).
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    format: Format,
}

impl Decoder {
    /// An engine speaking `format`.
    #[must_use]
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    /// The wire grammar this engine decodes.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// Decodes from `src` into `dst` until one side runs out or the input
    /// proves defective.
    ///
    /// On `Malformed(n)` the source position is at the start of the invalid
    /// run of `n` bytes; nothing from that run has been consumed or
    /// emitted. On `Underflow`/`Overflow` the cursors reflect the largest
    /// consistent prefix processed.
    pub fn decode(&self, src: &mut ByteSource<'_>, dst: &mut UnitSink<'_>) -> Outcome {
        ascii_prefix(src, dst);
        loop {
            let Some(b1) = src.lookahead(0) else {
                return Outcome::Underflow;
            };
            let stop = if b1 < 0x80 {
                if !dst.put(u16::from(b1)) {
                    return Outcome::Overflow;
                }
                src.advance(1);
                None
            } else if b1 & 0xE0 == 0xC0 {
                two_byte(b1, src, dst)
            } else if b1 & 0xF0 == 0xE0 {
                self.three_byte(b1, src, dst)
            } else if b1 & 0xF8 == 0xF0 && self.format == Format::Utf8 {
                four_byte(b1, src, dst)
            } else {
                // Stray continuation bytes, 0xF8..=0xFF, and (in CESU-8)
                // any 4-byte lead.
                Some(Outcome::Malformed(1))
            };
            if let Some(outcome) = stop {
                return outcome;
            }
        }
    }

    fn three_byte(
        &self,
        b1: u8,
        src: &mut ByteSource<'_>,
        dst: &mut UnitSink<'_>,
    ) -> Option<Outcome> {
        let Some(b2) = src.lookahead(1) else {
            return Some(Outcome::Underflow);
        };
        // An 0xE0 lead with a 100xxxxx continuation would encode a value
        // below 0x800 redundantly; the lead alone proves the defect.
        if (b1 == 0xE0 && b2 & 0xE0 == 0x80) || !is_continuation(b2) {
            return Some(Outcome::Malformed(1));
        }
        let Some(b3) = src.lookahead(2) else {
            return Some(Outcome::Underflow);
        };
        if !is_continuation(b3) {
            return Some(Outcome::Malformed(2));
        }
        let unit =
            (u16::from(b1 & 0x0F) << 12) | (u16::from(b2 & 0x3F) << 6) | u16::from(b3 & 0x3F);
        // UTF-8 forbids literal surrogates; CESU-8 is built out of them,
        // each 3-byte group mapping to one unit with no recombination.
        if self.format == Format::Utf8 && surrogate::is_surrogate(unit) {
            return Some(Outcome::Malformed(3));
        }
        if !dst.put(unit) {
            return Some(Outcome::Overflow);
        }
        src.advance(3);
        None
    }
}

fn two_byte(b1: u8, src: &mut ByteSource<'_>, dst: &mut UnitSink<'_>) -> Option<Outcome> {
    // 0xC0/0xC1 can only encode values below 0x80: overlong.
    if b1 < 0xC2 {
        return Some(Outcome::Malformed(1));
    }
    let Some(b2) = src.lookahead(1) else {
        return Some(Outcome::Underflow);
    };
    if !is_continuation(b2) {
        return Some(Outcome::Malformed(1));
    }
    let unit = (u16::from(b1 & 0x1F) << 6) | u16::from(b2 & 0x3F);
    if !dst.put(unit) {
        return Some(Outcome::Overflow);
    }
    src.advance(2);
    None
}

fn four_byte(b1: u8, src: &mut ByteSource<'_>, dst: &mut UnitSink<'_>) -> Option<Outcome> {
    if b1 > 0xF4 {
        return Some(Outcome::Malformed(1));
    }
    let Some(b2) = src.lookahead(1) else {
        return Some(Outcome::Underflow);
    };
    // The second byte bounds the scalar: under 0xF0 it must lift the value
    // to 0x10000 or more, under 0xF4 it must keep it within U+10FFFF.
    if (b1 == 0xF0 && !(0x90..=0xBF).contains(&b2))
        || (b1 == 0xF4 && b2 & 0xF0 != 0x80)
        || !is_continuation(b2)
    {
        return Some(Outcome::Malformed(1));
    }
    let Some(b3) = src.lookahead(2) else {
        return Some(Outcome::Underflow);
    };
    if !is_continuation(b3) {
        return Some(Outcome::Malformed(2));
    }
    let Some(b4) = src.lookahead(3) else {
        return Some(Outcome::Underflow);
    };
    if !is_continuation(b4) {
        return Some(Outcome::Malformed(3));
    }
    let scalar = (u32::from(b1 & 0x07) << 18)
        | (u32::from(b2 & 0x3F) << 12)
        | (u32::from(b3 & 0x3F) << 6)
        | u32::from(b4 & 0x3F);
    debug_assert!(
        (surrogate::MIN_SUPPLEMENTARY..=surrogate::MAX_CODE_POINT).contains(&scalar),
        "second-byte range checks bound 4-byte scalars to the supplementary planes"
    );
    let (high, low) = surrogate::decompose(scalar);
    // Two output slots or none: a half-written pair must never be seen.
    if !dst.put_pair(high, low) {
        return Some(Outcome::Overflow);
    }
    src.advance(4);
    None
}

/// Bulk copy of a leading ASCII run when both cursors permit direct access.
///
/// Purely a fast path over the per-byte loop; the checked path must produce
/// identical output and positions.
fn ascii_prefix(src: &mut ByteSource<'_>, dst: &mut UnitSink<'_>) {
    if !dst.is_direct() {
        return;
    }
    let Some(window) = src.direct_window() else {
        return;
    };
    let run = window
        .iter()
        .take_while(|&&b| b < 0x80)
        .count()
        .min(dst.remaining());
    for &b in &window[..run] {
        let wrote = dst.put(u16::from(b));
        debug_assert!(wrote, "run was clamped to the sink's remaining space");
    }
    src.advance(run);
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Decoder;
    use crate::{
        cursor::{ByteSource, UnitSink},
        format::Format,
        outcome::Outcome,
    };

    fn decode_all(format: Format, bytes: &[u8]) -> (Outcome, alloc::vec::Vec<u16>, usize) {
        let decoder = Decoder::new(format);
        let mut out = alloc::vec![0u16; bytes.len() + 2];
        let mut src = ByteSource::new(bytes);
        let mut dst = UnitSink::new(&mut out);
        let outcome = decoder.decode(&mut src, &mut dst);
        let produced = dst.produced().to_vec();
        (outcome, produced, src.position())
    }

    #[rstest]
    #[case(&[], &[])]
    #[case(b"abc", &[0x61, 0x62, 0x63])]
    #[case(&[0xC2, 0xA9], &[0xA9])] // U+00A9
    #[case(&[0xDF, 0xBF], &[0x7FF])]
    #[case(&[0xE0, 0xA0, 0x80], &[0x800])]
    #[case(&[0xE2, 0x82, 0xAC], &[0x20AC])] // U+20AC
    #[case(&[0xEF, 0xBF, 0xBF], &[0xFFFF])]
    fn valid_sequences_common_to_both_formats(#[case] bytes: &[u8], #[case] units: &[u16]) {
        for format in [Format::Utf8, Format::Cesu8] {
            let (outcome, produced, consumed) = decode_all(format, bytes);
            assert_eq!(outcome, Outcome::Underflow, "{format:?} {bytes:x?}");
            assert_eq!(produced, units);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn utf8_four_byte_emits_a_surrogate_pair() {
        let (outcome, produced, consumed) =
            decode_all(Format::Utf8, &[0xF0, 0x90, 0x80, 0x80, 0x41]);
        assert_eq!(outcome, Outcome::Underflow);
        assert_eq!(produced, &[0xD800, 0xDC00, 0x41]);
        assert_eq!(consumed, 5);
    }

    #[test]
    fn cesu8_decodes_surrogate_triples_independently() {
        // U+10400 in CESU-8: two 3-byte groups, one per half.
        let bytes = [0xED, 0xA0, 0x81, 0xED, 0xB0, 0x80];
        let (outcome, produced, consumed) = decode_all(Format::Cesu8, &bytes);
        assert_eq!(outcome, Outcome::Underflow);
        assert_eq!(produced, &[0xD801, 0xDC00]);
        assert_eq!(consumed, 6);

        // A lone half still decodes; pairing is not the decoder's business.
        let (outcome, produced, _) = decode_all(Format::Cesu8, &[0xED, 0xA0, 0x81]);
        assert_eq!(outcome, Outcome::Underflow);
        assert_eq!(produced, &[0xD801]);
    }

    #[test]
    fn utf8_rejects_surrogate_triples() {
        let (outcome, produced, consumed) = decode_all(Format::Utf8, &[0xED, 0xA0, 0x81]);
        assert_eq!(outcome, Outcome::Malformed(3));
        assert!(produced.is_empty());
        assert_eq!(consumed, 0);
    }

    #[rstest]
    // Overlong 2-byte leads.
    #[case(&[0xC0, 0x80], 1)]
    #[case(&[0xC1, 0xBF], 1)]
    // Valid lead, bad continuation: skip only the lead.
    #[case(&[0xC2, 0x41], 1)]
    // Overlong 3-byte: the E0 special case proves the defect at byte one.
    #[case(&[0xE0, 0x80, 0x80], 1)]
    #[case(&[0xE0, 0x9F, 0xBF], 1)]
    // Bad continuations inside a 3-byte sequence.
    #[case(&[0xE1, 0x41, 0x80], 1)]
    #[case(&[0xE1, 0x80, 0x41], 2)]
    // 4-byte lead out of range.
    #[case(&[0xF5, 0x80, 0x80, 0x80], 1)]
    #[case(&[0xF8, 0x80, 0x80, 0x80], 1)]
    #[case(&[0xFF], 1)]
    // 4-byte second-byte range violations (overlong / above U+10FFFF).
    #[case(&[0xF0, 0x80, 0x80, 0x80], 1)]
    #[case(&[0xF0, 0x8F, 0xBF, 0xBF], 1)]
    #[case(&[0xF4, 0x90, 0x80, 0x80], 1)]
    // Bad continuations inside a 4-byte sequence.
    #[case(&[0xF1, 0x80, 0x41, 0x80], 2)]
    #[case(&[0xF1, 0x80, 0x80, 0x41], 3)]
    // Stray continuation byte.
    #[case(&[0x80], 1)]
    #[case(&[0xBF, 0x41], 1)]
    fn utf8_malformed_skip_lengths(#[case] bytes: &[u8], #[case] skip: usize) {
        let (outcome, produced, consumed) = decode_all(Format::Utf8, bytes);
        assert_eq!(outcome, Outcome::Malformed(skip), "{bytes:x?}");
        assert!(produced.is_empty());
        assert_eq!(consumed, 0, "position must sit at the start of the run");
    }

    #[rstest]
    // Truncated but valid-so-far prefixes wait for more input.
    #[case(&[0xC2], Outcome::Underflow)]
    #[case(&[0xE1], Outcome::Underflow)]
    #[case(&[0xE1, 0x80], Outcome::Underflow)]
    #[case(&[0xF1], Outcome::Underflow)]
    #[case(&[0xF1, 0x80], Outcome::Underflow)]
    #[case(&[0xF1, 0x80, 0x80], Outcome::Underflow)]
    // Truncated prefixes that already violate the grammar do not wait.
    #[case(&[0xE0, 0x80], Outcome::Malformed(1))]
    #[case(&[0xE1, 0x41], Outcome::Malformed(1))]
    #[case(&[0xF5], Outcome::Malformed(1))]
    #[case(&[0xF0, 0x80], Outcome::Malformed(1))]
    #[case(&[0xF1, 0x80, 0x41], Outcome::Malformed(2))]
    fn truncation_vs_malformed_at_end_of_input(#[case] bytes: &[u8], #[case] expected: Outcome) {
        let (outcome, _, consumed) = decode_all(Format::Utf8, bytes);
        assert_eq!(outcome, expected, "{bytes:x?}");
        assert_eq!(consumed, 0);
    }

    #[test]
    fn cesu8_has_no_four_byte_branch() {
        for lead in [0xF0u8, 0xF4, 0xF5] {
            let (outcome, produced, consumed) =
                decode_all(Format::Cesu8, &[lead, 0x90, 0x80, 0x80]);
            assert_eq!(outcome, Outcome::Malformed(1), "lead {lead:#x}");
            assert!(produced.is_empty());
            assert_eq!(consumed, 0);
        }
    }

    #[test]
    fn cesu8_two_byte_skip_is_always_one() {
        // Every way a 2-byte sequence can go wrong: forbidden lead, or a
        // follower that is not a continuation byte. Both leave the follower
        // unconsumed, so the skip is 1 in every case.
        for lead in [0xC0u8, 0xC1] {
            for follow in [0x80u8, 0x41, 0xC2, 0xFF] {
                let (outcome, ..) = decode_all(Format::Cesu8, &[lead, follow]);
                assert_eq!(outcome, Outcome::Malformed(1), "{lead:#x} {follow:#x}");
            }
        }
        for lead in [0xC2u8, 0xDF] {
            for follow in [0x41u8, 0xC2, 0xE0, 0xFF] {
                let (outcome, ..) = decode_all(Format::Cesu8, &[lead, follow]);
                assert_eq!(outcome, Outcome::Malformed(1), "{lead:#x} {follow:#x}");
            }
        }
    }

    #[test]
    fn surrogate_pair_needs_two_free_slots_or_nothing() {
        let decoder = Decoder::new(Format::Utf8);
        let bytes = [0xF0, 0x90, 0x80, 0x80];
        let mut out = [0u16; 1];
        let mut src = ByteSource::new(&bytes);
        let mut dst = UnitSink::new(&mut out);
        assert_eq!(decoder.decode(&mut src, &mut dst), Outcome::Overflow);
        assert_eq!(src.position(), 0, "no bytes consumed on overflow");
        assert_eq!(dst.position(), 0, "no half pair written");
    }

    #[test]
    fn resumes_after_overflow_without_loss() {
        let decoder = Decoder::new(Format::Utf8);
        let bytes = [0x41, 0x42, 0xE2, 0x82, 0xAC];
        let mut out = [0u16; 2];
        let mut src = ByteSource::new(&bytes);
        {
            let mut dst = UnitSink::new(&mut out);
            assert_eq!(decoder.decode(&mut src, &mut dst), Outcome::Overflow);
            assert_eq!(dst.produced(), &[0x41, 0x42]);
        }
        assert_eq!(src.position(), 2);
        let mut dst = UnitSink::new(&mut out);
        assert_eq!(decoder.decode(&mut src, &mut dst), Outcome::Underflow);
        assert_eq!(dst.produced(), &[0x20AC]);
    }

    #[test]
    fn checked_and_direct_paths_agree() {
        let bytes: alloc::vec::Vec<u8> = (0u8..0x80).chain([0xC2, 0xA9, 0xE2, 0x82, 0xAC]).collect();
        let decoder = Decoder::new(Format::Utf8);

        let mut direct_out = alloc::vec![0u16; bytes.len()];
        let mut src = ByteSource::new(&bytes);
        let mut dst = UnitSink::new(&mut direct_out);
        let direct_outcome = decoder.decode(&mut src, &mut dst);
        let direct_pos = (src.position(), dst.position());
        let direct = dst.produced().to_vec();

        let mut checked_out = alloc::vec![0u16; bytes.len()];
        let mut src = ByteSource::checked(&bytes);
        let mut dst = UnitSink::checked(&mut checked_out);
        let checked_outcome = decoder.decode(&mut src, &mut dst);

        assert_eq!(direct_outcome, checked_outcome);
        assert_eq!((src.position(), dst.position()), direct_pos);
        assert_eq!(dst.produced(), direct.as_slice());
    }
}
