//! Surrogate pair composition and decomposition.
//!
//! A supplementary code point (>= U+10000) is stored in code-unit form as a
//! high surrogate (0xD800..=0xDBFF) followed by a low surrogate
//! (0xDC00..=0xDFFF). This module owns that mapping and the encoder's
//! look-ahead check for unpaired or mis-ordered halves.

use crate::{cursor::UnitSource, outcome::Outcome};

/// First unit of the high (leading) surrogate range.
pub const HIGH_MIN: u16 = 0xD800;
/// Last unit of the high surrogate range.
pub const HIGH_MAX: u16 = 0xDBFF;
/// First unit of the low (trailing) surrogate range.
pub const LOW_MIN: u16 = 0xDC00;
/// Last unit of the low surrogate range.
pub const LOW_MAX: u16 = 0xDFFF;
/// Smallest code point that needs a surrogate pair.
pub const MIN_SUPPLEMENTARY: u32 = 0x1_0000;
/// Largest valid Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// Whether `unit` is a high (leading) surrogate.
#[must_use]
pub fn is_high(unit: u16) -> bool {
    (HIGH_MIN..=HIGH_MAX).contains(&unit)
}

/// Whether `unit` is a low (trailing) surrogate.
#[must_use]
pub fn is_low(unit: u16) -> bool {
    (LOW_MIN..=LOW_MAX).contains(&unit)
}

/// Whether `unit` is either surrogate half.
#[must_use]
pub fn is_surrogate(unit: u16) -> bool {
    (HIGH_MIN..=LOW_MAX).contains(&unit)
}

/// Combines a valid surrogate pair into its 21-bit scalar.
///
/// Callers must pass a high surrogate followed by a low surrogate; the
/// engines establish this before calling.
#[must_use]
pub fn compose(high: u16, low: u16) -> u32 {
    debug_assert!(is_high(high) && is_low(low), "compose on a non-pair");
    MIN_SUPPLEMENTARY + (u32::from(high - HIGH_MIN) << 10) + u32::from(low - LOW_MIN)
}

/// Splits a supplementary scalar into its surrogate pair.
#[must_use]
pub fn decompose(scalar: u32) -> (u16, u16) {
    debug_assert!(
        (MIN_SUPPLEMENTARY..=MAX_CODE_POINT).contains(&scalar),
        "decompose on a non-supplementary scalar"
    );
    let bits = scalar - MIN_SUPPLEMENTARY;
    // bits fits in 20; each half below is at most 10 bits wide.
    let high = HIGH_MIN + ((bits >> 10) as u16);
    let low = LOW_MIN + ((bits & 0x3FF) as u16);
    (high, low)
}

/// Look-ahead used by the encoder when it meets a surrogate unit.
///
/// `unit` is the unit at the source's current position; the candidate low
/// half is inspected at `lookahead(1)` without consuming anything, so a
/// failed parse leaves the source cursor before the offending unit. A lone
/// low surrogate, a high surrogate with an invalid follower, and a high
/// surrogate with no follower at all are each reported as
/// [`Outcome::Unmappable`] with skip length 1.
///
/// # Errors
///
/// Returns the `Unmappable(1)` outcome the engine should surface when the
/// pair does not parse.
pub fn parse(unit: u16, src: &UnitSource<'_>) -> Result<u32, Outcome> {
    if is_high(unit) {
        match src.lookahead(1) {
            Some(low) if is_low(low) => Ok(compose(unit, low)),
            _ => Err(Outcome::Unmappable(1)),
        }
    } else {
        debug_assert!(is_low(unit), "parse on a non-surrogate unit");
        Err(Outcome::Unmappable(1))
    }
}

#[cfg(test)]
mod tests {
    use super::{compose, decompose, is_high, is_low, is_surrogate, parse};
    use crate::{cursor::UnitSource, outcome::Outcome};

    #[test]
    fn range_predicates() {
        assert!(is_high(0xD800) && is_high(0xDBFF));
        assert!(!is_high(0xDC00));
        assert!(is_low(0xDC00) && is_low(0xDFFF));
        assert!(!is_low(0xDBFF));
        assert!(is_surrogate(0xD800) && is_surrogate(0xDFFF));
        assert!(!is_surrogate(0xD7FF) && !is_surrogate(0xE000));
    }

    #[test]
    fn compose_matches_the_reference_formula() {
        assert_eq!(compose(0xD800, 0xDC00), 0x1_0000);
        assert_eq!(compose(0xD801, 0xDC37), 0x1_0437);
        assert_eq!(compose(0xDBFF, 0xDFFF), 0x10_FFFF);
    }

    #[test]
    fn decompose_inverts_compose() {
        for scalar in [0x1_0000u32, 0x1_0437, 0x2_070E, 0x10_FFFF] {
            let (high, low) = decompose(scalar);
            assert_eq!(compose(high, low), scalar);
        }
    }

    #[test]
    fn parse_accepts_a_pair_without_consuming() {
        let units = [0xD801u16, 0xDC37];
        let src = UnitSource::new(&units);
        assert_eq!(parse(0xD801, &src), Ok(0x1_0437));
        assert_eq!(src.position(), 0);
    }

    #[test]
    fn parse_rejects_lone_and_mis_ordered_halves() {
        let lone_high = [0xD800u16];
        assert_eq!(
            parse(0xD800, &UnitSource::new(&lone_high)),
            Err(Outcome::Unmappable(1))
        );

        let high_then_letter = [0xD800u16, 0x0041];
        assert_eq!(
            parse(0xD800, &UnitSource::new(&high_then_letter)),
            Err(Outcome::Unmappable(1))
        );

        let lone_low = [0xDC00u16, 0xD800];
        assert_eq!(
            parse(0xDC00, &UnitSource::new(&lone_low)),
            Err(Outcome::Unmappable(1))
        );
    }
}
