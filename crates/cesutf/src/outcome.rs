//! Result tag for a single engine call.
//!
//! `Underflow` and `Overflow` are flow control, not errors: they tell a
//! streaming caller to refill the source or drain the destination and call
//! again. `Malformed`/`Unmappable` carry the minimal number of input units
//! the caller must skip (or substitute) before retrying.

use core::fmt;

/// Why a conversion step stopped.
///
/// Skip lengths count *input* units: bytes for decoding, 16-bit code units
/// for encoding. They are always at least 1 and never exceed the number of
/// units remaining in the source at the time of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The source has fewer units than needed to decide the next output,
    /// and the available prefix is still valid so far. Append more input
    /// and call again; consumed units are never re-consumed.
    Underflow,
    /// The destination lacks room for the next fully decided output. No
    /// partial multi-unit output is ever written, so retrying after a
    /// drain is always safe.
    Overflow,
    /// The next `n` input units form an invalid sequence. `n` is the
    /// minimal prefix that proves invalidity, not the full attempted
    /// sequence length.
    Malformed(usize),
    /// The next `n` input units are structurally valid but have no
    /// representation in the target form (an unpaired surrogate on the
    /// encode side).
    Unmappable(usize),
}

impl Outcome {
    /// True for the two genuine input-defect variants.
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, Outcome::Malformed(_) | Outcome::Unmappable(_))
    }

    /// The skip length of a defect report, if this is one.
    #[must_use]
    pub fn length(self) -> Option<usize> {
        match self {
            Outcome::Malformed(n) | Outcome::Unmappable(n) => Some(n),
            Outcome::Underflow | Outcome::Overflow => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Underflow => f.write_str("underflow"),
            Outcome::Overflow => f.write_str("overflow"),
            Outcome::Malformed(n) => write!(f, "malformed[{n}]"),
            Outcome::Unmappable(n) => write!(f, "unmappable[{n}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;

    #[test]
    fn flow_control_is_not_an_error() {
        assert!(!Outcome::Underflow.is_error());
        assert!(!Outcome::Overflow.is_error());
        assert!(Outcome::Malformed(1).is_error());
        assert!(Outcome::Unmappable(1).is_error());
    }

    #[test]
    fn length_is_present_only_for_defects() {
        assert_eq!(Outcome::Underflow.length(), None);
        assert_eq!(Outcome::Overflow.length(), None);
        assert_eq!(Outcome::Malformed(3).length(), Some(3));
        assert_eq!(Outcome::Unmappable(1).length(), Some(1));
    }
}
