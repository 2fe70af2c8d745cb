//! Error type for the batch entry points.
//!
//! Streaming use never sees this: there, the [`Outcome`](crate::Outcome)
//! is the error channel. The batch layer folds a reported defect, together
//! with where it sat in the input, into one propagated value.

use thiserror::Error;

/// Why a batch conversion failed.
///
/// `at` is the offset of the defective run in the *input* slice (bytes for
/// decoding, code units for encoding); `len` is its minimal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TranscodeError {
    /// The input contains an invalid sequence at `at`.
    #[error("malformed input of length {len} at offset {at}")]
    Malformed {
        /// Offset of the run in the input.
        at: usize,
        /// Minimal length of the run.
        len: usize,
    },
    /// The input contains a structurally valid but unrepresentable
    /// sequence at `at` (an unpaired surrogate).
    #[error("unmappable input of length {len} at offset {at}")]
    Unmappable {
        /// Offset of the run in the input.
        at: usize,
        /// Minimal length of the run.
        len: usize,
    },
    /// The destination filled up before the input was fully converted.
    #[error("destination full after {written} output units")]
    DestinationFull {
        /// Output units successfully written before the destination filled.
        written: usize,
    },
}
