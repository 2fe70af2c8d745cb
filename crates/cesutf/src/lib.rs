//! Streaming transcoding engines between UTF-8 / CESU-8 byte sequences and
//! UTF-16 code units, operating over cursor-bounded buffers.
//!
//! The crate is built around two restartable state machines, a [`Decoder`]
//! (bytes → code units) and an [`Encoder`] (code units → bytes), that read
//! from a source cursor and write to a destination cursor, returning an
//! [`Outcome`] describing why the step stopped. `Underflow`/`Overflow` are
//! flow control for chunked use; `Malformed`/`Unmappable` report input
//! defects with a minimal skip length. The [`batch`] module layers
//! array-in/array-out entry points with a report-or-replace policy on top.
//!
//! ```
//! use cesutf::{ByteSource, Decoder, Format, Outcome, UnitSink};
//!
//! let decoder = Decoder::new(Format::Utf8);
//! let mut units = [0u16; 8];
//! let mut src = ByteSource::new("a€".as_bytes());
//! let mut dst = UnitSink::new(&mut units);
//! assert_eq!(decoder.decode(&mut src, &mut dst), Outcome::Underflow);
//! assert_eq!(dst.produced(), &[0x61, 0x20AC]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod batch;
mod cursor;
mod decoder;
mod encoder;
mod error;
mod format;
mod options;
mod outcome;
pub mod surrogate;

#[cfg(test)]
mod tests;

pub use cursor::{AccessMode, ByteSink, ByteSource, UnitSink, UnitSource};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::TranscodeError;
pub use format::Format;
pub use options::{DecodeOptions, EncodeOptions, ErrorPolicy, Replacement};
pub use outcome::Outcome;
