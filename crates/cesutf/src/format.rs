/// Which wire grammar an engine speaks.
///
/// The two formats agree on everything up to U+FFFF. They diverge only on
/// supplementary code points: UTF-8 encodes the combined scalar as one
/// 4-byte sequence, CESU-8 encodes each surrogate half as an independent
/// 3-byte sequence (6 bytes total) and has no 4-byte branch at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Standard UTF-8 with strict rejection of overlong encodings,
    /// surrogate triples, and scalars above U+10FFFF.
    Utf8,
    /// The CESU-8 compatibility encoding: surrogate halves travel as
    /// individual 3-byte sequences and are not recombined at decode time.
    Cesu8,
}
