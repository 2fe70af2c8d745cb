//! Read-only configuration consumed by the batch layer.
//!
//! The streaming engines know nothing of policy: they report defects
//! through the [`Outcome`](crate::Outcome) and stop. The batch entry
//! points consult these options to decide whether a defect stops the call
//! or is substituted and skipped.

/// What the batch layer does with a malformed or unmappable run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first defect and return it as an error value.
    ///
    /// # Default
    ///
    /// This is the default.
    #[default]
    Report,
    /// Substitute the configured replacement and keep going.
    Replace,
}

/// Options for the batch decode entry points.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Defect handling policy.
    pub policy: ErrorPolicy,
    /// Code unit substituted for each defective run under
    /// [`ErrorPolicy::Replace`].
    ///
    /// # Default
    ///
    /// U+FFFD, the replacement character.
    pub replacement: u16,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            policy: ErrorPolicy::Report,
            replacement: 0xFFFD,
        }
    }
}

/// Options for the batch encode entry points.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Defect handling policy.
    pub policy: ErrorPolicy,
    /// Byte sequence substituted for each defective run under
    /// [`ErrorPolicy::Replace`].
    pub replacement: Replacement,
}

/// A 1..=4 byte replacement sequence, stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacement {
    bytes: [u8; 4],
    len: u8,
}

impl Replacement {
    /// A replacement from 1 to 4 bytes; `None` outside that range.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > 4 {
            return None;
        }
        let mut stored = [0u8; 4];
        stored[..bytes.len()].copy_from_slice(bytes);
        Some(Self {
            bytes: stored,
            len: bytes.len() as u8,
        })
    }

    /// The replacement bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

impl Default for Replacement {
    /// A single `?`, matching the conventional single-byte substitute.
    fn default() -> Self {
        Self {
            bytes: [b'?', 0, 0, 0],
            len: 1,
        }
    }
}
