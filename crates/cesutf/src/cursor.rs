//! Cursor-bounded views over caller-owned buffers.
//!
//! Overview
//! - The engines never own storage. Callers hand them a source cursor and a
//!   destination cursor per call; the engines move the positions forward and
//!   return an [`Outcome`](crate::Outcome). Buffers outlive many calls, so a
//!   chunked conversion is just "refill source / drain destination, call
//!   again".
//! - Each cursor carries an [`AccessMode`] chosen at construction. `Direct`
//!   lets an engine borrow the backing slice and run bulk fast paths bounded
//!   by the precomputed limit; `Checked` confines it to the single-unit
//!   `get`/`put`/`lookahead` path. The two modes are a performance choice
//!   only: identical input must produce identical output, final positions,
//!   and outcome on either.
//!
//! Invariants
//! - `0 <= mark <= position <= limit <= capacity` at all times.
//! - Engines move `position` forward only, within `[position, limit)`, and
//!   only after a whole sequence has been consumed or produced.
//! - Advancing past `limit` is a programming error and panics rather than
//!   wrapping or clamping.

/// How an engine is allowed to touch the backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// The backing slice may be borrowed for bulk index arithmetic.
    Direct,
    /// Only single-unit, bounds-checked access is permitted.
    Checked,
}

macro_rules! cursor_common {
    () => {
        /// Current read/write index.
        #[must_use]
        pub fn position(&self) -> usize {
            self.position
        }

        /// One past the last accessible index.
        #[must_use]
        pub fn limit(&self) -> usize {
            self.limit
        }

        /// Units left between position and limit.
        #[must_use]
        pub fn remaining(&self) -> usize {
            self.limit - self.position
        }

        /// Whether bulk fast paths may borrow the backing slice.
        #[must_use]
        pub fn is_direct(&self) -> bool {
            self.mode == AccessMode::Direct
        }

        /// The access mode this cursor was constructed with.
        #[must_use]
        pub fn mode(&self) -> AccessMode {
            self.mode
        }
    };
}

macro_rules! source_common {
    ($unit:ty) => {
        cursor_common!();

        /// Records the current position for a later [`reset`](Self::reset).
        pub fn mark(&mut self) {
            self.mark = self.position;
        }

        /// Rewinds the position to the last mark (initially the start).
        pub fn reset(&mut self) {
            self.position = self.mark;
        }

        /// Reads the unit at `position + n` without consuming anything.
        #[must_use]
        pub fn lookahead(&self, n: usize) -> Option<$unit> {
            let idx = self.position.checked_add(n)?;
            if idx < self.limit {
                Some(self.data[idx])
            } else {
                None
            }
        }

        /// Reads one unit and advances, or returns `None` when drained.
        pub fn get(&mut self) -> Option<$unit> {
            if self.position < self.limit {
                let v = self.data[self.position];
                self.position += 1;
                Some(v)
            } else {
                None
            }
        }

        /// Moves the position forward by `n` consumed units.
        ///
        /// # Panics
        ///
        /// Panics if the advance would cross the limit; that is an engine
        /// bug, not a recoverable condition.
        pub fn advance(&mut self, n: usize) {
            assert!(
                n <= self.limit - self.position,
                "cursor advanced past limit"
            );
            self.position += n;
        }
    };
}

/// Read cursor over a byte slice (the decode source).
#[derive(Debug)]
pub struct ByteSource<'a> {
    data: &'a [u8],
    position: usize,
    limit: usize,
    mark: usize,
    mode: AccessMode,
}

impl<'a> ByteSource<'a> {
    /// A direct-mode cursor over the whole slice.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_mode(data, AccessMode::Direct)
    }

    /// A checked-mode cursor over the whole slice.
    #[must_use]
    pub fn checked(data: &'a [u8]) -> Self {
        Self::with_mode(data, AccessMode::Checked)
    }

    /// A cursor over the whole slice in the given mode.
    #[must_use]
    pub fn with_mode(data: &'a [u8], mode: AccessMode) -> Self {
        Self {
            data,
            position: 0,
            limit: data.len(),
            mark: 0,
            mode,
        }
    }

    /// A windowed view: reading starts at `position` and stops at `limit`.
    ///
    /// # Panics
    ///
    /// Panics unless `position <= limit <= data.len()`.
    #[must_use]
    pub fn window(data: &'a [u8], position: usize, limit: usize, mode: AccessMode) -> Self {
        assert!(position <= limit && limit <= data.len(), "invalid window");
        Self {
            data,
            position,
            limit,
            mark: position,
            mode,
        }
    }

    source_common!(u8);

    /// The unread window as a raw slice, in direct mode only.
    pub(crate) fn direct_window(&self) -> Option<&'a [u8]> {
        if self.mode == AccessMode::Direct {
            Some(&self.data[self.position..self.limit])
        } else {
            None
        }
    }
}

/// Read cursor over 16-bit code units (the encode source).
#[derive(Debug)]
pub struct UnitSource<'a> {
    data: &'a [u16],
    position: usize,
    limit: usize,
    mark: usize,
    mode: AccessMode,
}

impl<'a> UnitSource<'a> {
    /// A direct-mode cursor over the whole slice.
    #[must_use]
    pub fn new(data: &'a [u16]) -> Self {
        Self::with_mode(data, AccessMode::Direct)
    }

    /// A checked-mode cursor over the whole slice.
    #[must_use]
    pub fn checked(data: &'a [u16]) -> Self {
        Self::with_mode(data, AccessMode::Checked)
    }

    /// A cursor over the whole slice in the given mode.
    #[must_use]
    pub fn with_mode(data: &'a [u16], mode: AccessMode) -> Self {
        Self {
            data,
            position: 0,
            limit: data.len(),
            mark: 0,
            mode,
        }
    }

    source_common!(u16);

    /// The unread window as a raw slice, in direct mode only.
    pub(crate) fn direct_window(&self) -> Option<&'a [u16]> {
        if self.mode == AccessMode::Direct {
            Some(&self.data[self.position..self.limit])
        } else {
            None
        }
    }
}

/// Write cursor over a byte slice (the encode destination).
#[derive(Debug)]
pub struct ByteSink<'a> {
    data: &'a mut [u8],
    position: usize,
    limit: usize,
    mode: AccessMode,
}

impl<'a> ByteSink<'a> {
    /// A direct-mode sink over the whole slice.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self::with_mode(data, AccessMode::Direct)
    }

    /// A checked-mode sink over the whole slice.
    pub fn checked(data: &'a mut [u8]) -> Self {
        Self::with_mode(data, AccessMode::Checked)
    }

    /// A sink over the whole slice in the given mode.
    pub fn with_mode(data: &'a mut [u8], mode: AccessMode) -> Self {
        let limit = data.len();
        Self {
            data,
            position: 0,
            limit,
            mode,
        }
    }

    /// Writes one byte, or reports `false` when full (position unchanged).
    pub fn put(&mut self, b: u8) -> bool {
        if self.position < self.limit {
            self.data[self.position] = b;
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Writes two bytes, all or nothing.
    pub fn put2(&mut self, b0: u8, b1: u8) -> bool {
        self.put_slice(&[b0, b1])
    }

    /// Writes three bytes, all or nothing.
    pub fn put3(&mut self, b0: u8, b1: u8, b2: u8) -> bool {
        self.put_slice(&[b0, b1, b2])
    }

    /// Writes four bytes, all or nothing.
    pub fn put4(&mut self, b0: u8, b1: u8, b2: u8, b3: u8) -> bool {
        self.put_slice(&[b0, b1, b2, b3])
    }

    /// Writes a whole slice, or reports `false` leaving the sink untouched.
    pub fn put_slice(&mut self, bytes: &[u8]) -> bool {
        if bytes.len() <= self.remaining() {
            self.data[self.position..self.position + bytes.len()].copy_from_slice(bytes);
            self.position += bytes.len();
            true
        } else {
            false
        }
    }

    cursor_common!();

    /// The bytes written so far.
    #[must_use]
    pub fn produced(&self) -> &[u8] {
        &self.data[..self.position]
    }
}

/// Write cursor over 16-bit code units (the decode destination).
#[derive(Debug)]
pub struct UnitSink<'a> {
    data: &'a mut [u16],
    position: usize,
    limit: usize,
    mode: AccessMode,
}

impl<'a> UnitSink<'a> {
    /// A direct-mode sink over the whole slice.
    pub fn new(data: &'a mut [u16]) -> Self {
        Self::with_mode(data, AccessMode::Direct)
    }

    /// A checked-mode sink over the whole slice.
    pub fn checked(data: &'a mut [u16]) -> Self {
        Self::with_mode(data, AccessMode::Checked)
    }

    /// A sink over the whole slice in the given mode.
    pub fn with_mode(data: &'a mut [u16], mode: AccessMode) -> Self {
        let limit = data.len();
        Self {
            data,
            position: 0,
            limit,
            mode,
        }
    }

    /// Writes one code unit, or reports `false` when full.
    pub fn put(&mut self, unit: u16) -> bool {
        if self.position < self.limit {
            self.data[self.position] = unit;
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Writes a surrogate pair, all or nothing: either both units land or
    /// the sink is untouched.
    pub fn put_pair(&mut self, high: u16, low: u16) -> bool {
        if self.remaining() >= 2 {
            self.data[self.position] = high;
            self.data[self.position + 1] = low;
            self.position += 2;
            true
        } else {
            false
        }
    }

    cursor_common!();

    /// The code units written so far.
    #[must_use]
    pub fn produced(&self) -> &[u16] {
        &self.data[..self.position]
    }
}
