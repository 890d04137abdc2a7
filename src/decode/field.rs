//! Field extraction helpers.
//!
//! Every decoder walks a register value with a [`Word`]: each
//! [`Word::take`] pulls one field out and hands back a new word with that
//! field cleared, and [`Word::ignore`] drops bits that are known but have no
//! equivalent in the binding. Whatever is left at [`Word::finish`] is the
//! residual.

use smallvec::SmallVec;

/// Extract a field: `((value & mask) >> shift, value & !mask)`.
#[inline]
pub fn extract(value: u32, mask: u32, shift: u8) -> (u32, u32) {
    ((value & mask) >> shift, value & !mask)
}

/// Position of one field inside a 32-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub mask: u32,
    pub shift: u8,
}

impl FieldSpec {
    /// Multi-bit field.
    pub const fn new(mask: u32, shift: u8) -> Self {
        Self { mask, shift }
    }

    /// Single-bit flag; the shift is derived from the mask.
    pub const fn flag(mask: u32) -> Self {
        Self {
            mask,
            shift: mask.trailing_zeros() as u8,
        }
    }

    /// Same field moved up by `by` bits (used for packed half-words).
    pub const fn shifted(self, by: u8) -> Self {
        Self {
            mask: self.mask << by,
            shift: self.shift + by,
        }
    }

    /// Apply this field to a raw value.
    #[inline]
    pub fn extract(self, value: u32) -> (u32, u32) {
        extract(value, self.mask, self.shift)
    }
}

/// How the bits of one register value were accounted for.
///
/// The three sets are disjoint and their union is the original value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coverage {
    /// Bits consumed by documented fields
    pub claimed: u32,
    /// Bits cleared as known but unmodeled
    pub ignored: u32,
    /// Bits nobody accounted for
    pub residual: u32,
}

impl Coverage {
    /// Reassemble the original value.
    pub fn union(&self) -> u32 {
        self.claimed | self.ignored | self.residual
    }
}

/// A register value part-way through decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    remaining: u32,
    claimed: u32,
    ignored: u32,
}

impl Word {
    pub fn new(value: u32) -> Self {
        Self {
            remaining: value,
            claimed: 0,
            ignored: 0,
        }
    }

    /// Bits not yet taken or ignored.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Pull one field out of the word.
    #[must_use]
    pub fn take(self, field: FieldSpec) -> (u32, Word) {
        let (value, rest) = field.extract(self.remaining);
        let next = Word {
            remaining: rest,
            claimed: self.claimed | (self.remaining & field.mask),
            ignored: self.ignored,
        };
        (value, next)
    }

    /// Pull a single-bit flag out of the word.
    #[must_use]
    pub fn take_flag(self, field: FieldSpec) -> (bool, Word) {
        let (value, next) = self.take(field);
        (value != 0, next)
    }

    /// Clear bits that are known but not converted.
    #[must_use]
    pub fn ignore(self, mask: u32) -> Word {
        Word {
            remaining: self.remaining & !mask,
            claimed: self.claimed,
            ignored: self.ignored | (self.remaining & mask),
        }
    }

    /// Finish decoding; whatever is left is residual.
    pub fn finish(self) -> Coverage {
        Coverage {
            claimed: self.claimed,
            ignored: self.ignored,
            residual: self.remaining,
        }
    }
}

/// Ordered set of decoded tokens for one register.
///
/// Tokens keep extraction order so verbose output reads like the register
/// layout. Inserting a token that is already present is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<T>(SmallVec<[T; 12]>);

impl<T: PartialEq + Copy> Tokens<T> {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    pub fn insert(&mut self, token: T) {
        if !self.0.contains(&token) {
            self.0.push(token);
        }
    }

    /// Insert `token` when `present` is set.
    pub fn insert_if(&mut self, present: bool, token: T) {
        if present {
            self.insert(token);
        }
    }

    pub fn contains(&self, token: T) -> bool {
        self.0.contains(&token)
    }

    /// First token for which `f` returns `Some`.
    pub fn find_map<U>(&self, f: impl FnMut(&T) -> Option<U>) -> Option<U> {
        self.0.iter().find_map(f)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: PartialEq + Copy> Default for Tokens<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> Tokens<T> {
    /// Render each token with its `Debug` form, for verbose output.
    pub fn render(&self) -> Vec<String> {
        self.0.iter().map(|t| format!("{:?}", t)).collect()
    }
}
