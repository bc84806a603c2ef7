//! Field domains and the bit set of permitted values backing each field.
//!
//! Every schedule field fits in a single `u64`: bit *i* is set iff value *i*
//! is permitted. The widest domain (minute, 0–59) needs 60 bits, so shift
//! and trailing-zero scans stay branch-free single instructions.

use std::fmt;

/// One of the five schedule fields, in expression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Minute,
    Hour,
    Day,
    Month,
    Week,
}

impl Field {
    /// The five fields in the order they appear in an expression.
    pub const ORDER: [Field; 5] = [
        Field::Minute,
        Field::Hour,
        Field::Day,
        Field::Month,
        Field::Week,
    ];

    /// Lowest legal value for this field.
    pub const fn min(self) -> u8 {
        match self {
            Field::Minute | Field::Hour | Field::Week => 0,
            Field::Day | Field::Month => 1,
        }
    }

    /// Highest legal value for this field.
    pub const fn max(self) -> u8 {
        match self {
            Field::Minute => 59,
            Field::Hour => 23,
            Field::Day => 31,
            Field::Month => 12,
            Field::Week => 7,
        }
    }

    /// Mask with every domain bit set.
    pub const fn all(self) -> ValueSet {
        let width = self.max() - self.min() + 1;
        ValueSet(((1u64 << width) - 1) << self.min())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::Day => "day-of-month",
            Field::Month => "month",
            Field::Week => "day-of-week",
        })
    }
}

/// Set of permitted values for one field, one bit per value.
///
/// The parser only ever sets bits inside the field's domain and rejects
/// fields that end up empty, so scan methods may assume at least one bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSet(u64);

impl ValueSet {
    pub(crate) const EMPTY: ValueSet = ValueSet(0);

    /// Permit a single value.
    pub(crate) fn insert(&mut self, value: u8) {
        self.0 |= 1 << value;
    }

    /// Permit every value from `start` to `stop` inclusive, striding by
    /// `step`. Caller guarantees `step >= 1`.
    pub(crate) fn set_range(&mut self, start: u8, stop: u8, step: u8) {
        let mut v = start;
        while v <= stop {
            self.0 |= 1 << v;
            v += step;
        }
    }

    pub(crate) fn union(self, other: ValueSet) -> ValueSet {
        ValueSet(self.0 | other.0)
    }

    /// Whether `value` is permitted.
    pub fn contains(self, value: u8) -> bool {
        (value as u32) < u64::BITS && self.0 & (1 << value) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lowest permitted value. Parser-built sets are never empty.
    pub fn first(self) -> u8 {
        self.0.trailing_zeros() as u8
    }

    /// Smallest permitted value strictly greater than `value`, or the
    /// lowest permitted value with `wrapped = true` when none exists.
    pub fn next_or_wrap(self, value: u8) -> (u8, bool) {
        match self.0.checked_shr(value as u32 + 1) {
            Some(remainder) if remainder != 0 => {
                (value + 1 + remainder.trailing_zeros() as u8, false)
            }
            _ => (self.first(), true),
        }
    }

    /// Iterate the permitted values in ascending order.
    pub fn iter(self) -> Values {
        Values(self.0)
    }
}

/// Ascending iterator over the set bits of a [`ValueSet`].
#[derive(Debug, Clone)]
pub struct Values(u64);

impl Iterator for Values {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let value = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(value)
    }
}
