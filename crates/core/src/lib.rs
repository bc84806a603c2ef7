//! Five-field cron expression engine backed by u64 bit sets.
//!
//! This crate provides:
//! - A forward-only parser for `minute hour day-of-month month day-of-week`
//!   expressions (`*`, `?`, scalars, ranges, steps, comma lists)
//! - One `u64` bit set per field, scanned with trailing-zero instructions
//! - A cascading-carry next-occurrence query at minute granularity
//! - Canonical string serialization (ascending value enumeration)
//!
//! Parsing and querying are pure, allocation-free, and synchronous; a parsed
//! [`Schedule`] is `Copy` and freely shareable across threads. Timezones,
//! DST, and second-level granularity are out of scope, and matching is
//! day-of-month only (the day-of-week field is validated but not enforced).

pub mod error;
pub mod field;
mod next;
mod parse;
pub mod schedule;

pub use error::CronError;
pub use field::{Field, ValueSet};
pub use schedule::{Schedule, Upcoming};
