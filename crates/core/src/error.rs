use thiserror::Error;

use crate::field::Field;

/// Errors produced while parsing an expression or computing an occurrence.
///
/// All of these are deterministic functions of the input; there is no
/// transient failure mode and nothing to retry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronError {
    /// Malformed grammar: unexpected character, missing separator,
    /// trailing garbage, or a step attached to `?`.
    #[error("syntax error at byte {at}")]
    Syntax { at: usize },

    /// A scalar or range endpoint outside the field's domain, a reversed
    /// range, or a zero step.
    #[error("value {value} is not valid for the {field} field")]
    Range { field: Field, value: u8 },

    /// The field's item list produced no permitted values.
    #[error("the {field} field matches no values")]
    EmptyField { field: Field },

    /// The carry cascade landed on a day that does not exist in the
    /// resulting month (e.g. February 31).
    #[error("no such calendar date: {year:04}-{month:02}-{day:02}")]
    Calendar { year: i32, month: u8, day: u8 },
}
