//! Five-field expression parser over a forward-only byte cursor.
//!
//! Grammar per field (comma-separated list of items):
//!
//! ```text
//! item := '?' | '*' ['/' step] | number ['-' number] ['/' step]
//! ```
//!
//! Fields are separated by runs of one or more spaces; leading and trailing
//! whitespace is permitted; anything left after the fifth field is an error.

use crate::error::CronError;
use crate::field::{Field, ValueSet};
use crate::schedule::Schedule;

pub(crate) fn parse(input: &str) -> Result<Schedule, CronError> {
    let mut cur = Cursor::new(input);

    cur.skip_spaces();
    let minute = parse_field(&mut cur, Field::Minute)?;
    cur.require_space()?;
    let hour = parse_field(&mut cur, Field::Hour)?;
    cur.require_space()?;
    let day = parse_field(&mut cur, Field::Day)?;
    cur.require_space()?;
    let month = parse_field(&mut cur, Field::Month)?;
    cur.require_space()?;
    let week = parse_field(&mut cur, Field::Week)?;
    cur.skip_spaces();

    if !cur.at_end() {
        return Err(CronError::Syntax { at: cur.pos });
    }

    Ok(Schedule::new(minute, hour, day, month, week))
}

/// Parse one field's item list. A field whose items set no bits is rejected.
fn parse_field(cur: &mut Cursor<'_>, field: Field) -> Result<ValueSet, CronError> {
    let mut set = ValueSet::EMPTY;

    if parse_item(cur, field, &mut set)? {
        while cur.consume_if(b',') {
            if !parse_item(cur, field, &mut set)? {
                break;
            }
        }
    }

    if set.is_empty() {
        return Err(CronError::EmptyField { field });
    }

    Ok(set)
}

/// Parse a single item into `set`.
///
/// Returns `Ok(false)` without consuming input when the cursor is not at a
/// valid item start; the caller's separator check then reports the stray
/// character. Domain violations abort immediately with [`CronError::Range`].
fn parse_item(
    cur: &mut Cursor<'_>,
    field: Field,
    set: &mut ValueSet,
) -> Result<bool, CronError> {
    let mut r = *cur;
    let start;
    let mut stop = None;

    // ? covers the whole domain and admits no step.
    if r.consume_if(b'?') {
        if r.peek() == Some(b'/') {
            return Err(CronError::Syntax { at: r.pos });
        }
        *set = set.union(field.all());
        *cur = r;
        return Ok(true);
    }

    if r.consume_if(b'*') {
        // Bare * is the whole domain; */step strides from the domain min.
        if r.peek() != Some(b'/') {
            *set = set.union(field.all());
            *cur = r;
            return Ok(true);
        }
        start = field.min();
        stop = Some(field.max());
    } else {
        start = match r.read_number() {
            Some(n) => n,
            None => return Ok(false),
        };
        if start < field.min() || start > field.max() {
            return Err(CronError::Range { field, value: start });
        }

        if r.consume_if(b'-') {
            let end = r
                .read_number()
                .ok_or(CronError::Syntax { at: r.pos })?;
            if end > field.max() || end < start {
                return Err(CronError::Range { field, value: end });
            }
            stop = Some(end);
        }
    }

    let step = if r.consume_if(b'/') {
        let step = r
            .read_number()
            .ok_or(CronError::Syntax { at: r.pos })?;
        if step == 0 {
            return Err(CronError::Range { field, value: 0 });
        }
        // start/step runs to the domain max when no end was written.
        if stop.is_none() {
            stop = Some(field.max());
        }
        step
    } else {
        match stop {
            // Plain scalar, single bit.
            None => {
                set.insert(start);
                *cur = r;
                return Ok(true);
            }
            Some(_) => 1,
        }
    };

    let stop = stop.unwrap_or(field.max());
    if start == field.min() && stop == field.max() && step == 1 {
        // Whole domain with step 1: reuse the precomputed mask.
        *set = set.union(field.all());
    } else {
        set.set_range(start, stop, step);
    }

    *cur = r;
    Ok(true)
}

/// Forward-only cursor over the expression bytes.
///
/// The grammar is pure ASCII, so byte-level reads are exact; any multi-byte
/// character fails the parse the same way any other stray byte does.
#[derive(Clone, Copy)]
struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn consume_if(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip a run of spaces, reporting whether any were consumed.
    fn skip_spaces(&mut self) -> bool {
        let start = self.pos;
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Require a field separator: at least one space, or end of input.
    fn require_space(&mut self) -> Result<(), CronError> {
        if self.skip_spaces() || self.at_end() {
            Ok(())
        } else {
            Err(CronError::Syntax { at: self.pos })
        }
    }

    /// Read one or two decimal digits. A third digit is deliberately left
    /// unconsumed (no field domain needs more than two); it then trips the
    /// caller's separator check as an unexpected character.
    fn read_number(&mut self) -> Option<u8> {
        let first = match self.peek() {
            Some(b) if b.is_ascii_digit() => b - b'0',
            _ => return None,
        };
        self.pos += 1;

        match self.peek() {
            Some(b) if b.is_ascii_digit() => {
                self.pos += 1;
                Some(first * 10 + (b - b'0'))
            }
            _ => Some(first),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minute_bits(expr: &str) -> Vec<u8> {
        parse(expr)
            .unwrap()
            .field(Field::Minute)
            .iter()
            .collect()
    }

    // -- grammar -----------------------------------------------------------

    #[test]
    fn scalar_sets_single_bit() {
        assert_eq!(minute_bits("7 * * * *"), vec![7]);
    }

    #[test]
    fn list_accumulates_bits() {
        assert_eq!(minute_bits("3,1,2 * * * *"), vec![1, 2, 3]);
    }

    #[test]
    fn range_is_inclusive() {
        assert_eq!(minute_bits("10-13 * * * *"), vec![10, 11, 12, 13]);
    }

    #[test]
    fn range_with_step() {
        assert_eq!(minute_bits("1-9/3 * * * *"), vec![1, 4, 7]);
    }

    #[test]
    fn scalar_with_step_runs_to_domain_max() {
        assert_eq!(
            minute_bits("45/5 * * * *"),
            vec![45, 50, 55],
        );
    }

    #[test]
    fn star_step_starts_at_domain_min() {
        assert_eq!(
            minute_bits("*/15 * * * *"),
            vec![0, 15, 30, 45],
        );
    }

    #[test]
    fn question_mark_is_whole_domain() {
        assert_eq!(minute_bits("? * * * *").len(), 60);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(parse("  * * * * *  ").is_ok());
        assert!(parse("*   *  * * *").is_ok());
    }

    // -- error classification ----------------------------------------------

    #[test]
    fn question_mark_with_step_is_syntax_error() {
        assert!(matches!(
            parse("?/1 * * * *"),
            Err(CronError::Syntax { .. }),
        ));
    }

    #[test]
    fn third_digit_is_unexpected_character() {
        assert!(matches!(
            parse("123 * * * *"),
            Err(CronError::Syntax { .. }),
        ));
    }

    #[test]
    fn scalar_outside_domain_is_range_error() {
        assert_eq!(
            parse("61 * * * *"),
            Err(CronError::Range {
                field: Field::Minute,
                value: 61,
            }),
        );
        assert_eq!(
            parse("* * 0 * *"),
            Err(CronError::Range {
                field: Field::Day,
                value: 0,
            }),
        );
    }

    #[test]
    fn reversed_range_is_range_error() {
        assert_eq!(
            parse("5-2 * * * *"),
            Err(CronError::Range {
                field: Field::Minute,
                value: 2,
            }),
        );
    }

    #[test]
    fn zero_step_is_range_error() {
        assert_eq!(
            parse("1/0 * * * *"),
            Err(CronError::Range {
                field: Field::Minute,
                value: 0,
            }),
        );
        assert_eq!(
            parse("* * * * 1-5/0"),
            Err(CronError::Range {
                field: Field::Week,
                value: 0,
            }),
        );
    }

    #[test]
    fn missing_field_is_empty_field_error() {
        assert_eq!(
            parse("1 2 3 4"),
            Err(CronError::EmptyField { field: Field::Week }),
        );
    }

    #[test]
    fn whitespace_only_input_fails() {
        assert_eq!(
            parse("     "),
            Err(CronError::EmptyField {
                field: Field::Minute,
            }),
        );
    }

    #[test]
    fn six_fields_fail_as_trailing_garbage() {
        assert!(matches!(
            parse("1 2 3 4 5 6"),
            Err(CronError::Syntax { .. }),
        ));
    }

    #[test]
    fn trailing_garbage_fails() {
        assert!(matches!(
            parse("    1 2 3 4 5 .  "),
            Err(CronError::Syntax { .. }),
        ));
    }

    #[test]
    fn double_star_fails() {
        assert!(matches!(
            parse("* **/1 * * *"),
            Err(CronError::Syntax { .. }),
        ));
    }

    #[test]
    fn dangling_range_fails() {
        assert!(matches!(
            parse("1- * * * *"),
            Err(CronError::Syntax { .. }),
        ));
    }
}
