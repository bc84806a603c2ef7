//! [`Schedule`] — an immutable five-field schedule expression.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CronError;
use crate::field::{Field, ValueSet};
use crate::next;
use crate::parse;

/// A parsed schedule expression: five bit sets, one per field.
///
/// Built only by [`Schedule::parse`] (or [`FromStr`]); immutable afterward
/// and [`Copy`]-cheap, so it can be shared across any number of concurrent
/// callers without synchronization.
///
/// The day-of-week set is validated at parse time but never consulted when
/// computing occurrences; matching is day-of-month only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    minute: ValueSet,
    hour: ValueSet,
    day: ValueSet,
    month: ValueSet,
    week: ValueSet,
}

impl Schedule {
    pub(crate) fn new(
        minute: ValueSet,
        hour: ValueSet,
        day: ValueSet,
        month: ValueSet,
        week: ValueSet,
    ) -> Self {
        Schedule {
            minute,
            hour,
            day,
            month,
            week,
        }
    }

    /// Parse a five-field expression: `minute hour day-of-month month
    /// day-of-week`, fields separated by one or more spaces.
    pub fn parse(input: &str) -> Result<Schedule, CronError> {
        parse::parse(input)
    }

    /// The permitted values of one field.
    pub fn field(&self, field: Field) -> ValueSet {
        match field {
            Field::Minute => self.minute,
            Field::Hour => self.hour,
            Field::Day => self.day,
            Field::Month => self.month,
            Field::Week => self.week,
        }
    }

    /// Earliest timestamp strictly after `after` at which the schedule
    /// fires, truncated to minute granularity.
    ///
    /// Fails with [`CronError::Calendar`] when the carry cascade lands on a
    /// day that does not exist in the resulting month.
    pub fn next_after(&self, after: NaiveDateTime) -> Result<NaiveDateTime, CronError> {
        next::next_after(self, after)
    }

    /// Iterator of successive occurrences strictly after `from`.
    ///
    /// Ends when [`next_after`](Schedule::next_after) fails; use it directly
    /// when the distinction matters.
    pub fn upcoming(&self, from: NaiveDateTime) -> Upcoming<'_> {
        Upcoming {
            schedule: self,
            cursor: from,
        }
    }
}

impl FromStr for Schedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Schedule::parse(s)
    }
}

/// Canonical form: each field rendered as the ascending comma-separated
/// enumeration of its permitted values, fields joined by single spaces.
/// Range/step syntax from the original text is not reconstructed.
impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in Field::ORDER.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            for (j, value) in self.field(field).iter().enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Iterator over successive occurrences of a [`Schedule`].
#[derive(Debug, Clone)]
pub struct Upcoming<'a> {
    schedule: &'a Schedule,
    cursor: NaiveDateTime,
}

impl Iterator for Upcoming<'_> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        let next = self.schedule.next_after(self.cursor).ok()?;
        self.cursor = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_ascending_enumeration() {
        let schedule: Schedule = "1-5 1-5 1-5 1-5 1-5".parse().unwrap();
        assert_eq!(
            schedule.to_string(),
            "1,2,3,4,5 1,2,3,4,5 1,2,3,4,5 1,2,3,4,5 1,2,3,4,5",
        );
    }

    #[test]
    fn display_does_not_reconstruct_step_syntax() {
        let schedule: Schedule = "*/30 * * * *".parse().unwrap();
        assert!(schedule.to_string().starts_with("0,30 "));
    }

    #[test]
    fn sunday_bits_are_kept_literally() {
        // 0 and 7 both mean Sunday but are independent bits.
        let zero: Schedule = "* * * * 0".parse().unwrap();
        let seven: Schedule = "* * * * 7".parse().unwrap();

        assert!(zero.field(Field::Week).contains(0));
        assert!(!zero.field(Field::Week).contains(7));
        assert!(seven.field(Field::Week).contains(7));
        assert!(!seven.field(Field::Week).contains(0));
    }

    #[test]
    fn serde_round_trips_through_canonical_string() {
        let schedule: Schedule = "*/15 8-17 * * 1-5".parse().unwrap();

        let json = serde_json::to_string(&schedule).unwrap();
        let decoded: Schedule = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, schedule);
    }

    #[test]
    fn serde_rejects_invalid_expressions() {
        assert!(serde_json::from_str::<Schedule>("\"1 2 3 4 5 6\"").is_err());
    }
}
