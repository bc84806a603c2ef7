//! Next-occurrence engine: a single-pass carry cascade over the four
//! date-bearing fields, least significant first.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::CronError;
use crate::field::Field;
use crate::schedule::Schedule;

/// Earliest timestamp strictly after `after` matching the schedule's
/// minute, hour, day-of-month, and month sets. Seconds are forced to 0 and
/// the day-of-week set is ignored.
///
/// Each stage runs only when the current candidate fails its field; a wrap
/// carries one unit into the next stage and resets every lower field to its
/// first permitted value. The cascade never re-validates, so a day that
/// does not exist in the final month surfaces as [`CronError::Calendar`].
pub(crate) fn next_after(
    schedule: &Schedule,
    after: NaiveDateTime,
) -> Result<NaiveDateTime, CronError> {
    let minutes = schedule.field(Field::Minute);
    let hours = schedule.field(Field::Hour);
    let days = schedule.field(Field::Day);
    let months = schedule.field(Field::Month);

    let mut hour = after.hour() as u8;
    let mut day = after.day() as u8;
    let mut month = after.month() as u8;
    let mut year = after.year();

    let (mut minute, wrapped) = minutes.next_or_wrap(after.minute() as u8);
    if wrapped {
        hour += 1;
    }

    if !hours.contains(hour) {
        let (h, wrapped) = hours.next_or_wrap(hour);
        hour = h;
        if wrapped {
            day += 1;
        }
        minute = minutes.first();
    }

    if !days.contains(day) {
        let (d, wrapped) = days.next_or_wrap(day);
        day = d;
        if wrapped {
            month += 1;
        }
        minute = minutes.first();
        hour = hours.first();
    }

    if !months.contains(month) {
        let (m, wrapped) = months.next_or_wrap(month);
        month = m;
        if wrapped {
            year += 1;
        }
        minute = minutes.first();
        hour = hours.first();
        day = days.first();
    }

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .and_then(|date| date.and_hms_opt(hour as u32, minute as u32, 0))
        .ok_or(CronError::Calendar { year, month, day })
}
