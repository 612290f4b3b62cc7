//! Date-time combiner.
//!
//! # Responsibility
//! - Compose a `CalendarDate` and an optional `ClockTime` into an instant.
//!
//! # Invariants
//! - Seconds are always zero.
//! - An ambiguous local time (clocks turned back) takes the earliest instant.
//! - A skipped local time (clocks turned forward) moves to the first valid
//!   minute after the gap.

use super::date::CalendarDate;
use super::time::ClockTime;
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone};

const MAX_GAP_MINUTES: i64 = 3 * 60;

/// Combines a date with an optional time of day in `tz`.
///
/// Without a time the result is the start of the calendar day.
pub fn combine<Tz: TimeZone>(
    date: CalendarDate,
    time: Option<ClockTime>,
    tz: &Tz,
) -> Option<DateTime<Tz>> {
    let clock = match time {
        Some(time) => NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)?,
        None => NaiveTime::MIN,
    };
    resolve_local(tz, date.as_naive().and_time(clock))
}

/// Start of `date` in `tz`.
pub fn start_of_day<Tz: TimeZone>(date: CalendarDate, tz: &Tz) -> Option<DateTime<Tz>> {
    combine(date, None, tz)
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    if let Some(resolved) = tz.from_local_datetime(&local).earliest() {
        return Some(resolved);
    }

    let resolved = (1..=MAX_GAP_MINUTES).find_map(|minutes| {
        tz.from_local_datetime(&(local + Duration::minutes(minutes)))
            .earliest()
    });
    if resolved.is_none() {
        log::warn!(
            "event=combine_datetime module=temporal status=error reason=unresolvable_local_time"
        );
    }
    resolved
}
