//! Task record builder.
//!
//! # Responsibility
//! - Turn one `RawTaskFragment` into a `ResolvedTask`.
//!
//! # Invariants
//! - A time phrase without a resolvable date never produces a due date.
//! - A resolvable date with a missing or unresolvable time falls back to the
//!   start of that day.

use crate::model::fragment::RawTaskFragment;
use crate::model::task::{ResolvedTask, TaskCategory, TaskPriority};
use crate::temporal::{combine, resolve_date, resolve_time, start_of_day};
use chrono::{DateTime, FixedOffset, TimeZone};
use log::debug;
use uuid::Uuid;

impl ResolvedTask {
    /// Builds a resolved task from a decoded fragment.
    ///
    /// `now` is the reference instant for relative phrases; the due date is
    /// composed in `now`'s time zone.
    pub fn from_fragment<Tz: TimeZone>(fragment: RawTaskFragment, now: &DateTime<Tz>) -> Self {
        let priority = fragment
            .priority_phrase
            .as_deref()
            .and_then(TaskPriority::from_phrase)
            .unwrap_or_default();
        let category = fragment
            .category_phrase
            .as_deref()
            .and_then(TaskCategory::from_phrase)
            .unwrap_or_default();
        let due_date = resolve_due_date(
            fragment.due_date_phrase.as_deref(),
            fragment.due_time_phrase.as_deref(),
            now,
        );

        Self {
            id: Uuid::new_v4(),
            title: fragment.title,
            due_date,
            priority,
            category,
            notes: fragment.notes,
        }
    }
}

/// Resolves the due instant from separate date and time phrases.
pub fn resolve_due_date<Tz: TimeZone>(
    date_phrase: Option<&str>,
    time_phrase: Option<&str>,
    now: &DateTime<Tz>,
) -> Option<DateTime<FixedOffset>> {
    let date_phrase = date_phrase?;
    let Some(date) = resolve_date(date_phrase, now) else {
        debug!(
            "event=resolve_due_date module=extract status=skipped reason=unrecognized_date has_time={}",
            time_phrase.is_some()
        );
        return None;
    };

    let time = time_phrase.and_then(|phrase| {
        let resolved = resolve_time(phrase);
        if resolved.is_none() {
            debug!(
                "event=resolve_due_date module=extract status=fallback reason=unrecognized_time"
            );
        }
        resolved
    });

    let tz = now.timezone();
    combine(date, time, &tz)
        .or_else(|| start_of_day(date, &tz))
        .map(|due| due.fixed_offset())
}
