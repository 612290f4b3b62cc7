//! Date expression resolver.
//!
//! # Responsibility
//! - Map a short date phrase to a `CalendarDate` relative to a reference instant.
//!
//! # Invariants
//! - Rules are tried in fixed order: keyword, weekday, explicit format, ISO 8601.
//! - Weekday phrases always resolve strictly after the reference day.
//! - Yearless phrases never resolve to a day whose start lies before the
//!   reference instant.

use super::combine::start_of_day;
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Weekday};

/// Calendar date without time-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Returns `None` for dates the proleptic Gregorian calendar rejects.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

/// One accepted explicit date layout.
#[derive(Debug, Clone, Copy)]
struct DateFormat {
    /// Human-readable layout, kept for diagnostics.
    layout: &'static str,
    /// `chrono` strftime pattern that must consume the whole phrase.
    pattern: &'static str,
    has_year: bool,
}

// Order matters: the first layout that fully parses wins.
const DATE_FORMATS: &[DateFormat] = &[
    DateFormat {
        layout: "MMMM d, yyyy",
        pattern: "%B %d, %Y",
        has_year: true,
    },
    DateFormat {
        layout: "MMMM d yyyy",
        pattern: "%B %d %Y",
        has_year: true,
    },
    DateFormat {
        layout: "MMMM d",
        pattern: "%B %d",
        has_year: false,
    },
    DateFormat {
        layout: "MMM d, yyyy",
        pattern: "%b %d, %Y",
        has_year: true,
    },
    DateFormat {
        layout: "MMM d yyyy",
        pattern: "%b %d %Y",
        has_year: true,
    },
    DateFormat {
        layout: "MMM d",
        pattern: "%b %d",
        has_year: false,
    },
    DateFormat {
        layout: "yyyy-MM-dd",
        pattern: "%Y-%m-%d",
        has_year: true,
    },
    DateFormat {
        layout: "MM/dd/yyyy",
        pattern: "%m/%d/%Y",
        has_year: true,
    },
    DateFormat {
        layout: "MM-dd-yyyy",
        pattern: "%m-%d-%Y",
        has_year: true,
    },
    DateFormat {
        layout: "d MMMM yyyy",
        pattern: "%d %B %Y",
        has_year: true,
    },
    DateFormat {
        layout: "d MMMM",
        pattern: "%d %B",
        has_year: false,
    },
];

// Tested in this order; the first contained name wins.
const WEEKDAYS: &[(&str, Weekday)] = &[
    ("sunday", Weekday::Sun),
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
];

/// Resolves a date phrase relative to `now`.
///
/// The phrase is trimmed and matched case-insensitively. "Today" is the
/// calendar day of `now` in `now`'s own time zone.
///
/// Returns `None` when no rule matches.
pub fn resolve_date<Tz: TimeZone>(phrase: &str, now: &DateTime<Tz>) -> Option<CalendarDate> {
    let trimmed = phrase.trim();
    let lowered = trimmed.to_lowercase();
    let today = now.date_naive();

    resolve_keyword(&lowered, today)
        .or_else(|| resolve_weekday(&lowered, today))
        .or_else(|| resolve_explicit_format(trimmed, now))
        .or_else(|| resolve_iso8601(trimmed))
        .map(CalendarDate)
}

fn resolve_keyword(lowered: &str, today: NaiveDate) -> Option<NaiveDate> {
    match lowered {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "next week" => today.checked_add_days(Days::new(7)),
        _ => None,
    }
}

fn resolve_weekday(lowered: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (_, target) = WEEKDAYS
        .iter()
        .find(|(name, _)| lowered.contains(name))?;

    let mut offset = i64::from(target.num_days_from_sunday())
        - i64::from(today.weekday().num_days_from_sunday());
    if offset <= 0 {
        offset += 7;
    }
    today.checked_add_days(Days::new(offset.unsigned_abs()))
}

fn resolve_explicit_format<Tz: TimeZone>(phrase: &str, now: &DateTime<Tz>) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|format| {
        if format.has_year {
            NaiveDate::parse_from_str(phrase, format.pattern).ok()
        } else {
            resolve_yearless(phrase, format, now)
        }
    })
}

/// Parses a month/day layout in the reference year, rolling to the next
/// year when that day starts strictly before `now`.
///
/// Only a reference instant at exactly midnight keeps today's month/day in
/// the current year. A February 29 that does not exist in the reference
/// year also rolls, so the phrase still resolves when the next year is a
/// leap year.
fn resolve_yearless<Tz: TimeZone>(
    phrase: &str,
    format: &DateFormat,
    now: &DateTime<Tz>,
) -> Option<NaiveDate> {
    let pattern = format!("{} %Y", format.pattern);
    let parse_in =
        |year: i32| NaiveDate::parse_from_str(&format!("{phrase} {year}"), &pattern).ok();
    let year = now.date_naive().year();

    match parse_in(year) {
        Some(date) if !has_started_before(date, now) => Some(date),
        _ => {
            let rolled = parse_in(year + 1);
            if rolled.is_some() {
                log::debug!(
                    "event=resolve_date module=temporal status=ok layout=\"{}\" rollover=next_year",
                    format.layout
                );
            }
            rolled
        }
    }
}

fn has_started_before<Tz: TimeZone>(date: NaiveDate, now: &DateTime<Tz>) -> bool {
    match start_of_day(CalendarDate(date), &now.timezone()) {
        Some(start) => start < *now,
        None => date < now.date_naive(),
    }
}

/// ISO 8601 full-date fallback.
///
/// Accepts the extended form with an optional time part
/// (`2025-12-11T16:00:00Z`, time ignored) and the basic form (`20251211`).
fn resolve_iso8601(phrase: &str) -> Option<NaiveDate> {
    if let Ok((date, remainder)) = NaiveDate::parse_and_remainder(phrase, "%Y-%m-%d") {
        if remainder.is_empty() || remainder.starts_with(['T', 't']) {
            return Some(date);
        }
    }

    if phrase.len() == 8 && phrase.bytes().all(|byte| byte.is_ascii_digit()) {
        let year = phrase[0..4].parse().ok()?;
        let month = phrase[4..6].parse().ok()?;
        let day = phrase[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}
