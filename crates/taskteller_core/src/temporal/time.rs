//! Time expression resolver.
//!
//! # Responsibility
//! - Map a short time phrase (`4 PM`, `16:00`, `4:30 pm`, `9`) to a `ClockTime`.
//!
//! # Invariants
//! - Patterns are tried in fixed order; the first match wins.
//! - Meridiem correction applies to every pattern.
//! - Out-of-range results resolve to `None`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Hour (0-23) and minute (0-59) of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    /// Returns `None` outside `0..=23` / `0..=59`.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    pub fn hour(self) -> u32 {
        self.hour
    }

    pub fn minute(self) -> u32 {
        self.minute
    }
}

// `<number> <am|pm>`; the number must not be the minute part of `h:mm`.
static MERIDIEM_HOUR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9:])([0-9]{1,2})\s*(?:am|pm)").expect("valid meridiem hour regex")
});
static CLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2}):([0-9]{2})\s*(?:am|pm)?").expect("valid clock regex")
});
static BARE_HOUR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2})").expect("valid bare hour regex"));

/// Resolves a time phrase into an hour/minute pair.
///
/// The phrase is trimmed and lowercased first. Without a meridiem token the
/// hour is read as 24-hour time.
pub fn resolve_time(phrase: &str) -> Option<ClockTime> {
    let lowered = phrase.trim().to_lowercase();
    let patterns: [&Regex; 3] = [&*MERIDIEM_HOUR_RE, &*CLOCK_RE, &*BARE_HOUR_RE];

    let captures = patterns
        .into_iter()
        .find_map(|pattern| pattern.captures(&lowered))?;
    let hour = capture_number(&captures, 1)?;
    let minute = capture_number(&captures, 2).unwrap_or(0);

    ClockTime::new(apply_meridiem(&lowered, hour), minute)
}

fn capture_number(captures: &Captures<'_>, index: usize) -> Option<u32> {
    captures.get(index)?.as_str().parse().ok()
}

fn apply_meridiem(lowered: &str, hour: u32) -> u32 {
    if lowered.contains("pm") && hour < 12 {
        hour + 12
    } else if lowered.contains("am") && hour == 12 {
        0
    } else {
        hour
    }
}
