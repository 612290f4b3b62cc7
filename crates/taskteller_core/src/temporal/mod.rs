//! Temporal resolution engine.
//!
//! # Responsibility
//! - Resolve date phrases into calendar dates.
//! - Resolve time phrases into clock times.
//! - Compose both into an absolute timestamp in a caller-provided time zone.
//!
//! # Invariants
//! - Every resolver is pure: the reference instant is always an argument.
//! - An unrecognized phrase resolves to `None`, never to an error.
//! - Composition goes through the time zone's calendar, not raw arithmetic.

pub mod combine;
pub mod date;
pub mod time;

pub use combine::{combine, start_of_day};
pub use date::{resolve_date, CalendarDate};
pub use time::{resolve_time, ClockTime};
