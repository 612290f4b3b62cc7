//! Extraction pipeline from model reply to resolved tasks.
//!
//! # Responsibility
//! - Decode a raw model reply into task fragments.
//! - Resolve every fragment into a `ResolvedTask`.
//!
//! # Invariants
//! - The pipeline is pure and holds no shared state; safe to call
//!   concurrently from independent requests.
//! - Output order matches fragment order and is never empty.

pub mod builder;
pub mod decode;
pub mod prompt;

pub use builder::resolve_due_date;
pub use decode::{decode_reply, DecodeFailure, DecodeStep, DecodeStrategy, DecodedReply};
pub use prompt::{
    build_daily_summary_message, build_extraction_prompt, build_user_message, DAILY_SUMMARY_PROMPT,
};

use crate::model::task::ResolvedTask;
use chrono::{DateTime, TimeZone};
use log::info;
use std::time::Instant;

/// Extracts resolved tasks from a model reply.
///
/// # Contract
/// - `reply` is the raw model text; `user_input` is the original user text.
/// - `now` is the reference instant for relative date phrases.
/// - Returns at least one task; when the reply cannot be decoded the single
///   task is titled with `user_input`.
pub fn extract_tasks<Tz: TimeZone>(
    reply: &str,
    user_input: &str,
    now: &DateTime<Tz>,
) -> Vec<ResolvedTask> {
    let started_at = Instant::now();
    let decoded = decode_reply(reply, user_input);

    let tasks: Vec<ResolvedTask> = decoded
        .fragments
        .into_iter()
        .map(|fragment| ResolvedTask::from_fragment(fragment, now))
        .collect();

    info!(
        "event=extract_tasks module=extract status=ok strategy={} tasks={} dated={} duration_ms={}",
        decoded.strategy.as_str(),
        tasks.len(),
        tasks.iter().filter(|task| task.due_date.is_some()).count(),
        started_at.elapsed().as_millis()
    );
    tasks
}
