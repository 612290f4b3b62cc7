//! Response decoding chain for language-model replies.
//!
//! # Responsibility
//! - Strip markdown code fences around a reply.
//! - Interpret the reply as a multi-task object, then as a single task
//!   object, then fall back to the original user input.
//!
//! # Invariants
//! - Strategies are tried in the fixed order of `STRUCTURAL_STRATEGIES`.
//! - The chain never fails and always yields at least one fragment.
//! - Intermediate failures are logged, never propagated.

use crate::logging::log_excerpt;
use crate::model::fragment::RawTaskFragment;
use log::{debug, warn};
use serde::Deserialize;
use std::fmt::{Display, Formatter};

/// Decoding strategy that produced a set of fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Object with a `tasks` array.
    MultiTask,
    /// One flat task object.
    SingleTask,
    /// Terminal fallback: the original user input becomes the title.
    OriginalInput,
}

impl DecodeStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MultiTask => "multi_task",
            Self::SingleTask => "single_task",
            Self::OriginalInput => "original_input",
        }
    }
}

/// Reason a structural strategy handed over to the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The text is not valid JSON for the expected shape.
    Malformed(String),
    /// The `tasks` array decoded but held no task.
    EmptyTaskList,
}

impl Display for DecodeFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed: {message}"),
            Self::EmptyTaskList => write!(f, "empty task list"),
        }
    }
}

/// Outcome of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStep {
    Decoded(Vec<RawTaskFragment>),
    Next(DecodeFailure),
}

/// Fragments decoded from one reply, with the strategy that won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReply {
    pub strategy: DecodeStrategy,
    /// Never empty.
    pub fragments: Vec<RawTaskFragment>,
}

type StrategyFn = fn(&str) -> DecodeStep;

const STRUCTURAL_STRATEGIES: &[(DecodeStrategy, StrategyFn)] = &[
    (DecodeStrategy::MultiTask, decode_multi_task),
    (DecodeStrategy::SingleTask, decode_single_task),
];

/// Wire shape of one task object in a model reply.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskPayload {
    title: String,
    due_date: Option<String>,
    due_time: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MultiTaskPayload {
    tasks: Vec<TaskPayload>,
}

impl From<TaskPayload> for RawTaskFragment {
    fn from(payload: TaskPayload) -> Self {
        Self {
            title: payload.title,
            due_date_phrase: payload.due_date,
            due_time_phrase: payload.due_time,
            priority_phrase: payload.priority,
            category_phrase: payload.category,
            notes: payload.notes,
        }
    }
}

/// Decodes a model reply into task fragments.
///
/// `user_input` is the text the user originally spoke or typed; it becomes
/// the single fragment title when no structural strategy succeeds.
pub fn decode_reply(reply: &str, user_input: &str) -> DecodedReply {
    let cleaned = strip_code_fences(reply);

    for (strategy, decode) in STRUCTURAL_STRATEGIES {
        match decode(cleaned) {
            DecodeStep::Decoded(fragments) => {
                debug!(
                    "event=decode_reply module=extract status=ok strategy={} fragments={}",
                    strategy.as_str(),
                    fragments.len()
                );
                return DecodedReply {
                    strategy: *strategy,
                    fragments,
                };
            }
            DecodeStep::Next(failure) => {
                debug!(
                    "event=decode_reply module=extract status=next strategy={} reason={}",
                    strategy.as_str(),
                    log_excerpt(&failure.to_string())
                );
            }
        }
    }

    warn!(
        "event=decode_reply module=extract status=fallback strategy={} reply_chars={} reply_excerpt={}",
        DecodeStrategy::OriginalInput.as_str(),
        reply.chars().count(),
        log_excerpt(reply)
    );
    DecodedReply {
        strategy: DecodeStrategy::OriginalInput,
        fragments: vec![RawTaskFragment::titled(user_input)],
    }
}

/// Attempts the multi-task shape: `{"tasks": [ {...}, ... ]}`.
pub fn decode_multi_task(cleaned: &str) -> DecodeStep {
    match serde_json::from_str::<MultiTaskPayload>(cleaned) {
        Ok(payload) if payload.tasks.is_empty() => DecodeStep::Next(DecodeFailure::EmptyTaskList),
        Ok(payload) => {
            DecodeStep::Decoded(payload.tasks.into_iter().map(RawTaskFragment::from).collect())
        }
        Err(err) => DecodeStep::Next(DecodeFailure::Malformed(err.to_string())),
    }
}

/// Attempts the single flat task shape: `{"title": ..., ...}`.
pub fn decode_single_task(cleaned: &str) -> DecodeStep {
    match serde_json::from_str::<TaskPayload>(cleaned) {
        Ok(payload) => DecodeStep::Decoded(vec![payload.into()]),
        Err(err) => DecodeStep::Next(DecodeFailure::Malformed(err.to_string())),
    }
}

/// Removes surrounding triple-backtick fences (with an optional language
/// tag directly after the opening fence) and surrounding whitespace.
pub fn strip_code_fences(reply: &str) -> &str {
    let mut text = reply.trim();

    if let Some(rest) = text.strip_prefix("```") {
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        text = &rest[tag_len..];
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}
