//! Core domain logic for TaskTeller.
//!
//! Turns a language-model reply describing one or more tasks into resolved
//! task records with absolute due timestamps. This crate is the single
//! source of truth for decoding precedence and date/time resolution rules.

pub mod db;
pub mod extract;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod temporal;

pub use extract::{
    build_daily_summary_message, build_extraction_prompt, build_user_message, decode_reply,
    extract_tasks, DecodeStrategy, DecodedReply, DAILY_SUMMARY_PROMPT,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::fragment::RawTaskFragment;
pub use model::task::{
    ResolvedTask, TaskCategory, TaskId, TaskItem, TaskPriority, TaskValidationError,
};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::{BatchSaveReport, SaveOutcome, TaskService};
pub use temporal::{combine, resolve_date, resolve_time, CalendarDate, ClockTime};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
