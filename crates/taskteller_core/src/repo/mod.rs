//! Persistence boundary for resolved tasks.
//!
//! # Responsibility
//! - Define the repository contract the persistence collaborator implements.
//! - Provide the SQLite reference implementation.
//!
//! # Invariants
//! - Write paths call `TaskItem::validate()` before any SQL mutation.
//! - Read paths reject invalid persisted rows instead of masking them.

pub mod task_repo;
