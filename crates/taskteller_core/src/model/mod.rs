//! Domain model for extracted and persisted tasks.
//!
//! # Responsibility
//! - Define the transient fragment shape produced by reply decoding.
//! - Define the resolved task and its persisted projection.
//!
//! # Invariants
//! - `priority` and `category` are always one of the fixed enum values.
//! - Every resolved task carries a stable `TaskId` generated at construction.

pub mod fragment;
pub mod task;
