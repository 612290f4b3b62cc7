//! Task use-case service.
//!
//! # Responsibility
//! - Save a batch of resolved tasks for one owner.
//! - Toggle completion and expose the dashboard views over an owner's tasks.
//!
//! # Invariants
//! - Batch saves are per item: a failure is recorded and never undoes or
//!   blocks the other items.
//! - View filters take the reference instant explicitly.

use crate::model::task::{ResolvedTask, TaskId, TaskItem};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use chrono::{DateTime, TimeZone, Utc};
use log::{info, warn};

/// Per-item result of a batch save.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(TaskId),
    Failed { task_id: TaskId, error: RepoError },
}

impl SaveOutcome {
    pub fn task_id(&self) -> TaskId {
        match self {
            Self::Saved(task_id) | Self::Failed { task_id, .. } => *task_id,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Outcomes of one batch save, in input order.
#[derive(Debug, Default)]
pub struct BatchSaveReport {
    pub outcomes: Vec<SaveOutcome>,
}

impl BatchSaveReport {
    pub fn saved_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_saved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.saved_count()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Use-case wrapper around a task repository.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves every task for `owner_uid`, independently of each other.
    pub fn save_all(
        &self,
        owner_uid: &str,
        tasks: Vec<ResolvedTask>,
        created_at: DateTime<Utc>,
    ) -> BatchSaveReport {
        let outcomes: Vec<SaveOutcome> = tasks
            .into_iter()
            .map(|task| {
                let item = task.into_task_item(owner_uid, created_at);
                let task_id = item.id;
                match self.repo.create_task(&item) {
                    Ok(id) => SaveOutcome::Saved(id),
                    Err(error) => {
                        warn!(
                            "event=task_save module=service status=error task_id={task_id} error={error}"
                        );
                        SaveOutcome::Failed { task_id, error }
                    }
                }
            })
            .collect();

        let report = BatchSaveReport { outcomes };
        info!(
            "event=task_batch_save module=service status={} saved={} failed={}",
            if report.is_complete_success() { "ok" } else { "partial" },
            report.saved_count(),
            report.failed_count()
        );
        report
    }

    /// Flips `is_completed` and persists the change.
    pub fn toggle_completion(&self, id: TaskId) -> RepoResult<TaskItem> {
        let mut task = self.repo.get_task(id)?.ok_or(RepoError::NotFound(id))?;
        task.is_completed = !task.is_completed;
        self.repo.update_task(&task)?;
        Ok(task)
    }

    /// Incomplete tasks due on `now`'s calendar day.
    pub fn today<Tz: TimeZone>(
        &self,
        owner_uid: &str,
        now: &DateTime<Tz>,
    ) -> RepoResult<Vec<TaskItem>> {
        self.filtered(owner_uid, |task| task.is_due_today(now) && !task.is_completed)
    }

    pub fn overdue<Tz: TimeZone>(
        &self,
        owner_uid: &str,
        now: &DateTime<Tz>,
    ) -> RepoResult<Vec<TaskItem>> {
        self.filtered(owner_uid, |task| task.is_overdue(now))
    }

    /// Incomplete tasks due after `now`'s calendar day, soonest first.
    pub fn upcoming<Tz: TimeZone>(
        &self,
        owner_uid: &str,
        now: &DateTime<Tz>,
    ) -> RepoResult<Vec<TaskItem>> {
        let tz = now.timezone();
        let today = now.date_naive();
        let mut tasks = self.filtered(owner_uid, |task| {
            !task.is_completed
                && task
                    .due_date
                    .is_some_and(|due| due.with_timezone(&tz).date_naive() > today)
        })?;
        tasks.sort_by_key(|task| task.due_date);
        Ok(tasks)
    }

    pub fn completed(&self, owner_uid: &str) -> RepoResult<Vec<TaskItem>> {
        self.filtered(owner_uid, |task| task.is_completed)
    }

    fn filtered<F>(&self, owner_uid: &str, keep: F) -> RepoResult<Vec<TaskItem>>
    where
        F: Fn(&TaskItem) -> bool,
    {
        let mut tasks = self.repo.list_tasks(owner_uid)?;
        tasks.retain(|task| keep(task));
        Ok(tasks)
    }
}
