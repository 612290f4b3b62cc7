//! Task repository contract and SQLite implementation.

use crate::db::DbError;
use crate::model::task::{TaskCategory, TaskId, TaskItem, TaskPriority, TaskValidationError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    owner_uid,
    title,
    notes,
    due_at,
    created_at,
    is_completed,
    priority,
    category,
    calendar_event_identifier
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for owner-scoped task records.
pub trait TaskRepository {
    fn create_task(&self, task: &TaskItem) -> RepoResult<TaskId>;
    fn update_task(&self, task: &TaskItem) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<TaskItem>>;
    /// Newest `created_at` first.
    fn list_tasks(&self, owner_uid: &str) -> RepoResult<Vec<TaskItem>>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a connection returned by `db::open_db` or `db::open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &TaskItem) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                owner_uid,
                title,
                notes,
                due_at,
                created_at,
                is_completed,
                priority,
                category,
                calendar_event_identifier
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                task.id.to_string(),
                task.owner_uid.as_str(),
                task.title.as_str(),
                task.notes.as_deref(),
                task.due_date.map(|due| due.timestamp_millis()),
                task.created_at.timestamp_millis(),
                task.is_completed,
                task.priority.as_str(),
                task.category.as_str(),
                task.calendar_event_identifier.as_deref(),
            ],
        )?;

        Ok(task.id)
    }

    fn update_task(&self, task: &TaskItem) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                owner_uid = ?1,
                title = ?2,
                notes = ?3,
                due_at = ?4,
                is_completed = ?5,
                priority = ?6,
                category = ?7,
                calendar_event_identifier = ?8,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?9;",
            params![
                task.owner_uid.as_str(),
                task.title.as_str(),
                task.notes.as_deref(),
                task.due_date.map(|due| due.timestamp_millis()),
                task.is_completed,
                task.priority.as_str(),
                task.category.as_str(),
                task.calendar_event_identifier.as_deref(),
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }
        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<TaskItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_task_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_tasks(&self, owner_uid: &str) -> RepoResult<Vec<TaskItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE owner_uid = ?1
             ORDER BY created_at DESC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([owner_uid])?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<TaskItem> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = TaskPriority::ALL
        .into_iter()
        .find(|priority| priority.as_str() == priority_text)
        .ok_or_else(|| {
            RepoError::InvalidData(format!("invalid priority `{priority_text}` in tasks.priority"))
        })?;

    let category_text: String = row.get("category")?;
    let category = TaskCategory::ALL
        .into_iter()
        .find(|category| category.as_str() == category_text)
        .ok_or_else(|| {
            RepoError::InvalidData(format!("invalid category `{category_text}` in tasks.category"))
        })?;

    let due_date = match row.get::<_, Option<i64>>("due_at")? {
        Some(millis) => Some(millis_to_utc(millis, "due_at")?),
        None => None,
    };
    let created_at = millis_to_utc(row.get("created_at")?, "created_at")?;

    let task = TaskItem {
        id,
        title: row.get("title")?,
        notes: row.get("notes")?,
        due_date,
        created_at,
        is_completed: row.get("is_completed")?,
        priority,
        category,
        calendar_event_identifier: row.get("calendar_event_identifier")?,
        owner_uid: row.get("owner_uid")?,
    };
    task.validate()?;
    Ok(task)
}

fn millis_to_utc(millis: i64, column: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        RepoError::InvalidData(format!("out-of-range timestamp `{millis}` in tasks.{column}"))
    })
}
