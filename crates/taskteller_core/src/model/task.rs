//! Resolved task model and its persisted projection.
//!
//! # Responsibility
//! - Define the fixed priority/category vocabularies and their loose matching.
//! - Define `ResolvedTask`, the output of the extraction pipeline.
//! - Define `TaskItem`, the owner-scoped record handed to persistence.
//!
//! # Invariants
//! - Unknown priority/category text maps to the default, never an error.
//! - `TaskItem::validate()` rejects nil IDs and blank owners.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a resolved or persisted task.
pub type TaskId = Uuid;

/// Priority levels for tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::Low, Self::Medium, Self::High];

    /// Matches free text case-insensitively against the known values.
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        let normalized = phrase.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == normalized)
    }

    /// Lowercase wire/storage value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Category used to organize tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Work,
    Personal,
    School,
    Health,
    Shopping,
    #[default]
    Other,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 6] = [
        Self::Work,
        Self::Personal,
        Self::School,
        Self::Health,
        Self::Shopping,
        Self::Other,
    ];

    /// Matches free text case-insensitively against the known values.
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        let normalized = phrase.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
    }

    /// Lowercase wire/storage value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::School => "school",
            Self::Health => "health",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::School => "School",
            Self::Health => "Health",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }
}

/// Task produced by the extraction pipeline.
///
/// `due_date` keeps the UTC offset of the reference instant it was resolved
/// against, so callers can render it in the user's local calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTask {
    pub id: TaskId,
    pub title: String,
    pub due_date: Option<DateTime<FixedOffset>>,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub notes: Option<String>,
}

impl ResolvedTask {
    /// Creates a task with a generated ID, no due date and default
    /// priority/category.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            due_date: None,
            priority: TaskPriority::default(),
            category: TaskCategory::default(),
            notes: None,
        }
    }

    /// Projects this task into an owner-scoped record ready for persistence.
    ///
    /// The task ID is preserved so a saved record can be traced back to the
    /// extraction result it came from.
    pub fn into_task_item(
        self,
        owner_uid: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> TaskItem {
        TaskItem {
            id: self.id,
            title: self.title,
            notes: self.notes,
            due_date: self.due_date.map(|due| due.with_timezone(&Utc)),
            created_at,
            is_completed: false,
            priority: self.priority,
            category: self.category,
            calendar_event_identifier: None,
            owner_uid: owner_uid.into(),
        }
    }
}

/// Validation failures for `TaskItem` invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    BlankOwner,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::BlankOwner => write!(f, "task owner_uid must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Persisted, owner-scoped task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: TaskId,
    pub title: String,
    pub notes: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub is_completed: bool,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    /// Identifier of a linked calendar event, set by the calendar collaborator.
    pub calendar_event_identifier: Option<String>,
    pub owner_uid: String,
}

impl TaskItem {
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.owner_uid.trim().is_empty() {
            return Err(TaskValidationError::BlankOwner);
        }
        Ok(())
    }

    /// Due strictly before `now` and not yet completed.
    pub fn is_overdue<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        match self.due_date {
            Some(due) if !self.is_completed => due < now.with_timezone(&Utc),
            _ => false,
        }
    }

    /// Due on the calendar day of `now`, evaluated in `now`'s time zone.
    pub fn is_due_today<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.due_date.is_some_and(|due| {
            due.with_timezone(&now.timezone()).date_naive() == now.date_naive()
        })
    }

    /// Due within the next seven days, `now` included.
    pub fn is_due_this_week<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let start = now.with_timezone(&Utc);
        let end = start + Duration::days(7);
        self.due_date.is_some_and(|due| due >= start && due <= end)
    }
}
