use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use std::cmp::Ordering;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Input structure for creating a task.
/// Also used as the merged result of a partial update, so both paths share one set of rules.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Required, between 1 and 200 characters and not blank.
    #[serde(default)]
    #[validate(length(min = 1, max = 200), custom = "not_blank")]
    pub title: String,

    /// Optional free-form description, at most 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Optional calendar due date (`YYYY-MM-DD`).
    pub due_date: Option<NaiveDate>,

    /// Optional short label such as "Work" or "Home".
    #[validate(length(max = 50))]
    pub category: Option<String>,
}

/// A partial set of task fields.
///
/// A field that is absent stays unchanged. For the optional fields an explicit
/// `null` clears the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
    /// Identifier of the user who owns the task. Set once at creation.
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters accepted when listing tasks.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Search term matched against titles and descriptions (case-insensitive).
    pub q: Option<String>,
}

impl Task {
    /// Creates a new `Task` owned by `owner_id`.
    pub fn new(input: TaskInput, owner_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: non_empty(input.description),
            due_date: input.due_date,
            category: non_empty(input.category),
            user_id: owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }

    /// Overwrites the editable fields. The owner and creation time never change.
    pub fn revise(&mut self, input: TaskInput) {
        self.title = input.title;
        self.description = non_empty(input.description);
        self.due_date = input.due_date;
        self.category = non_empty(input.category);
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match against the title or the description.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .map_or(false, |description| description.to_lowercase().contains(&needle))
    }

    /// Listing order: due date ascending with undated tasks last, then creation time, then id.
    pub fn listing_order(&self, other: &Self) -> Ordering {
        let by_due = match (self.due_date, other.due_date) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_due
            .then_with(|| self.created_at.cmp(&other.created_at))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl TaskUpdate {
    /// Applies the supplied fields on top of `task`, producing the full set to validate.
    pub fn merge(self, task: &Task) -> TaskInput {
        TaskInput {
            title: self.title.unwrap_or_else(|| task.title.clone()),
            description: self.description.unwrap_or_else(|| task.description.clone()),
            due_date: self.due_date.unwrap_or(task.due_date),
            category: self.category.unwrap_or_else(|| task.category.clone()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("must not be blank"));
        return Err(error);
    }
    Ok(())
}

// Distinguishes an explicit `null` (Some(None)) from an absent field (None, via `default`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
