use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating or updating a task.
///
/// All three fields are required and must be non-empty. Status is free-form
/// text; the store does not constrain it to an enumeration.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1))]
    pub status: String,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4, generated app-side).
    pub id: Uuid,
    pub title: String,
    /// Nullable in the store even though creation always supplies it.
    pub description: Option<String>,
    pub status: String,
    /// Identifier of the user who owns the task.
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` and the owning `user_id`,
    /// with a fresh UUID and current timestamps.
    pub fn new(input: TaskInput, user_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: Some(input.description),
            status: input.status,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let input = TaskInput {
            title: "T".to_string(),
            description: "D".to_string(),
            status: "open".to_string(),
        };

        let task = Task::new(input, 1);
        assert_eq!(task.title, "T");
        assert_eq!(task.description.as_deref(), Some("D"));
        assert_eq!(task.status, "open");
        assert_eq!(task.user_id, 1);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_input_validation() {
        let valid_input = TaskInput {
            title: "T".to_string(),
            description: "D".to_string(),
            status: "open".to_string(),
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TaskInput {
            title: "".to_string(),
            description: "D".to_string(),
            status: "open".to_string(),
        };
        assert!(empty_title.validate().is_err());

        let empty_description = TaskInput {
            title: "T".to_string(),
            description: "".to_string(),
            status: "open".to_string(),
        };
        assert!(empty_description.validate().is_err());

        let empty_status = TaskInput {
            title: "T".to_string(),
            description: "D".to_string(),
            status: "".to_string(),
        };
        assert!(empty_status.validate().is_err());
    }

    #[test]
    fn test_each_task_gets_unique_id() {
        let make = || {
            Task::new(
                TaskInput {
                    title: "T".to_string(),
                    description: "D".to_string(),
                    status: "open".to_string(),
                },
                1,
            )
        };
        assert_ne!(make().id, make().id);
    }
}
