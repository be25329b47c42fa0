use serde::{Deserialize, Serialize};

use super::{TaskId, lenient};

/// Label shown for a task whose title is empty.
pub const NO_TITLE: &str = "(no title)";

/// A single to-do item.
///
/// This is the one schema used on both sides of the wire. Input is normalized
/// at the boundary: the title is also read from `description`, the completion
/// flag from `done` or `completed`. Output always uses `title` / `is_done`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireTask")]
pub struct Task {
    /// Identifier assigned by the server; stable across updates.
    pub id: TaskId,
    /// Short text describing the task.
    pub title: String,
    /// Completion flag, the only field the client mutates.
    pub is_done: bool,
    /// Creation time (RFC 3339) when the server reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Every spelling a backend may send. A payload may carry several at once.
#[derive(Deserialize)]
struct WireTask {
    id: TaskId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    is_done: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    done: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    completed: bool,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<WireTask> for Task {
    fn from(raw: WireTask) -> Self {
        Self {
            id: raw.id,
            title: raw.title.or(raw.description).unwrap_or_default(),
            is_done: raw.is_done || raw.done || raw.completed,
            created_at: raw.created_at,
        }
    }
}

impl Task {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_done: false,
            created_at: None,
        }
    }

    pub fn done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }

    /// Title for display, falling back to [`NO_TITLE`].
    pub fn label(&self) -> &str {
        if self.title.trim().is_empty() {
            NO_TITLE
        } else {
            &self.title
        }
    }

    /// `"Done"` or `"Open"`.
    pub fn status_label(&self) -> &'static str {
        if self.is_done { "Done" } else { "Open" }
    }
}

/// Trims a user supplied title; `None` when nothing is left.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_canonical_shape() {
        let json = r#"{"id":1,"title":"a","is_done":false,"created_at":"2025-01-01T00:00:00"}"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.id, TaskId::from(1));
        assert_eq!(task.title, "a");
        assert!(!task.is_done);
        assert_eq!(task.created_at.as_deref(), Some("2025-01-01T00:00:00"));
    }

    #[test]
    fn decodes_alternate_field_names() {
        let with_done: Task =
            serde_json::from_str(r#"{"id":"x","description":"walk","done":true}"#).unwrap();
        assert_eq!(with_done.title, "walk");
        assert!(with_done.is_done);

        let with_completed: Task =
            serde_json::from_str(r#"{"id":2,"title":"read","completed":true}"#).unwrap();
        assert!(with_completed.is_done);
    }

    #[test]
    fn decodes_payload_with_both_spellings() {
        let json = r#"[
            {"id":1,"title":"a","description":"long a","is_done":false,"completed":true},
            {"id":2,"description":"b","is_done":1,"done":false},
            {"id":3,"title":null,"description":"c","done":0,"completed":null}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();

        assert_eq!(tasks[0].title, "a");
        assert!(tasks[0].is_done);
        assert_eq!(tasks[1].title, "b");
        assert!(tasks[1].is_done);
        assert_eq!(tasks[2].title, "c");
        assert!(!tasks[2].is_done);
    }

    #[test]
    fn integer_and_null_flags() {
        let one: Task = serde_json::from_str(r#"{"id":1,"title":"a","is_done":1}"#).unwrap();
        assert!(one.is_done);

        let zero: Task = serde_json::from_str(r#"{"id":1,"title":"a","is_done":0}"#).unwrap();
        assert!(!zero.is_done);

        let null: Task = serde_json::from_str(r#"{"id":1,"title":"a","is_done":null}"#).unwrap();
        assert!(!null.is_done);

        let bad = serde_json::from_str::<Task>(r#"{"id":1,"title":"a","is_done":5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn missing_title_gets_placeholder_label() {
        let task: Task = serde_json::from_str(r#"{"id":1,"title":null}"#).unwrap();
        assert_eq!(task.title, "");
        assert_eq!(task.label(), NO_TITLE);
        assert_eq!(task.status_label(), "Open");
    }

    #[test]
    fn missing_id_is_rejected() {
        assert!(serde_json::from_str::<Task>(r#"{"title":"a"}"#).is_err());
    }

    #[test]
    fn encodes_canonical_names() {
        let task = Task::new(3, "x").done(true);
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":3,"title":"x","is_done":true}"#);
    }

    #[test]
    fn normalize_title_trims_and_rejects_blank() {
        assert_eq!(normalize_title("  milk "), Some("milk".to_string()));
        assert_eq!(normalize_title(""), None);
        assert_eq!(normalize_title(" \t\n"), None);
    }
}
