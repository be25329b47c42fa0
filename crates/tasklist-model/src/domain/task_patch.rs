use serde::{Deserialize, Serialize};

use super::{Task, lenient};

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
}

/// Partial update of a task.
///
/// Fields left as `None` are not serialized and stay unchanged on the server.
/// Decoding accepts the same alternate names and flag encodings as [`Task`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WirePatch")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

#[derive(Deserialize)]
struct WirePatch {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    is_done: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    done: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    completed: Option<bool>,
}

impl From<WirePatch> for TaskPatch {
    fn from(raw: WirePatch) -> Self {
        let flags = [raw.is_done, raw.done, raw.completed];
        let is_done = flags
            .iter()
            .any(Option::is_some)
            .then(|| flags.contains(&Some(true)));

        Self {
            title: raw.title.or(raw.description),
            is_done,
        }
    }
}

impl TaskPatch {
    /// Patch inverting the completion flag of `task`.
    pub fn toggle(task: &Task) -> Self {
        Self {
            title: None,
            is_done: Some(!task.is_done),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.is_done.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_inverts_flag_only() {
        let open = Task::new(1, "a");
        let patch = TaskPatch::toggle(&open);
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"is_done":true}"#);

        let done = Task::new(1, "a").done(true);
        assert_eq!(TaskPatch::toggle(&done).is_done, Some(false));
    }

    #[test]
    fn empty_patch() {
        assert!(TaskPatch::default().is_empty());
        assert_eq!(serde_json::to_string(&TaskPatch::default()).unwrap(), "{}");

        let parsed: TaskPatch = serde_json::from_str(r#"{"title":"b"}"#).unwrap();
        assert!(!parsed.is_empty());
        assert_eq!(parsed.is_done, None);
    }

    #[test]
    fn decodes_alternate_names_and_integer_flags() {
        let done: TaskPatch = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert_eq!(done.is_done, Some(true));

        let one: TaskPatch = serde_json::from_str(r#"{"is_done":1}"#).unwrap();
        assert_eq!(one.is_done, Some(true));

        let zero: TaskPatch = serde_json::from_str(r#"{"completed":0}"#).unwrap();
        assert_eq!(zero.is_done, Some(false));

        let both: TaskPatch =
            serde_json::from_str(r#"{"is_done":false,"completed":true,"description":"x"}"#)
                .unwrap();
        assert_eq!(both.is_done, Some(true));
        assert_eq!(both.title.as_deref(), Some("x"));

        let null: TaskPatch = serde_json::from_str(r#"{"is_done":null}"#).unwrap();
        assert!(null.is_empty());

        assert!(serde_json::from_str::<TaskPatch>(r#"{"is_done":"yes"}"#).is_err());
    }
}
