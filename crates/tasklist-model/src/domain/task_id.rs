use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned task identifier.
///
/// The client treats it as opaque. Backends hand out either integers or strings,
/// so both shapes are accepted and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Num(u64),
    Text(String),
}

impl TaskId {
    /// Returns the numeric form, if this id is (or spells) an unsigned integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            TaskId::Num(n) => Some(*n),
            TaskId::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Num(n) => write!(f, "{n}"),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TaskId {
    fn from(n: u64) -> Self {
        TaskId::Num(n)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId::Text(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::Text(s.to_string())
    }
}
