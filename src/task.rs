//! Tasks placed on calendar days

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// How important a task is.
///
/// This only changes the colour a task is rendered with, it never affects where it is placed.
/// It is persisted as an integer (`0`, `1` or `2`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> u8 {
        match priority {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Priority::Low),
            1 => Ok(Priority::Medium),
            2 => Ok(Priority::High),
            other => Err(format!("Invalid priority level {}", other)),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}


/// The identity of a task.
///
/// It is assigned once when the task is created and never changes afterwards, whatever is edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId {
    content: Uuid,
}

impl TaskId {
    /// Generate a random TaskId.
    pub fn random() -> Self {
        Self { content: Uuid::new_v4() }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.content
    }

    /// The first characters of the id, handy to designate a task in a terminal
    pub fn short(&self) -> String {
        self.to_string().chars().take(8).collect()
    }
}

impl From<Uuid> for TaskId {
    fn from(uuid: Uuid) -> Self {
        Self { content: uuid }
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let u = Uuid::parse_str(s)?;
        Ok(Self::from(u))
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content.to_hyphenated())
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


/// A short textual task, placed on a given day
///
/// The serialized form of this struct is the persisted record of a task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The text displayed in the grid
    text: String,
    /// The day this task belongs to, as a canonical label (e.g. `SUNDAY 8-20-2023`, see [`crate::week`])
    date: String,
    /// A label from the [time slot catalog](crate::time_slot)
    time: String,
    priority: Priority,
    id: TaskId,
}

impl Task {
    /// Create a brand new Task.
    /// This will pick a new (random) task ID.
    pub fn new(text: String, date: String, time: String, priority: Priority) -> Self {
        Self::new_with_parameters(TaskId::random(), text, date, time, priority)
    }

    /// Create a Task with a known id, e.g. the replacement of an existing task
    pub fn new_with_parameters(id: TaskId, text: String, date: String, time: String, priority: Priority) -> Self {
        Self { id, text, date, time, priority }
    }

    pub fn id(&self) -> &TaskId         { &self.id       }
    pub fn text(&self) -> &str          { &self.text     }
    pub fn date(&self) -> &str          { &self.date     }
    pub fn time(&self) -> &str          { &self.time     }
    pub fn priority(&self) -> Priority  { self.priority  }

    pub fn set_text(&mut self, new_text: String) {
        self.text = new_text;
    }

    /// Move this task to another day
    pub fn set_date(&mut self, new_date: String) {
        self.date = new_date;
    }

    pub fn set_time(&mut self, new_time: String) {
        self.time = new_time;
    }

    pub fn set_priority(&mut self, new_priority: Priority) {
        self.priority = new_priority;
    }
}
