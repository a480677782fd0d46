//! Utilities to let a display follow what the planner does

use std::fmt::{Display, Error, Formatter};

/// Something that happened in the planner
#[derive(Clone, Debug, PartialEq)]
pub enum PlannerEvent {
    /// Nothing has been loaded yet
    NotStarted,
    /// Tasks have been loaded. `degraded` is set when the store could not be read and the planner started empty
    Loaded { tasks: usize, degraded: bool },
    /// The grid has been rebuilt and can be displayed again
    GridRecomputed { week_offset: i32, row_count: usize },
    /// A change was applied in memory, but could not be saved
    SaveFailed { reason: String },
}

impl Display for PlannerEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            PlannerEvent::NotStarted => write!(f, "Not started"),
            PlannerEvent::Loaded { tasks, degraded } => match degraded {
                false => write!(f, "Loaded {} tasks", tasks),
                true => write!(f, "Unable to read the saved tasks, starting empty"),
            },
            PlannerEvent::GridRecomputed { week_offset, row_count } => write!(f, "Week {:+} ready ({} rows)", week_offset, row_count),
            PlannerEvent::SaveFailed { reason } => write!(f, "Unable to save tasks: {}", reason),
        }
    }
}

impl Default for PlannerEvent {
    fn default() -> Self {
        Self::NotStarted
    }
}


/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<PlannerEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<PlannerEvent>;

/// Create a feeback channel, that can be used to retrieve the latest event of a planner
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(PlannerEvent::default())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(PlannerEvent::GridRecomputed { week_offset: -2, row_count: 10 }.to_string(), "Week -2 ready (10 rows)");
        assert_eq!(PlannerEvent::GridRecomputed { week_offset: 0, row_count: 13 }.to_string(), "Week +0 ready (13 rows)");
        assert_eq!(PlannerEvent::Loaded { tasks: 3, degraded: false }.to_string(), "Loaded 3 tasks");
    }
}
