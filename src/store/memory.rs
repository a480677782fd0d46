//! A task store that lives in memory, mostly useful for tests

use std::error::Error;

use async_trait::async_trait;

use crate::mock_behaviour::MockBehaviour;
use crate::task::Task;
use super::TaskStore;

/// A [`TaskStore`] that keeps the last saved collection in memory.
///
/// Its [`MockBehaviour`] can make loads or saves fail on purpose.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    saved: Option<Vec<Task>>,
    save_count: usize,
    behaviour: MockBehaviour,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds some tasks, as if they had been saved by a previous run
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            saved: Some(tasks),
            ..Self::default()
        }
    }

    pub fn with_behaviour(mut self, behaviour: MockBehaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    pub fn behaviour_mut(&mut self) -> &mut MockBehaviour {
        &mut self.behaviour
    }

    /// The last collection that was successfully saved, if any
    pub fn saved(&self) -> Option<&[Task]> {
        self.saved.as_deref()
    }

    /// How many saves succeeded
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn load(&mut self) -> Result<Vec<Task>, Box<dyn Error>> {
        self.behaviour.can_load()?;
        Ok(self.saved.clone().unwrap_or_default())
    }

    async fn save(&mut self, tasks: &[Task]) -> Result<(), Box<dyn Error>> {
        self.behaviour.can_save()?;
        self.saved = Some(tasks.to_vec());
        self.save_count += 1;
        Ok(())
    }
}
