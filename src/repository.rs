//! The in-memory collection of tasks

use std::collections::HashSet;

use crate::error::PlannerError;
use crate::task::{Task, TaskId};

/// The authoritative, ordered collection of tasks.
///
/// Tasks are keyed by their [`TaskId`] only: two tasks with the same text on the same day are two distinct tasks.
/// Insertion order is kept, since it decides where tasks land in the grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskRepository {
    tasks: Vec<Task>,
    /// Ids of tasks deleted during this session. They cannot be used again
    retired: HashSet<TaskId>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from tasks read from a store.
    ///
    /// Tasks sharing an id with a previous one are given a fresh id, so that no task is lost.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut repository = Self::new();
        for mut task in tasks {
            if repository.contains(task.id()) {
                let fresh = TaskId::random();
                log::warn!("Duplicate task id {} found in store, re-keying \"{}\" as {}", task.id(), task.text(), fresh);
                task = Task::new_with_parameters(fresh, task.text().to_string(), task.date().to_string(), task.time().to_string(), task.priority());
            }
            repository.tasks.push(task);
        }
        repository
    }

    /// Append a task. Its id must never have been used before.
    pub fn add(&mut self, task: Task) -> Result<(), PlannerError> {
        if self.contains(task.id()) || self.retired.contains(task.id()) {
            return Err(PlannerError::DuplicateId(*task.id()));
        }
        log::debug!("Adding task {} on {}", task.id(), task.date());
        self.tasks.push(task);
        Ok(())
    }

    /// Replace the task that has the same id, keeping its position
    pub fn edit(&mut self, task: Task) -> Result<(), PlannerError> {
        match self.tasks.iter_mut().find(|t| t.id() == task.id()) {
            None => Err(PlannerError::NotFound(*task.id())),
            Some(existing) => {
                log::debug!("Editing task {}", task.id());
                *existing = task;
                Ok(())
            }
        }
    }

    /// Remove a task. Returns whether something was actually removed
    pub fn delete(&mut self, id: &TaskId) -> bool {
        match self.tasks.iter().position(|t| t.id() == id) {
            None => false,
            Some(index) => {
                log::debug!("Deleting task {}", id);
                self.tasks.remove(index);
                self.retired.insert(*id);
                true
            }
        }
    }

    /// Every task, in insertion order
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
