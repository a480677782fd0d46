//! This module ties the task collection, its store and the week grid together
//!
//! Every change goes through a [`Planner`]: it is validated, applied to the collection, saved, and the grid is rebuilt
//! before the call returns. Mutations need `&mut Planner`, so there is a single writer at any time.

use chrono::NaiveDate;

use crate::cell::{decode, CellCodec};
use crate::error::PlannerError;
use crate::grid::{Grid, GridPlacer};
use crate::repository::TaskRepository;
use crate::settings::Settings;
use crate::store::TaskStore;
use crate::task::{Task, TaskId};
use crate::time_slot::is_valid_slot;
use crate::week::Week;

pub mod feedback;
use feedback::{FeedbackSender, PlannerEvent};

/// What happened to a change once applied.
///
/// A change is never rolled back, even when it could not be saved.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeOutcome {
    task_id: TaskId,
    save_error: Option<PlannerError>,
}

impl ChangeOutcome {
    /// The task that was added, edited or deleted
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Whether the whole collection was saved after this change
    pub fn is_saved(&self) -> bool {
        self.save_error.is_none()
    }

    /// The [`PlannerError::PersistenceFailure`] this change could not be saved because of
    pub fn save_error(&self) -> Option<&PlannerError> {
        self.save_error.as_ref()
    }
}


/// A week planner: a collection of tasks, persisted in a [`TaskStore`], and displayed one week at a time
#[derive(Debug)]
pub struct Planner<S: TaskStore> {
    store: S,
    repository: TaskRepository,
    placer: GridPlacer,
    week_offset: i32,
    grid: Grid,
    /// Gives the current day. The displayed week is always computed relative to it
    clock: fn() -> NaiveDate,
    load_error: Option<PlannerError>,
    feedback_channel: Option<FeedbackSender>,
}

impl<S: TaskStore> Planner<S> {
    /// Load the tasks of a store, and display the current week.
    ///
    /// This never fails: in case the store cannot be read, the planner starts with no task.
    pub async fn load(store: S, settings: &Settings) -> Self {
        Self::load_with_clock(store, settings, crate::week::today).await
    }

    /// Same as [`Self::load`], but "today" is given by `clock` instead of the local clock
    pub async fn load_with_clock(mut store: S, settings: &Settings, clock: fn() -> NaiveDate) -> Self {
        let (tasks, load_error) = match store.load().await {
            Ok(tasks) => (tasks, None),
            Err(err) => {
                log::warn!("Unable to load tasks: {}. Starting with an empty planner", err);
                (Vec::new(), Some(PlannerError::PersistenceFailure(err.to_string())))
            },
        };
        let repository = TaskRepository::from_tasks(tasks);
        log::info!("Loaded {} tasks", repository.len());

        let placer = GridPlacer::new(settings.grid_layout(), CellCodec::new(settings.palette.clone()));
        let grid = match Week::containing(clock(), 0) {
            Some(week) => placer.place(&week, repository.all()),
            None => {
                log::error!("The current week is out of the supported date range");
                placer.blank(0)
            },
        };

        Self {
            store,
            repository,
            placer,
            week_offset: 0,
            grid,
            clock,
            load_error,
            feedback_channel: None,
        }
    }

    /// Send [`PlannerEvent`]s to a display. The current state is sent right away
    pub fn with_feedback(mut self, channel: FeedbackSender) -> Self {
        self.feedback_channel = Some(channel);
        self.feedback(PlannerEvent::Loaded { tasks: self.repository.len(), degraded: self.load_error.is_some() });
        self
    }

    /// Why the store could not be read at startup, if it could not
    pub fn load_error(&self) -> Option<&PlannerError> {
        self.load_error.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Every task, in insertion order
    pub fn tasks(&self) -> &[Task] {
        self.repository.all()
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.repository.get(id)
    }

    pub fn week_offset(&self) -> i32 {
        self.week_offset
    }

    /// The displayed week, computed anew from the current day.
    /// `None` if the clock has moved it out of the supported date range
    pub fn week(&self) -> Option<Week> {
        Week::containing((self.clock)(), self.week_offset)
    }

    /// The grid of the displayed week, as of the latest change or navigation
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The task displayed at a given cell, if any
    pub fn task_at(&self, row: usize, column: usize) -> Option<&Task> {
        let id = self.grid.task_id_at(row, column)?;
        self.repository.get(id)
    }

    /// Find the task a rendered cell comes from. Only meaningful for cells of the current grid
    pub fn resolve_rendered(&self, rendered: &str) -> Result<&Task, PlannerError> {
        let id = decode(rendered)?;
        self.repository.get(&id).ok_or(PlannerError::NotFound(id))
    }

    /// Where a task is in the current grid, as `(row, column)`
    pub fn position_of(&self, id: &TaskId) -> Option<(usize, usize)> {
        self.grid.position_of(id)
    }

    /// Add a new task, on a day of the displayed week
    pub async fn add(&mut self, task: Task) -> Result<ChangeOutcome, PlannerError> {
        self.validate(&task)?;
        let id = *task.id();
        self.repository.add(task)?;
        Ok(self.commit(id).await)
    }

    /// Replace the task that has the same id. The replacement may be on another day of the displayed week
    pub async fn edit(&mut self, task: Task) -> Result<ChangeOutcome, PlannerError> {
        if self.repository.contains(task.id()) == false {
            return Err(PlannerError::NotFound(*task.id()));
        }
        self.validate(&task)?;
        let id = *task.id();
        self.repository.edit(task)?;
        Ok(self.commit(id).await)
    }

    /// Delete a task.
    ///
    /// Deleting an unknown id does nothing (nothing is saved and the grid is left as is), and returns `None`
    pub async fn delete(&mut self, id: &TaskId) -> Option<ChangeOutcome> {
        if self.repository.delete(id) == false {
            log::debug!("No task {} to delete", id);
            return None;
        }
        Some(self.commit(*id).await)
    }

    /// Display the week `offset` weeks away from the current one.
    ///
    /// A week out of the supported date range is rejected, and the previous week stays displayed.
    pub fn navigate(&mut self, offset: i32) -> Result<(), PlannerError> {
        let week = Week::containing((self.clock)(), offset)
            .ok_or_else(|| out_of_range(offset))?;
        self.week_offset = offset;
        self.rebuild(&week);
        Ok(())
    }

    pub fn next_week(&mut self) -> Result<(), PlannerError> {
        let offset = self.week_offset.checked_add(1).ok_or_else(|| out_of_range(self.week_offset))?;
        self.navigate(offset)
    }

    pub fn previous_week(&mut self) -> Result<(), PlannerError> {
        let offset = self.week_offset.checked_sub(1).ok_or_else(|| out_of_range(self.week_offset))?;
        self.navigate(offset)
    }

    /// Display the current week
    pub fn go_home(&mut self) -> Result<(), PlannerError> {
        self.navigate(0)
    }

    /// Rebuild the grid, e.g. after the day has changed
    pub fn refresh(&mut self) {
        self.recompute();
    }

    fn validate(&self, task: &Task) -> Result<(), PlannerError> {
        if task.text().trim().is_empty() {
            return Err(PlannerError::InvalidInput("the task text is empty".to_string()));
        }
        if self.week().map_or(false, |week| week.contains_label(task.date())) == false {
            return Err(PlannerError::InvalidInput(format!("{:?} is not a day of the displayed week", task.date())));
        }
        if is_valid_slot(task.time()) == false {
            return Err(PlannerError::InvalidInput(format!("{:?} is not an available time", task.time())));
        }
        Ok(())
    }

    /// Save the whole collection after a change, then rebuild the grid
    async fn commit(&mut self, task_id: TaskId) -> ChangeOutcome {
        let save_result = self.store.save(self.repository.all()).await;
        self.recompute();

        // A failure must stay the latest event once the change returns
        let save_error = match save_result {
            Ok(()) => None,
            Err(err) => {
                let reason = err.to_string();
                log::warn!("Unable to save tasks: {}. The change is kept in memory", reason);
                self.feedback(PlannerEvent::SaveFailed { reason: reason.clone() });
                Some(PlannerError::PersistenceFailure(reason))
            },
        };
        ChangeOutcome { task_id, save_error }
    }

    fn recompute(&mut self) {
        match self.week() {
            Some(week) => self.rebuild(&week),
            None => log::error!("Week {:+} is now out of the supported date range, keeping the previous grid", self.week_offset),
        }
    }

    fn rebuild(&mut self, week: &Week) {
        self.grid = self.placer.place(week, self.repository.all());
        self.feedback(PlannerEvent::GridRecomputed {
            week_offset: self.week_offset,
            row_count: self.grid.row_count(),
        });
    }

    /// Send an event as a feedback to the listener (if any).
    fn feedback(&self, event: PlannerEvent) {
        if let Some(sender) = &self.feedback_channel {
            let _ = sender.send(event);
        }
    }
}

fn out_of_range(offset: i32) -> PlannerError {
    PlannerError::InvalidInput(format!("week {:+} is out of the supported date range", offset))
}
