//! This crate lets you place short tasks on calendar days, and browse them one week at a time.
//!
//! Tasks live in a [`TaskRepository`](repository::TaskRepository), and are saved in a [`TaskStore`](store::TaskStore)
//! (usually a local JSON file, see [`JsonFileStore`](store::JsonFileStore)) after every change.
//!
//! A week is displayed as a [`Grid`](grid::Grid) of seven day-columns, Sunday first, with as many rows as the busiest day needs.
//! The [`grid`] module places tasks in it, and the [`cell`] module renders them and finds them back from a rendered cell.
//!
//! All of this is driven by a [`Planner`], which keeps the grid consistent with the collection after every change or navigation.

pub mod config;
pub mod settings;
pub use settings::Settings;
pub mod error;
pub use error::PlannerError;

mod task;
pub use task::{Priority, Task, TaskId};
pub mod time_slot;
pub mod week;
pub use week::{week_dates, Week};

pub mod repository;
pub mod cell;
pub mod grid;
pub use grid::{Cell, Grid, GridPlacer};

pub mod store;
pub mod mock_behaviour;
pub mod planner;
pub use planner::{ChangeOutcome, Planner};

pub mod utils;
