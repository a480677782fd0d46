//! Placing tasks into a week grid
//!
//! A grid has seven day-columns and as many rows as the busiest day of the displayed week needs.
//! It is derived state: it is rebuilt from scratch every time a task changes or the displayed week changes.
//! The row a task lands in is a by-product of the placement scan and is not stable across rebuilds.
//!
//! Rebuilding costs O(tasks × rows), which is fine for the tens of tasks a week holds.

use crate::cell::CellCodec;
use crate::config::{DEFAULT_MIN_ROWS, DEFAULT_PADDING_ROWS};
use crate::task::{Task, TaskId};
use crate::week::{Week, DAYS_IN_WEEK};

/// How a grid is sized
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// Fewest rows a grid may have, even for an empty week
    pub min_rows: usize,
    /// Empty rows always left below the busiest day
    pub padding_rows: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            min_rows: DEFAULT_MIN_ROWS,
            padding_rows: DEFAULT_PADDING_ROWS,
        }
    }
}


/// The content of a grid cell
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// No task here. This is distinct from a task that would render as an empty string
    Empty,
    /// A task, with its id kept alongside its rendered content
    Occupied { task_id: TaskId, content: String },
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn task_id(&self) -> Option<&TaskId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied { task_id, .. } => Some(task_id),
        }
    }

    /// The rendered string of this cell, as handed to a display
    pub fn content(&self) -> Option<&str> {
        match self {
            Cell::Empty => None,
            Cell::Occupied { content, .. } => Some(content),
        }
    }
}

type Row = [Cell; DAYS_IN_WEEK];

fn empty_row() -> Row {
    std::array::from_fn(|_| Cell::Empty)
}


/// A computed week grid: column headers, and `row_count × 7` cells
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    week_offset: i32,
    headers: [String; DAYS_IN_WEEK],
    rows: Vec<Row>,
}

impl Grid {
    /// The week offset this grid was computed for
    pub fn week_offset(&self) -> i32 {
        self.week_offset
    }

    /// The day labels of the seven columns, Sunday first
    pub fn headers(&self) -> &[String; DAYS_IN_WEEK] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(column)
    }

    /// The id of the task at a given cell, if any
    pub fn task_id_at(&self, row: usize, column: usize) -> Option<&TaskId> {
        self.cell(row, column)?.task_id()
    }

    /// Where a task currently is in this grid, as `(row, column)`
    pub fn position_of(&self, id: &TaskId) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(row_index, row)| {
            row.iter()
                .position(|cell| cell.task_id() == Some(id))
                .map(|column| (row_index, column))
        })
    }

    /// Number of tasks placed in this grid
    pub fn occupied_count(&self) -> usize {
        self.rows.iter()
            .map(|row| row.iter().filter(|cell| cell.is_empty() == false).count())
            .sum()
    }
}


/// Computes grids out of a week and a task collection
#[derive(Clone, Debug, Default)]
pub struct GridPlacer {
    layout: GridLayout,
    codec: CellCodec,
}

impl GridPlacer {
    pub fn new(layout: GridLayout, codec: CellCodec) -> Self {
        Self { layout, codec }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn codec(&self) -> &CellCodec {
        &self.codec
    }

    /// How many rows the grid of this week needs.
    ///
    /// This is the size of the busiest day plus the padding rows, but never less than the minimum row count.
    /// Only tasks of the given week are counted, so this shrinks when navigating to a lighter week.
    pub fn row_count(&self, week: &Week, tasks: &[Task]) -> usize {
        let mut per_day = [0usize; DAYS_IN_WEEK];
        let labels = week.labels();
        for task in tasks {
            if let Some(column) = labels.iter().position(|label| label == task.date()) {
                per_day[column] += 1;
            }
        }

        let busiest = per_day.iter().copied().max().unwrap_or(0);
        std::cmp::max(busiest + self.layout.padding_rows, self.layout.min_rows)
    }

    /// A grid with no headers and no task, for a week that cannot be computed
    pub fn blank(&self, week_offset: i32) -> Grid {
        Grid {
            week_offset,
            headers: Default::default(),
            rows: (0..self.layout.min_rows).map(|_| empty_row()).collect(),
        }
    }

    /// Build the grid of a week.
    ///
    /// Column by column, tasks are taken in collection order and each one is put in the first empty row of its day.
    /// Tasks of other weeks are ignored.
    pub fn place(&self, week: &Week, tasks: &[Task]) -> Grid {
        let headers = week.labels();
        let row_count = self.row_count(week, tasks);
        let mut rows: Vec<Row> = (0..row_count).map(|_| empty_row()).collect();

        for (column, label) in headers.iter().enumerate() {
            for task in tasks.iter().filter(|t| t.date() == label) {
                let free_row = rows.iter().position(|row| row[column].is_empty());
                match free_row {
                    Some(row) => {
                        rows[row][column] = Cell::Occupied {
                            task_id: *task.id(),
                            content: self.codec.encode(task),
                        };
                    },
                    None => {
                        // row_count makes room for the busiest day, so this cannot happen
                        log::error!("No free row for task {} on {}", task.id(), label);
                    },
                }
            }
        }

        log::debug!("Placed tasks for week {} in {} rows", week.offset(), row_count);
        Grid {
            week_offset: week.offset(),
            headers,
            rows,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::cell::decode;
    use crate::task::Priority;

    fn week() -> Week {
        Week::containing(NaiveDate::from_ymd_opt(2023, 8, 23).unwrap(), 0).unwrap()
    }

    fn task_on(column: usize, text: &str) -> Task {
        let date = week().labels()[column].clone();
        Task::new(text.to_string(), date, "8:00 AM".to_string(), Priority::Medium)
    }

    #[test]
    fn test_empty_week() {
        let placer = GridPlacer::default();
        let grid = placer.place(&week(), &[]);

        assert_eq!(grid.row_count(), DEFAULT_MIN_ROWS);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.headers(), &week().labels());
        assert!(grid.rows().iter().all(|row| row.iter().all(Cell::is_empty)));
    }

    #[test]
    fn test_first_fit_in_insertion_order() {
        let placer = GridPlacer::default();
        let tasks = vec![task_on(3, "one"), task_on(1, "other day"), task_on(3, "two"), task_on(3, "three")];
        let grid = placer.place(&week(), &tasks);

        assert_eq!(grid.row_count(), DEFAULT_MIN_ROWS);
        assert_eq!(grid.task_id_at(0, 3), Some(tasks[0].id()));
        assert_eq!(grid.task_id_at(1, 3), Some(tasks[2].id()));
        assert_eq!(grid.task_id_at(2, 3), Some(tasks[3].id()));
        assert_eq!(grid.task_id_at(3, 3), None);
        assert_eq!(grid.task_id_at(0, 1), Some(tasks[1].id()));
        assert_eq!(grid.occupied_count(), 4);

        // The side table and the rendered content agree
        let content = grid.cell(1, 3).unwrap().content().unwrap();
        assert_eq!(decode(content), Ok(*tasks[2].id()));
    }

    #[test]
    fn test_row_count_grows_with_busiest_day() {
        let placer = GridPlacer::default();
        let tasks: Vec<Task> = (0..12).map(|i| task_on(1, &format!("task {}", i))).collect();
        let grid = placer.place(&week(), &tasks);

        assert_eq!(grid.row_count(), 13);
        assert_eq!(grid.task_id_at(11, 1), Some(tasks[11].id()));
        assert!(grid.cell(12, 1).unwrap().is_empty());

        let nine: Vec<Task> = tasks.iter().take(9).cloned().collect();
        assert_eq!(placer.row_count(&week(), &nine), 10);
        let ten: Vec<Task> = tasks.iter().take(10).cloned().collect();
        assert_eq!(placer.row_count(&week(), &ten), 11);
    }

    #[test]
    fn test_other_weeks_are_ignored() {
        let placer = GridPlacer::default();
        let next_week = Week::containing(NaiveDate::from_ymd_opt(2023, 8, 30).unwrap(), 0).unwrap();
        let tasks: Vec<Task> = (0..15)
            .map(|i| Task::new(format!("later {}", i), next_week.labels()[2].clone(), "8:00 AM".to_string(), Priority::Low))
            .collect();

        let grid = placer.place(&week(), &tasks);
        assert_eq!(grid.row_count(), DEFAULT_MIN_ROWS);
        assert_eq!(grid.occupied_count(), 0);

        let grid = placer.place(&next_week, &tasks);
        assert_eq!(grid.row_count(), 16);
        assert_eq!(grid.occupied_count(), 15);
    }

    #[test]
    fn test_placement_is_deterministic() {
        let placer = GridPlacer::default();
        let tasks = vec![task_on(0, "a"), task_on(6, "b"), task_on(0, "c")];
        assert_eq!(placer.place(&week(), &tasks), placer.place(&week(), &tasks));
    }

    #[test]
    fn test_tasks_shift_up_after_removal() {
        let placer = GridPlacer::default();
        let mut tasks = vec![task_on(2, "a"), task_on(2, "b"), task_on(2, "c")];
        let c_id = *tasks[2].id();
        assert_eq!(placer.place(&week(), &tasks).position_of(&c_id), Some((2, 2)));

        tasks.remove(0);
        assert_eq!(placer.place(&week(), &tasks).position_of(&c_id), Some((1, 2)));
    }

    #[test]
    fn test_custom_layout() {
        let placer = GridPlacer::new(GridLayout { min_rows: 2, padding_rows: 0 }, CellCodec::default());
        assert_eq!(placer.row_count(&week(), &[]), 2);

        let tasks = vec![task_on(4, "a"), task_on(4, "b"), task_on(4, "c")];
        let grid = placer.place(&week(), &tasks);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.occupied_count(), 3);
    }
}
