//! Some utility functions

use crate::grid::Grid;
use crate::task::{Priority, Task};

/// Width of a day column when printing a grid
const COLUMN_WIDTH: usize = 24;

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{:<width$}", text, width = width)
    } else {
        let mut shortened: String = text.chars().take(width.saturating_sub(1)).collect();
        shortened.push('…');
        shortened
    }
}

fn priority_mark(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => " ",
        Priority::Medium => "!",
        Priority::High => "‼",
    }
}

/// A one-line description of a task, as shown in a terminal
pub fn describe_task(task: &Task) -> String {
    format!("{}{} ({}) [{}]", priority_mark(task.priority()), task.text(), task.time(), task.id().short())
}

/// Render a grid as a plain-text table, one line per row
pub fn format_grid(grid: &Grid, tasks: &[Task]) -> String {
    let mut lines = Vec::with_capacity(grid.row_count() + 2);

    let headers: Vec<String> = grid.headers().iter().map(|h| fit(h, COLUMN_WIDTH)).collect();
    lines.push(headers.join(" | "));
    lines.push(vec!["-".repeat(COLUMN_WIDTH); headers.len()].join("-+-"));

    for row in grid.rows() {
        let cells: Vec<String> = row.iter()
            .map(|cell| {
                let text = cell.task_id()
                    .and_then(|id| tasks.iter().find(|t| t.id() == id))
                    .map(describe_task)
                    .unwrap_or_default();
                fit(&text, COLUMN_WIDTH)
            })
            .collect();
        lines.push(cells.join(" | ").trim_end().to_string());
    }
    lines.join("\n")
}

/// A debug utility that pretty-prints a grid
pub fn print_grid(grid: &Grid, tasks: &[Task]) {
    println!("{}", format_grid(grid, tasks));
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::grid::GridPlacer;
    use crate::repository::TaskRepository;
    use crate::week::Week;

    #[test]
    fn test_format_grid() {
        let week = Week::containing(NaiveDate::from_ymd_opt(2023, 8, 23).unwrap(), 0).unwrap();
        let mut tasks = TaskRepository::new();
        let task = Task::new("Call Mom".to_string(), week.labels()[2].clone(), "8:00 AM".to_string(), Priority::High);
        tasks.add(task).unwrap();

        let grid = GridPlacer::default().place(&week, tasks.all());
        let output = format_grid(&grid, tasks.all());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), grid.row_count() + 2);
        assert!(lines[0].starts_with("SUNDAY 8-20-2023"));
        assert!(lines[2].contains("‼Call Mom (8:00 AM)"));
        assert!(lines[3].contains("Call Mom") == false);
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
    }
}
