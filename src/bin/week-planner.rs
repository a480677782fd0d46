//! A terminal front-end for the planner: prints a week grid, and adds, edits or deletes tasks

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use week_planner::config::{default_data_dir, MAX_TEXT_LEN, SETTINGS_FILE_NAME};
use week_planner::store::JsonFileStore;
use week_planner::time_slot::{time_slots, END_OF_DAY};
use week_planner::utils::{describe_task, print_grid};
use week_planner::{ChangeOutcome, Planner, Priority, Settings, Task, TaskId};

#[derive(Parser)]
#[command(name = "week-planner", version, about = "Place short tasks on the days of a week")]
struct Cli {
    /// Folder holding the tasks and settings files
    #[arg(long, env = "WEEK_PLANNER_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Week to display, relative to the current one (-1 is last week)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, global = true)]
    week: i32,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the week grid (this is the default)
    Show,
    /// Add a task to a day of the displayed week
    Add {
        #[arg(long, value_enum)]
        day: Day,
        #[arg(long, default_value = END_OF_DAY)]
        time: String,
        #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,
        text: String,
    },
    /// Change a task of the displayed week
    Edit {
        /// Task id, or the beginning of it
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long, value_enum)]
        day: Option<Day>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
    },
    /// Delete a task
    Delete {
        /// Task id, or the beginning of it
        id: String,
    },
    /// List the available times
    Times,
}

#[derive(Clone, Copy, ValueEnum)]
enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    fn column(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Priority {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}


#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let command = cli.command.unwrap_or(Command::Show);
    if let Command::Times = command {
        for slot in time_slots() {
            println!("{}", slot);
        }
        return Ok(());
    }

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir().ok_or("Unable to find a data directory, please use --data-dir")?,
    };
    let settings = Settings::from_file_or_default(&data_dir.join(SETTINGS_FILE_NAME));
    let mut planner = Planner::load(JsonFileStore::in_folder(&data_dir), &settings).await;
    if let Some(err) = planner.load_error() {
        eprintln!("Warning: the saved tasks could not be read ({}). Starting empty", err);
    }
    planner.navigate(cli.week)?;

    match command {
        Command::Show | Command::Times => {},
        Command::Add { day, time, priority, text } => {
            warn_if_long(&text);
            let date = planner.grid().headers()[day.column()].clone();
            let task = Task::new(text, date, time, priority.into());
            let outcome = planner.add(task).await?;
            report("Added", &planner, &outcome);
        },
        Command::Edit { id, text, day, time, priority } => {
            let id = find_task(&planner, &id)?;
            let mut task = planner.task(&id).cloned().ok_or("This task vanished")?;
            if let Some(text) = text {
                warn_if_long(&text);
                task.set_text(text);
            }
            if let Some(day) = day {
                task.set_date(planner.grid().headers()[day.column()].clone());
            }
            if let Some(time) = time {
                task.set_time(time);
            }
            if let Some(priority) = priority {
                task.set_priority(priority.into());
            }
            let outcome = planner.edit(task).await?;
            report("Edited", &planner, &outcome);
        },
        Command::Delete { id } => {
            let id = find_task(&planner, &id)?;
            let outcome = planner.delete(&id).await.ok_or("This task vanished")?;
            report("Deleted", &planner, &outcome);
        },
    }

    print_grid(planner.grid(), planner.tasks());
    Ok(())
}

/// Find the task whose id is, or starts with, `needle`
fn find_task(planner: &Planner<JsonFileStore>, needle: &str) -> Result<TaskId, Box<dyn Error>> {
    let needle = needle.to_lowercase();
    let matches: Vec<&Task> = planner.tasks().iter()
        .filter(|task| task.id().to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [task] => Ok(*task.id()),
        [] => Err(format!("No task with an id starting with {:?}", needle).into()),
        _ => Err(format!("Several tasks have an id starting with {:?}, please give more characters", needle).into()),
    }
}

fn warn_if_long(text: &str) {
    if text.chars().count() > MAX_TEXT_LEN {
        eprintln!("Warning: this text is longer than {} characters, it may not fit in a cell", MAX_TEXT_LEN);
    }
}

fn report(action: &str, planner: &Planner<JsonFileStore>, outcome: &ChangeOutcome) {
    match planner.task(outcome.task_id()) {
        Some(task) => println!("{} {}", action, describe_task(task)),
        None => println!("{} {}", action, outcome.task_id()),
    }
    if let Some(err) = outcome.save_error() {
        eprintln!("Warning: the change could not be saved ({}). It will be lost when quitting", err);
    }
    println!();
}
