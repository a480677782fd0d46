//! Durable storage of the task collection
//!
//! A store only ever loads or saves the whole collection: there is no incremental update.

use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task};
use crate::week::parse_label;

pub mod json_file;
pub use json_file::JsonFileStore;
pub mod memory;
pub use memory::MemoryStore;

/// Version written in every file saved by this crate
pub const FORMAT_VERSION: u32 = 1;

/// Somewhere the task collection can be persisted
#[async_trait]
pub trait TaskStore {
    /// Read the whole collection, in the order it was saved.
    /// A store that has never been saved to returns an empty collection, not an error.
    async fn load(&mut self) -> Result<Vec<Task>, Box<dyn Error>>;

    /// Replace the whole persisted collection
    async fn save(&mut self, tasks: &[Task]) -> Result<(), Box<dyn Error>>;
}


#[derive(Serialize)]
struct StoredTasksRef<'a> {
    version: u32,
    tasks: &'a [Task],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFile {
    Versioned { version: u32, tasks: Vec<StoredRecord> },
    Bare(Vec<StoredRecord>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Current(Task),
    /// Older files wrapped every task in a `task` object, and did not store ids
    Legacy { task: LegacyTask },
}

#[derive(Deserialize)]
struct LegacyTask {
    text: String,
    date: String,
    time: String,
    priority: Priority,
}

/// Serialize a task collection into the current file format
pub fn serialize_tasks(tasks: &[Task]) -> Result<Vec<u8>, Box<dyn Error>> {
    let stored = StoredTasksRef { version: FORMAT_VERSION, tasks };
    Ok(serde_json::to_vec_pretty(&stored)?)
}

/// The content of a task file
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedTasks {
    pub tasks: Vec<Task>,
    /// How many records were skipped because their date is not a day label
    pub n_dropped: usize,
}

/// Parse a task collection, in the current format or in one of the formats older versions wrote.
///
/// Legacy records are given fresh ids. Records whose date is not a canonical day label are dropped,
/// since they could never be displayed.
pub fn parse_tasks(content: &[u8]) -> Result<ParsedTasks, Box<dyn Error>> {
    let records = match serde_json::from_slice(content)? {
        StoredFile::Versioned { version, tasks } => {
            if version > FORMAT_VERSION {
                log::warn!("Task file has format version {}, newer than {}. Reading it anyway", version, FORMAT_VERSION);
            }
            tasks
        },
        StoredFile::Bare(tasks) => tasks,
    };

    let mut tasks = Vec::with_capacity(records.len());
    let mut n_legacy = 0;
    let mut n_dropped = 0;
    for record in records {
        let task = match record {
            StoredRecord::Current(task) => task,
            StoredRecord::Legacy { task } => {
                n_legacy += 1;
                Task::new(task.text, task.date, task.time, task.priority)
            },
        };

        if parse_label(task.date()).is_none() {
            log::warn!("Dropping task \"{}\" ({}): invalid date {:?}", task.text(), task.id(), task.date());
            n_dropped += 1;
            continue;
        }
        tasks.push(task);
    }

    if n_legacy > 0 {
        log::info!("Imported {} tasks from a legacy task file", n_legacy);
    }
    Ok(ParsedTasks { tasks, n_dropped })
}

/// Write a file atomically: the content goes to a sibling temporary file, which is then renamed over `path`.
///
/// The file is thus either fully written or not modified at all.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name()
        .ok_or_else(|| format!("Invalid file path {:?}", path))?
        .to_os_string();
    temp_name.push(format!(".tmp.{}", std::process::id()));
    let temp_path = path.with_file_name(temp_name);

    let mut temp_file = File::create(&temp_path)?;
    temp_file.write_all(data)?;
    temp_file.sync_all()?;
    drop(temp_file);

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(format!("Unable to replace {:?}: {}", path, err).into());
    }
    Ok(())
}
