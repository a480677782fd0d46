//! A task store backed by a local JSON file

use std::error::Error;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::{default_data_dir, TASKS_FILE_NAME};
use crate::task::Task;
use super::{parse_tasks, serialize_tasks, write_atomic, TaskStore};

/// A [`TaskStore`] that stores its tasks in a local JSON file
#[derive(Clone, Debug, PartialEq)]
pub struct JsonFileStore {
    backing_file: PathBuf,
}

impl JsonFileStore {
    /// Use a given file. It does not have to exist yet
    pub fn new(path: &Path) -> Self {
        Self {
            backing_file: PathBuf::from(path),
        }
    }

    /// Use the tasks file of a data folder
    pub fn in_folder(folder: &Path) -> Self {
        Self::new(&folder.join(TASKS_FILE_NAME))
    }

    /// Use the tasks file of the platform data folder (see [`crate::config::default_data_dir`])
    pub fn default_location() -> Option<Self> {
        default_data_dir().map(|folder| Self::in_folder(&folder))
    }

    /// Get the path to the backing file
    pub fn backing_file(&self) -> &Path {
        &self.backing_file
    }

    /// Where an unreadable backing file is moved to
    pub fn backup_file(&self) -> PathBuf {
        let mut name = self.backing_file.file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".bak");
        self.backing_file.with_file_name(name)
    }

    /// Move an unreadable backing file aside, so that the next save does not overwrite the only copy of its data
    fn quarantine(&self) {
        let backup = self.backup_file();
        match std::fs::rename(&self.backing_file, &backup) {
            Ok(()) => log::warn!("Moved the unreadable task file to {:?}", backup),
            Err(err) => log::warn!("Unable to move the unreadable task file {:?} aside: {}", self.backing_file, err),
        }
    }

    /// Copy the backing file aside, when the next save would lose some of its records
    fn keep_backup(&self) {
        let backup = self.backup_file();
        match std::fs::copy(&self.backing_file, &backup) {
            Ok(_) => log::warn!("Some tasks could not be loaded. The full task file was copied to {:?}", backup),
            Err(err) => log::warn!("Unable to copy the task file {:?} aside: {}", self.backing_file, err),
        }
    }
}

#[async_trait]
impl TaskStore for JsonFileStore {
    async fn load(&mut self) -> Result<Vec<Task>, Box<dyn Error>> {
        let path = &self.backing_file;
        if path.exists() == false {
            log::debug!("No task file at {:?} yet", path);
            return Ok(Vec::new());
        }

        let content = match std::fs::read(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(content) => content,
        };

        // Anything in the file that cannot be decoded (bad JSON, bad UTF-8...) makes it unreadable
        let parsed = match parse_tasks(&content) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.quarantine();
                return Err(format!("Unable to parse file {:?}: {}", path, err).into());
            },
        };
        if parsed.n_dropped > 0 {
            self.keep_backup();
        }
        Ok(parsed.tasks)
    }

    async fn save(&mut self, tasks: &[Task]) -> Result<(), Box<dyn Error>> {
        let content = serialize_tasks(tasks)?;
        write_atomic(&self.backing_file, &content)?;
        log::debug!("Saved {} tasks to {:?}", tasks.len(), self.backing_file);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    #[tokio::test]
    async fn serde_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_folder(dir.path());

        assert!(store.load().await.unwrap().is_empty());

        let tasks = vec![
            Task::new("shopping list".to_string(), "FRIDAY 8-25-2023".to_string(), "8:00 AM".to_string(), Priority::Medium),
        ];
        store.save(&tasks).await.unwrap();

        let mut reopened = JsonFileStore::in_folder(dir.path());
        assert_eq!(reopened.load().await.unwrap(), tasks);
    }

    #[tokio::test]
    async fn corrupt_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_folder(dir.path());
        std::fs::write(store.backing_file(), b"[{ truncated").unwrap();

        assert!(store.load().await.is_err());
        assert_eq!(store.backing_file().exists(), false);
        assert_eq!(std::fs::read(store.backup_file()).unwrap(), b"[{ truncated");

        // The next run starts from scratch
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn undecodable_bytes_are_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_folder(dir.path());
        let content = b"[{\"text\": \"caf\xe9\", \"date\": \"SUNDAY 8-20-2023\"}]";
        std::fs::write(store.backing_file(), content).unwrap();

        assert!(store.load().await.is_err());
        assert_eq!(store.backing_file().exists(), false);
        assert_eq!(std::fs::read(store.backup_file()).unwrap(), content);
    }
}
