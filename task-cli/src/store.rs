use crate::repository::TaskRepository;
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read task file '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("task file '{path}' is malformed: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cannot write task file '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("cannot serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistence boundary for the task collection.
#[cfg_attr(test, mockall::automock)]
pub trait TaskStore {
    /// Loads the full collection. A store that has never been written to
    /// yields an empty collection.
    fn load(&self) -> Result<TaskRepository, StoreError>;

    /// Replaces the persisted collection with `tasks`.
    fn save(&self, tasks: &TaskRepository) -> Result<(), StoreError>;
}

/// Stores tasks as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl TaskStore for JsonFileStore {
    fn load(&self) -> Result<TaskRepository, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.path.display());
                return Ok(TaskRepository::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(TaskRepository::new());
        }

        let tasks: TaskRepository =
            serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        debug!("loaded {} task(s) from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }

    fn save(&self, tasks: &TaskRepository) -> Result<(), StoreError> {
        let mut json = serde_json::to_string_pretty(tasks)?;
        json.push('\n');

        // Temp file lives next to the target so the final rename stays on one filesystem.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.write_error(e))?;

        let mut file = NamedTempFile::new_in(&dir).map_err(|e| self.write_error(e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| self.write_error(e))?;
        file.as_file().sync_all().map_err(|e| self.write_error(e))?;
        file.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        debug!("saved {} task(s) to {}", tasks.len(), self.path.display());
        Ok(())
    }
}
