use crate::store::{StoreError, TaskStore};
use crate::task::{Status, Task};
use log::{debug, info};
use thiserror::Error;

/// Error type for TaskService operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A task needs a non-blank description.
    #[error("task description must not be empty")]
    EmptyDescription,
    /// The largest id in the collection is already `u32::MAX`.
    #[error("no task ids left to assign")]
    IdSpaceExhausted,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Updated(Task),
    NotFound,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Task),
    NotFound,
}

/// Runs one load, mutate, save cycle per operation against a store.
pub struct TaskService<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds a new `todo` task.
    ///
    /// # Returns
    ///
    /// The id assigned to the task, one past the largest existing id.
    pub fn add(&self, description: &str) -> Result<u32, ServiceError> {
        if description.trim().is_empty() {
            return Err(ServiceError::EmptyDescription);
        }
        let mut tasks = self.store.load()?;
        let id = tasks
            .add(description.to_string(), chrono::Utc::now())
            .ok_or(ServiceError::IdSpaceExhausted)?;
        self.store.save(&tasks)?;
        info!("added task {}", id);
        Ok(id)
    }

    /// Lists tasks in insertion order, restricted to `filter` when given.
    pub fn list(&self, filter: Option<Status>) -> Result<Vec<Task>, ServiceError> {
        let tasks = self.store.load()?;
        let matching: Vec<Task> = tasks.iter_with_status(filter).cloned().collect();
        debug!(
            "{} of {} task(s) match filter {:?}",
            matching.len(),
            tasks.len(),
            filter
        );
        Ok(matching)
    }

    /// Moves task `id` to `status`. Nothing is written when the task does not exist.
    pub fn mark(&self, id: u32, status: Status) -> Result<MarkOutcome, ServiceError> {
        let mut tasks = self.store.load()?;
        let Some(updated) = tasks.mark(id, status, chrono::Utc::now()).cloned() else {
            info!("task {} not found, nothing to mark", id);
            return Ok(MarkOutcome::NotFound);
        };
        self.store.save(&tasks)?;
        info!("marked task {} as {}", id, status);
        Ok(MarkOutcome::Updated(updated))
    }

    /// Removes task `id`. The collection is written back whether or not the
    /// task existed.
    pub fn delete(&self, id: u32) -> Result<DeleteOutcome, ServiceError> {
        let mut tasks = self.store.load()?;
        let removed = tasks.remove(id);
        self.store.save(&tasks)?;
        match removed {
            Some(task) => {
                info!("deleted task {}", id);
                Ok(DeleteOutcome::Deleted(task))
            }
            None => {
                info!("task {} not found, nothing deleted", id);
                Ok(DeleteOutcome::NotFound)
            }
        }
    }
}
