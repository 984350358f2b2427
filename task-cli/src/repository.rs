use crate::task::{Status, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The full, insertion-ordered task collection.
///
/// Serializes as a bare JSON array of tasks.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskRepository {
    tasks: Vec<Task>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self { tasks: vec![] }
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The id the next added task will receive: one past the largest id
    /// present, or 1 for an empty collection. `None` once `u32::MAX` is taken.
    pub fn next_id(&self) -> Option<u32> {
        match self.tasks.iter().map(Task::id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Appends a new `todo` task and returns its id, or `None` without
    /// touching the collection when no id is left to hand out.
    pub fn add(&mut self, description: String, now: DateTime<Utc>) -> Option<u32> {
        let id = self.next_id()?;
        self.tasks.push(Task::new(id, description, now));
        Some(id)
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Tasks matching `filter` in insertion order, or every task when no
    /// filter is given.
    pub fn iter_with_status(&self, filter: Option<Status>) -> impl Iterator<Item = &Task> + '_ {
        self.tasks
            .iter()
            .filter(move |task| filter.is_none_or(|status| task.status() == status))
    }

    /// Sets the status of the first task with `id`, returning the updated
    /// task, or `None` if there is no such task.
    pub fn mark(&mut self, id: u32, status: Status, now: DateTime<Utc>) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|task| task.id() == id)?;
        task.set_status(status, now);
        Some(task)
    }

    /// Removes the task with `id`, keeping the relative order of the rest.
    pub fn remove(&mut self, id: u32) -> Option<Task> {
        let position = self.tasks.iter().position(|task| task.id() == id)?;
        Some(self.tasks.remove(position))
    }
}
