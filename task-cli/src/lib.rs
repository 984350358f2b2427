pub mod cli;
pub mod config;
pub mod logging;
pub mod repository;
pub mod service;
pub mod store;
pub mod task;

pub use repository::TaskRepository;
pub use service::{DeleteOutcome, MarkOutcome, ServiceError, TaskService};
pub use store::{JsonFileStore, StoreError, TaskStore};
pub use task::{Status, Task};
