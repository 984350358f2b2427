use crate::service::{DeleteOutcome, MarkOutcome, ServiceError, TaskService};
use crate::store::TaskStore;
use crate::task::Status;
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

pub const EXIT_STORAGE_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_NOT_FOUND: u8 = 3;

/// Track short tasks from the command line
#[derive(Parser, Debug)]
#[command(name = "task-cli", version, arg_required_else_help = true)]
pub struct Cli {
    /// Task file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Increase log output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Add a new task
    Add { description: String },
    /// List tasks, optionally only those with the given status
    List {
        /// One of: todo, in-progress, done
        status: Option<Status>,
    },
    /// Set the status of a task
    Mark {
        id: u32,
        /// One of: todo, in-progress, done
        status: Status,
    },
    /// Mark a task as todo
    MarkTodo { id: u32 },
    /// Mark a task as in progress
    MarkInProgress { id: u32 },
    /// Mark a task as done
    MarkDone { id: u32 },
    /// Delete a task
    Delete { id: u32 },
}

/// Result of a command that ran to completion.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NotFound,
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::NotFound => EXIT_NOT_FOUND,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Service(ServiceError::EmptyDescription) => EXIT_USAGE_ERROR,
            CliError::Service(ServiceError::Store(_) | ServiceError::IdSpaceExhausted)
            | CliError::Output(_) => EXIT_STORAGE_ERROR,
        }
    }
}

/// Runs `command` against `service`, writing the user-facing result to `out`.
pub fn dispatch<S: TaskStore>(
    command: Commands,
    service: &TaskService<S>,
    out: &mut impl Write,
) -> Result<Outcome, CliError> {
    match command {
        Commands::Add { description } => {
            let id = service.add(&description)?;
            writeln!(out, "Task added successfully (ID: {})", id)?;
            Ok(Outcome::Success)
        }
        Commands::List { status } => {
            for task in service.list(status)? {
                writeln!(out, "{}", task)?;
            }
            Ok(Outcome::Success)
        }
        Commands::Mark { id, status } => mark(service, id, status, out),
        Commands::MarkTodo { id } => mark(service, id, Status::Todo, out),
        Commands::MarkInProgress { id } => mark(service, id, Status::InProgress, out),
        Commands::MarkDone { id } => mark(service, id, Status::Done, out),
        Commands::Delete { id } => match service.delete(id)? {
            DeleteOutcome::Deleted(_) => {
                writeln!(out, "Task deleted.")?;
                Ok(Outcome::Success)
            }
            DeleteOutcome::NotFound => {
                writeln!(out, "Task not found.")?;
                Ok(Outcome::NotFound)
            }
        },
    }
}

fn mark<S: TaskStore>(
    service: &TaskService<S>,
    id: u32,
    status: Status,
    out: &mut impl Write,
) -> Result<Outcome, CliError> {
    match service.mark(id, status)? {
        MarkOutcome::Updated(_) => {
            writeln!(out, "Task updated.")?;
            Ok(Outcome::Success)
        }
        MarkOutcome::NotFound => {
            writeln!(out, "Task not found.")?;
            Ok(Outcome::NotFound)
        }
    }
}
