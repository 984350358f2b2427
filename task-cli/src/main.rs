use clap::Parser;
use log::debug;
use std::io;
use std::process::ExitCode;
use task_cli::cli::{self, Cli, EXIT_STORAGE_ERROR, EXIT_USAGE_ERROR};
use task_cli::config::Settings;
use task_cli::{JsonFileStore, TaskService, logging};

fn main() -> ExitCode {
    let args = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings.with_file_override(args.file.as_deref()),
        Err(e) => {
            eprintln!("Error: invalid configuration: {e:#}");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    let level = match settings.level_filter() {
        Ok(level) => logging::effective_level(level, args.verbose),
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    if let Err(e) = logging::init(level) {
        eprintln!("Error: cannot initialize logging: {e:#}");
        return ExitCode::from(EXIT_STORAGE_ERROR);
    }
    let store = JsonFileStore::new(settings.file);
    debug!("using task file {}", store.path().display());

    let service = TaskService::new(store);
    match cli::dispatch(args.command, &service, &mut io::stdout().lock()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
