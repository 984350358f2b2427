use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_TASK_FILE: &str = "tasks.json";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Optional config file looked up in the working directory (`task-cli.toml`, `task-cli.json`, ...).
pub const CONFIG_FILE_NAME: &str = "task-cli";
pub const ENV_PREFIX: &str = "TASK_CLI";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Backing file holding the task collection.
    pub file: PathBuf,
    pub log_level: String,
}

impl Settings {
    /// Loads settings from defaults, then `task-cli.*` in the working
    /// directory if present, then `TASK_CLI_*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        Self::layered(
            config::File::with_name(CONFIG_FILE_NAME).required(false),
            config::Environment::with_prefix(ENV_PREFIX),
        )
    }

    pub(crate) fn layered<F, E>(file: F, env: E) -> anyhow::Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
        E: config::Source + Send + Sync + 'static,
    {
        let s = config::Config::builder()
            .set_default("file", DEFAULT_TASK_FILE)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .add_source(file)
            .add_source(env)
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// Applies the command line override for the task file, if any.
    pub fn with_file_override(mut self, file: Option<&Path>) -> Self {
        if let Some(file) = file {
            self.file = file.to_path_buf();
        }
        self
    }

    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| anyhow::anyhow!("invalid log level '{}'", self.log_level))
    }
}
