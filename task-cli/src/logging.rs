use log::LevelFilter;
use log4rs::Config;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Raises `configured` by one level per `-v` flag.
pub fn effective_level(configured: LevelFilter, verbosity: u8) -> LevelFilter {
    let levels = LevelFilter::iter().collect::<Vec<_>>();
    let index = levels
        .iter()
        .position(|level| *level == configured)
        .unwrap_or(0);
    let raised = (index + verbosity as usize).min(levels.len() - 1);
    levels[raised]
}

/// Builds the log4rs configuration: crate logs at `level`, everything else at `warn`,
/// all on stderr so stdout carries only command output.
pub fn build_config(level: LevelFilter) -> anyhow::Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l:<5} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .logger(Logger::builder().build("task_cli", level))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    Ok(config)
}

pub fn init(level: LevelFilter) -> anyhow::Result<log4rs::Handle> {
    let handle = log4rs::init_config(build_config(level)?)?;
    Ok(handle)
}
