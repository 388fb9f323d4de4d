use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger,
    LoggerHandle, Naming,
};
use std::path::Path;

/// Start the global logger. `RUST_LOG` overrides `level`.
///
/// Without `log_dir` records go to stderr in color; with it they go to
/// rotating files in that directory. Keep the handle alive for the whole run.
pub fn setup_logging(level: &str, log_dir: Option<&Path>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(level)?;
    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("game_2048"))
            .format(opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024),
                Naming::Numbers,
                Cleanup::KeepLogFiles(5),
            )
            .start(),
        None => logger.format(colored_default_format).start(),
    }
}
