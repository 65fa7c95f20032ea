//! Some utilities

use std::path::PathBuf;

use ftlog::{
    LevelFilter, LoggerGuard,
    appender::{FileAppender, Period},
};

/// Configures the logger.
///
/// # Errors
///
/// - If a logs directory could not be located/created.
/// - If the logger could not be initialized.
pub fn configure_logger(file_name: &str) -> Result<(LoggerGuard, PathBuf), String> {
    let root_dir = PathBuf::from(".").canonicalize().map_err(|e| e.to_string())?;
    let logs_dir = root_dir.join("logs");
    if !logs_dir.exists() {
        std::fs::create_dir(&logs_dir).map_err(|e| e.to_string())?;
    }
    let log_path = logs_dir.join(file_name);

    let writer = FileAppender::builder().path(&log_path).rotate(Period::Day).build();

    let err_stem = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("Invalid log file name: {file_name}"))?;
    let err_path = log_path.with_file_name(format!("{err_stem}-err.log"));

    let guard = ftlog::Builder::new()
        // simulation events are logged at `Debug`
        .max_log_level(LevelFilter::Debug)
        .root(writer)
        // write `Warn` and `Error` logs in ftlog::appender to `err_path` instead of `log_path`
        .filter("ftlog::appender", "ftlog-appender", LevelFilter::Warn)
        .appender("ftlog-appender", FileAppender::new(err_path))
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}

/// Returns the output path, which is required by every subcommand that changes the system.
///
/// # Errors
///
/// - If no output path was given.
pub fn require_out_path(out_path: Option<PathBuf>) -> Result<PathBuf, String> {
    out_path.ok_or_else(|| "Output path (-o/--out-path) is required for this command".to_string())
}
