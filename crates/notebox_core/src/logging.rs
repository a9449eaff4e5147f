//! Rolling file logs for notebox.
//!
//! # Responsibility
//! - Start one `flexi_logger` file backend per process.
//! - Record panics as sanitized `event=panic_captured` lines.
//!
//! # Invariants
//! - Repeating init with the same level and directory is a no-op.
//! - A second init with other settings is rejected; the first one stays.
//! - Init reports failures as [`LoggingError`] and never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "notebox";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const PANIC_PAYLOAD_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    dir: PathBuf,
    _handle: LoggerHandle,
}

impl ActiveLogger {
    fn start(level: &'static str, dir: PathBuf) -> Result<Self, LoggingError> {
        std::fs::create_dir_all(&dir).map_err(|err| {
            LoggingError::InvalidDir(format!("cannot create `{}`: {err}", dir.display()))
        })?;

        let handle = Logger::try_with_str(level)
            .map_err(|err| LoggingError::UnsupportedLevel(err.to_string()))?
            .log_to_file(FileSpec::default().directory(&dir).basename(LOG_BASENAME))
            .rotate(
                Criterion::Size(ROTATE_AT_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(KEEP_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| LoggingError::Backend(err.to_string()))?;

        std::panic::set_hook(log_panic_then(std::panic::take_hook()));
        info!(
            "event=logging_start module=core status=ok version={} level={} dir={}",
            env!("CARGO_PKG_VERSION"),
            level,
            dir.display()
        );

        Ok(Self {
            level,
            dir,
            _handle: handle,
        })
    }

    fn check_matches(&self, level: &str, dir: &Path) -> Result<(), LoggingError> {
        if self.dir != dir {
            return Err(LoggingError::AlreadyInitialized(format!(
                "logs already go to `{}`, not `{}`",
                self.dir.display(),
                dir.display()
            )));
        }
        if self.level != level {
            return Err(LoggingError::AlreadyInitialized(format!(
                "log level already set to `{}`, not `{level}`",
                self.level
            )));
        }
        Ok(())
    }
}

/// Logging bootstrap error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    /// Directory is empty, relative, or cannot be created.
    InvalidDir(String),
    AlreadyInitialized(String),
    Backend(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(message) => write!(f, "bad log level: {message}"),
            Self::InvalidDir(message) => write!(f, "bad log directory: {message}"),
            Self::AlreadyInitialized(message) => write!(f, "logging already running: {message}"),
            Self::Backend(message) => write!(f, "logger failed to start: {message}"),
        }
    }
}

impl Error for LoggingError {}

/// Sends core logs to rolling files under the absolute directory `log_dir`.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let level = normalize_level(level).map_err(LoggingError::UnsupportedLevel)?;
    if log_dir.as_os_str().is_empty() || !log_dir.is_absolute() {
        return Err(LoggingError::InvalidDir(format!(
            "expected an absolute path, got `{}`",
            log_dir.display()
        )));
    }

    ACTIVE
        .get_or_try_init(|| ActiveLogger::start(level, log_dir.to_path_buf()))?
        .check_matches(level, log_dir)
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Maps a user-supplied level name to its canonical spelling.
pub(crate) fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "`{other}` is not one of trace|debug|info|warn|error"
        )),
    }
}

type PanicHook = Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static>;

fn log_panic_then(previous: PanicHook) -> PanicHook {
    Box::new(move |info: &std::panic::PanicHookInfo<'_>| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| message.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        // Note text can end up in panic payloads; cap and flatten before logging.
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            one_line(&payload, PANIC_PAYLOAD_LIMIT)
        );
        previous(info);
    })
}

fn one_line(value: &str, max_chars: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}
