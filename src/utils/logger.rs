use crate::constants::LOG_FILE_PREFIX;
use std::path::Path;
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Stdout subscriber. Safe to call from every test.
pub fn setup_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .try_init();
    });
}

/// Logs to stdout and to a daily file `<log_dir>/records.<date>`.
///
/// The returned guard flushes the file writer on drop and must be kept
/// alive for the whole session. Fails when `log_dir` cannot be created.
pub fn init_session_logging(log_dir: &Path) -> Result<WorkerGuard, InitError> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(std::io::stdout.and(file_writer))
            .try_init();
    });
    Ok(guard)
}

#[cfg(test)]
mod tests_logger {
    use super::*;
    use std::fs;

    #[test]
    fn test_unusable_log_dir_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("not_a_dir");
        fs::write(&file, "").unwrap();

        let result = init_session_logging(&file.join("logs"));

        assert!(result.is_err());
    }
}
