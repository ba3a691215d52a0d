use std::path::{Path, PathBuf};

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable naming a log file path prefix.
pub const LOG_FILE_ENV: &str = "PKGSEARCH_LOG";

/// Initialize tracing for the binary.
///
/// Filter comes from `RUST_LOG` when set, otherwise from `config.level`.
/// Output goes to stderr unless `PKGSEARCH_LOG` or `config.file` names a
/// file; log files get a unique `{path}.{timestamp}.{pid}` name so that
/// concurrent runs never interleave.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_path = std::env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .or_else(|| config.file.clone());

    let Some(log_path) = log_path else {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_timer(UtcTime::rfc_3339()),
            )
            .try_init();
        return;
    };

    let unique_path = unique_log_path(&log_path);
    let file = match std::fs::File::create(&unique_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Failed to create log file {}: {}", unique_path.display(), e);
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

fn unique_log_path(path: &Path) -> PathBuf {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{}.{}", timestamp, pid));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_log_path_appends_timestamp_and_pid() {
        let path = unique_log_path(Path::new("/tmp/pkgsearch.log"));
        let name = path.to_string_lossy();
        let pid = std::process::id().to_string();

        assert!(name.starts_with("/tmp/pkgsearch.log."));
        assert!(name.ends_with(&format!(".{}", pid)));
    }
}
