//! Diagnostic logging.
//!
//! The terminal belongs to the full-screen UI, so tracing output goes to
//! `virtual_pet.log` in the data directory instead of stderr.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE: &str = "virtual_pet.log";

/// `RUST_LOG` wins when set; otherwise this crate at info, or debug when
/// `verbose`.
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "virtual_pet=debug"
        } else {
            "virtual_pet=info"
        })
    })
}

pub fn file_appender(dir: &Path) -> Option<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("virtual_pet")
        .filename_suffix("log")
        .build(dir)
        .ok()
}

/// Best effort: returns false when no log file could be opened or a
/// subscriber was already installed. A pet without a log file is still a pet.
pub fn init(dir: &Path, verbose: bool) -> bool {
    let Some(appender) = file_appender(dir) else {
        return false;
    };
    fmt()
        .with_env_filter(filter(verbose))
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn unwritable_dir_is_not_fatal() {
        let dir = std::env::temp_dir().join(format!("virtual_pet_log_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("file");
        fs::write(&blocker, "x").unwrap();

        assert!(file_appender(&blocker.join("logs")).is_none());
        assert!(!init(&blocker.join("logs"), true));
    }

    #[test]
    fn appender_writes_named_file() {
        use std::io::Write;

        let dir = std::env::temp_dir().join(format!("virtual_pet_log_ok_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let mut appender = file_appender(&dir).expect("temp dir is writable");
        writeln!(appender, "hello").unwrap();
        appender.flush().unwrap();
        assert!(dir.join(LOG_FILE).exists());
    }
}
