//! `tracing` subscriber setup.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::DEFAULT_LOG_FILTER;
use crate::tui::AppError;

/// Environment variable holding a filter directive that overrides the config file.
pub const LOG_ENV: &str = "FORMLAB_LOG";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error. Used by headless runs, which own no terminal screen.
    Stderr,
    /// Appended to a file. Used by the interactive UI so logs never hit the screen.
    File(PathBuf),
}

/// Installs the global subscriber.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(configured: &str, target: LogTarget) -> Result<(), AppError> {
    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref(), configured);
    let registry = tracing_subscriber::registry().with(filter);
    let result = match target {
        LogTarget::Stderr => registry
            .with(fmt::layer().with_writer(io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
        }
    };
    result.map_err(|e| AppError::Logging(e.to_string()))
}

/// Picks the first directive that parses: the environment, the config, the default.
fn build_filter(env: Option<&str>, configured: &str) -> EnvFilter {
    env.and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
