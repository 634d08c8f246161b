use crate::automation::ScenarioError;
use crate::config::ConfigError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A headless scenario could not be loaded or executed.
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// The log subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}
