use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanYouError {
    #[error("Failed to execute AI CLI: {0}")]
    AiCliError(String),

    #[error("AI CLI '{command}' is not installed.\n{hint}")]
    ProviderNotInstalled { command: String, hint: String },

    #[error("Failed to create a plan: {0}")]
    PlanningError(String),

    #[error("Empty command")]
    EmptyCommand,

    #[error("Command execution failed: {0}")]
    ExecutionError(String),

    #[error("User cancelled")]
    UserCancelled,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CanYouError>;
