use thiserror::Error;
use crate::error::{ApiError, ConfigError};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Startup failed: {0}")]
    Startup(#[from] ApiError),
    #[error("Task failed: {0}")]
    Task(String),
}
