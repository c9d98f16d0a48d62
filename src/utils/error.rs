// Common error types for the FIP version action

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Host error: {0}")]
    HostError(String),
    #[error("Action finished without success: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, ActionError>;

/// Error as shown to the terminal user, with the process exit code
#[derive(Debug, Clone)]
pub struct UserError {
    pub message: String,
    pub exit_code: i32,
}

impl UserError {
    pub fn from_action_error(err: &ActionError) -> Self {
        let exit_code = match err {
            ActionError::ConfigError(_) | ActionError::ValidationError(_) => 2,
            ActionError::NetworkError(_) => 3,
            ActionError::HostError(_) | ActionError::Rejected(_) => 1,
        };

        Self {
            message: err.to_string(),
            exit_code,
        }
    }

    pub fn print(&self) {
        eprintln!("Error: {}", self.message);
    }
}
