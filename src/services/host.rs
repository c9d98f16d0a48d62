use serde::Serialize;
use tracing::info;

use crate::models::session::SessionData;
use crate::utils::error::{ActionError, Result};

/// The questionnaire platform embedding the action
#[allow(async_fn_in_trait)]
pub trait Host {
    /// Start the action and obtain the session data
    async fn init(&mut self) -> Result<SessionData>;

    /// Report the terminal result of the action
    fn send_result(&mut self, success: bool, message: &str);
}

/// A terminal result as received by a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

/// Host used by the command line: session data comes from arguments and the
/// result is kept for the caller to print.
#[derive(Debug, Clone, Default)]
pub struct ConsoleHost {
    project_uuid: Option<String>,
    user_token: Option<String>,
    result: Option<ActionResult>,
}

impl ConsoleHost {
    pub fn new(project_uuid: impl Into<String>, user_token: impl Into<String>) -> Self {
        Self {
            project_uuid: Some(project_uuid.into()),
            user_token: Some(user_token.into()),
            result: None,
        }
    }

    pub const fn result(&self) -> Option<&ActionResult> {
        self.result.as_ref()
    }
}

impl Host for ConsoleHost {
    async fn init(&mut self) -> Result<SessionData> {
        let project_uuid = self
            .project_uuid
            .clone()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ActionError::HostError("Missing project UUID".to_string()))?;
        let user_token = self
            .user_token
            .clone()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ActionError::HostError("Missing user token".to_string()))?;

        Ok(SessionData {
            project_uuid,
            user_token,
        })
    }

    fn send_result(&mut self, success: bool, message: &str) {
        info!(success, "action finished");
        self.result = Some(ActionResult {
            success,
            message: message.to_string(),
        });
    }
}
