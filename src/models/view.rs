use serde::Serialize;
use std::fmt;

use crate::utils::version::Suggestions;

pub const NO_SUBMITTED_VERSION: &str = "(no valid submitted yet)";
pub const NO_QUESTIONNAIRE_VERSION: &str = "(not set)";

/// Why confirm/submit are currently blocked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VersionWarning {
    /// Entered version is not above the latest submitted one
    NotHigher { latest: String },
    /// Inputs do not form a `M.m.p` triple
    Invalid { entered: String },
}

impl fmt::Display for VersionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotHigher { latest } => write!(
                f,
                "The new version must be higher than the latest submitted version {latest}."
            ),
            Self::Invalid { entered } => write!(
                f,
                "'{entered}' is not a valid version (expected MAJOR.MINOR.PATCH)."
            ),
        }
    }
}

/// Everything the view layer needs to render the action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub loader_visible: bool,
    pub content_visible: bool,
    pub error_visible: bool,
    pub processing_visible: bool,
    pub error_message: Option<String>,
    pub processing_message: Option<String>,
    pub latest_version_text: String,
    pub current_version_text: String,
    pub suggestions: Suggestions,
    pub warning: Option<VersionWarning>,
    pub inputs_enabled: bool,
    pub confirm_enabled: bool,
    pub submit_enabled: bool,
    pub cancel_enabled: bool,
}

impl ViewState {
    /// Initial view: only the loader is visible
    pub fn loading() -> Self {
        Self {
            loader_visible: true,
            content_visible: false,
            error_visible: false,
            processing_visible: false,
            error_message: None,
            processing_message: None,
            latest_version_text: NO_SUBMITTED_VERSION.to_string(),
            current_version_text: NO_QUESTIONNAIRE_VERSION.to_string(),
            suggestions: Suggestions::defaults(),
            warning: None,
            inputs_enabled: false,
            confirm_enabled: false,
            submit_enabled: false,
            cancel_enabled: false,
        }
    }

    /// Enable or disable every control at once
    pub fn set_controls_enabled(&mut self, enabled: bool) {
        self.inputs_enabled = enabled;
        self.confirm_enabled = enabled;
        self.submit_enabled = enabled;
        self.cancel_enabled = enabled;
    }

    /// Gate the two actions that send a version
    pub fn set_actions_enabled(&mut self, enabled: bool) {
        self.confirm_enabled = enabled;
        self.submit_enabled = enabled;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.error_visible = true;
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
        self.error_visible = false;
    }

    pub fn start_processing(&mut self, message: impl Into<String>) {
        self.set_controls_enabled(false);
        self.clear_error();
        self.processing_message = Some(message.into());
        self.processing_visible = true;
    }

    pub fn stop_processing(&mut self) {
        self.processing_message = None;
        self.processing_visible = false;
    }
}
