use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::version::{self, Version};

/// Data handed over by the host when the action starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub project_uuid: String,
    pub user_token: String,
}

/// Lifecycle of one action activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    /// Nothing started yet
    Idle,
    /// Waiting for the host or for prepare-action
    Loading,
    /// Form shown and editable
    Ready,
    /// A save or submit request is in flight
    Processing,
    /// Loading failed; only closing is possible
    Error,
    /// A terminal result was sent to the host
    Done,
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Processing => "processing",
            Self::Error => "error",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// One of the three version inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionPart {
    Major,
    Minor,
    Patch,
}

/// Values of the form inputs, kept as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub description: String,
}

impl FormState {
    pub fn set_version(&mut self, version: &Version) {
        self.major = version.major.to_string();
        self.minor = version.minor.to_string();
        self.patch = version.patch.to_string();
    }

    pub fn set_part(&mut self, part: VersionPart, value: impl Into<String>) {
        let value = value.into();
        match part {
            VersionPart::Major => self.major = value,
            VersionPart::Minor => self.minor = value,
            VersionPart::Patch => self.patch = value,
        }
    }

    /// Fill the inputs from a dotted string; absent parts become empty.
    pub fn fill_dotted(&mut self, dotted: &str) {
        let mut parts = dotted.split('.');
        self.major = parts.next().unwrap_or_default().to_string();
        self.minor = parts.next().unwrap_or_default().to_string();
        self.patch = parts.next().unwrap_or_default().to_string();
    }

    /// The version as it will be sent to the backend
    pub fn version_string(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// The entered version, when the inputs form a valid triple
    pub fn candidate(&self) -> Option<Version> {
        version::parse(&self.version_string())
    }
}

/// State of a single activation of the action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSession {
    pub project_uuid: String,
    pub user_token: String,
    pub state: UiState,
    pub form: FormState,
}

impl ActionSession {
    pub fn new(data: SessionData) -> Self {
        Self {
            project_uuid: data.project_uuid,
            user_token: data.user_token,
            state: UiState::Loading,
            form: FormState::default(),
        }
    }
}
