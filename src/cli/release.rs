use clap::{ArgGroup, Args};
use serde::Serialize;

use crate::cli::{build_controller, SessionArgs};
use crate::models::session::{UiState, VersionPart};
use crate::utils::config::ActionConfig;
use crate::utils::error::{ActionError, Result};
use crate::utils::version::{self, BumpKind};

/// Which completion flow to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    /// Save the version only
    Save,
    /// Save, generate the nanopublication and submit it
    Submit,
}

/// Save or submit a new FIP version
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["version", "bump"])))]
pub struct ReleaseCommand {
    #[command(flatten)]
    pub session: SessionArgs,

    /// New version, e.g. 1.2.0 (v1.2 and 1.2 are accepted too)
    #[arg(long)]
    pub version: Option<String>,

    /// Use one of the suggested versions: major, minor or patch
    #[arg(long)]
    pub bump: Option<BumpKind>,

    /// Description of the changes in this version
    #[arg(long, default_value = "")]
    pub description: String,

    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// JSON response format for save and submit
#[derive(Debug, Serialize)]
pub struct ReleaseResponse {
    pub success: bool,
    pub version: String,
    pub message: String,
}

impl ReleaseCommand {
    pub async fn run(&self, config: &ActionConfig, mode: ReleaseMode) -> Result<()> {
        let mut controller = build_controller(config, self.session.console_host())?;
        let state = controller.initialize().await?;

        if state != UiState::Ready {
            let message = controller
                .view()
                .error_message
                .clone()
                .unwrap_or_else(|| format!("Action ended in state {state}"));
            return Err(ActionError::NetworkError(message));
        }

        if let Some(kind) = self.bump {
            controller.click_suggestion(kind);
        } else if let Some(raw) = &self.version {
            let target = version::parse_rectified(raw).ok_or_else(|| {
                ActionError::ValidationError(format!(
                    "'{raw}' is not a version (expected MAJOR.MINOR.PATCH, e.g. 1.2.0)"
                ))
            })?;
            controller.change_version_part(VersionPart::Major, target.major.to_string());
            controller.change_version_part(VersionPart::Minor, target.minor.to_string());
            controller.change_version_part(VersionPart::Patch, target.patch.to_string());
        }
        controller.change_description(self.description.clone());

        if let Some(warning) = &controller.view().warning {
            return Err(ActionError::ValidationError(warning.to_string()));
        }

        let version = controller
            .form()
            .map(|form| form.version_string())
            .unwrap_or_default();

        let state = match mode {
            ReleaseMode::Save => controller.confirm().await,
            ReleaseMode::Submit => controller.submit().await,
        };

        if state != UiState::Done {
            let message = controller
                .view()
                .error_message
                .clone()
                .unwrap_or_else(|| format!("Version {version} was not accepted"));
            return Err(ActionError::NetworkError(message));
        }

        let host = controller.into_host();
        let Some(result) = host.result() else {
            return Err(ActionError::HostError("No result was reported".to_string()));
        };

        if self.json {
            let response = ReleaseResponse {
                success: result.success,
                version,
                message: result.message.clone(),
            };
            let json_output = serde_json::to_string_pretty(&response).map_err(|e| {
                ActionError::ValidationError(format!("Failed to serialize JSON response: {e}"))
            })?;
            println!("{json_output}");
        } else {
            println!("{}", result.message);
        }

        if result.success {
            Ok(())
        } else {
            Err(ActionError::Rejected(result.message.clone()))
        }
    }
}
