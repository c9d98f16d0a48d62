use clap::Args;
use serde::Serialize;

use crate::cli::{build_controller, SessionArgs};
use crate::models::session::UiState;
use crate::utils::config::ActionConfig;
use crate::utils::error::{ActionError, Result};
use crate::utils::version::Suggestions;

/// Load the version data of a project and show the suggestions
#[derive(Debug, Args)]
pub struct PrepareCommand {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// JSON response format for the prepare command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareReport {
    pub latest_submitted: String,
    pub current_version: String,
    pub form_version: String,
    pub suggestions: Suggestions,
    pub warning: Option<String>,
}

impl PrepareCommand {
    pub async fn run(&self, config: &ActionConfig) -> Result<()> {
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

        let view = controller.view();
        let report = PrepareReport {
            latest_submitted: view.latest_version_text.clone(),
            current_version: view.current_version_text.clone(),
            form_version: controller
                .form()
                .map(|form| form.version_string())
                .unwrap_or_default(),
            suggestions: view.suggestions.clone(),
            warning: view.warning.as_ref().map(ToString::to_string),
        };

        if self.json {
            let json_output = serde_json::to_string_pretty(&report).map_err(|e| {
                ActionError::ValidationError(format!("Failed to serialize JSON response: {e}"))
            })?;
            println!("{json_output}");
        } else {
            println!("Latest submitted version: {}", report.latest_submitted);
            println!("Current project version:  {}", report.current_version);
            println!("Proposed version:         {}", report.form_version);
            println!();
            println!("Suggestions:");
            println!("  major  {}", report.suggestions.major);
            println!("  minor  {}", report.suggestions.minor);
            println!("  patch  {}", report.suggestions.patch);
            if let Some(warning) = &report.warning {
                println!();
                println!("Warning: {warning}");
            }
        }

        Ok(())
    }
}
