// CLI module for command-line interface

pub mod prepare;
pub mod release;
pub mod version;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::services::action_client::ActionClient;
use crate::services::controller::ActionController;
use crate::services::host::ConsoleHost;
use crate::utils::config::ActionConfig;
use crate::utils::error::{ActionError, Result};

use self::prepare::PrepareCommand;
use self::release::{ReleaseCommand, ReleaseMode};
use self::version::{LatestCommand, RectifyCommand};

/// Main CLI structure
#[derive(Parser)]
#[command(name = "fipva")]
#[command(about = "Check, suggest and submit FIP versions of a FAIR Wizard project")]
#[command(long_about = r#"fipva drives the FIP version project action from the terminal.

It loads the versions already submitted as nanopublications, suggests the next
major, minor or patch version, refuses versions that are not higher than the
latest submitted one, and saves or submits the new version through the action
backend.

Examples:
  fipva prepare --project-uuid <UUID> --user-token <TOKEN>
  fipva save --bump minor --description "New principles"
  fipva submit --version v2.1 --description "Reviewed release"
  fipva rectify v2 2.3 release-1.4
  fipva latest 1.0.0 2.0.0 1.5.0"#)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (default: ./fipva.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Root URL of the action backend
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Project and user identifiers normally handed over by the host
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// UUID of the project
    #[arg(long, env = "FIPVA_PROJECT_UUID")]
    pub project_uuid: String,

    /// API token of the user
    #[arg(long, env = "FIPVA_USER_TOKEN", hide_env_values = true)]
    pub user_token: String,
}

impl SessionArgs {
    pub fn console_host(&self) -> ConsoleHost {
        ConsoleHost::new(self.project_uuid.clone(), self.user_token.clone())
    }
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the latest submitted version, the current version and suggestions
    Prepare(PrepareCommand),

    /// Save a new version without publishing it
    #[command(long_about = r#"Save a new FIP version in the project.

The version is taken either from --version (loosely written versions such as
v2 or 2.3 are accepted) or from one of the suggestions via --bump. It must be
higher than the latest submitted version."#)]
    Save(ReleaseCommand),

    /// Save a new version and submit it as a nanopublication
    #[command(long_about = r#"Save a new FIP version, generate the nanopublication
document and submit it.

Exits with a non-zero code when the document could not be generated or
submitted, even if the version itself was saved."#)]
    Submit(ReleaseCommand),

    /// Normalize loosely written versions into MAJOR.MINOR.PATCH
    Rectify(RectifyCommand),

    /// Print the highest valid version among the given ones
    Latest(LatestCommand),
}

/// Build a controller talking to the configured backend
pub fn build_controller(
    config: &ActionConfig,
    host: ConsoleHost,
) -> Result<ActionController<ActionClient, ConsoleHost>> {
    let client = ActionClient::from_config(config).map_err(ActionError::from)?;
    Ok(ActionController::new(client, host).with_revalidate_on_suggestion(config.revalidate_on_suggestion))
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Execute a CLI command
    pub async fn execute(command: Commands, config: &ActionConfig) -> Result<()> {
        match command {
            Commands::Prepare(cmd) => cmd.run(config).await,
            Commands::Save(cmd) => cmd.run(config, ReleaseMode::Save).await,
            Commands::Submit(cmd) => cmd.run(config, ReleaseMode::Submit).await,
            Commands::Rectify(cmd) => cmd.run(),
            Commands::Latest(cmd) => cmd.run(),
        }
    }
}
