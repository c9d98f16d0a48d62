// FIP version action
// Main CLI entry point

use clap::Parser;
use fip_version_action::cli::{Cli, CliDispatcher};
use fip_version_action::utils::config::ConfigParser;
use fip_version_action::utils::error::{Result, UserError};
use fip_version_action::utils::logging::setup_logging;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        let user_error = UserError::from_action_error(&err);
        user_error.print();
        process::exit(user_error.exit_code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ConfigParser::resolve(cli.config.as_deref(), cli.root.as_deref())?;
    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    setup_logging(level)?;

    CliDispatcher::execute(cli.command, &config).await
}
