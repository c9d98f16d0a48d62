use clap::Args;

use crate::models::api::SubmittedVersion;
use crate::utils::error::{ActionError, Result};
use crate::utils::version;

/// Normalize loosely written versions
#[derive(Debug, Args)]
pub struct RectifyCommand {
    /// Versions to normalize, e.g. v2 or 2.3
    #[arg(required = true)]
    pub inputs: Vec<String>,
}

impl RectifyCommand {
    pub fn run(&self) -> Result<()> {
        let mut invalid = 0;
        for input in &self.inputs {
            match version::rectify(input) {
                Some(rectified) => println!("{input} -> {rectified}"),
                None => {
                    invalid += 1;
                    println!("{input} -> invalid");
                }
            }
        }

        if invalid == self.inputs.len() {
            return Err(ActionError::ValidationError(
                "None of the inputs contains a version".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pick the highest valid version
#[derive(Debug, Args)]
pub struct LatestCommand {
    /// Candidate versions (invalid ones are skipped)
    pub versions: Vec<String>,
}

impl LatestCommand {
    pub fn run(&self) -> Result<()> {
        let records: Vec<SubmittedVersion> = self
            .versions
            .iter()
            .map(|value| SubmittedVersion {
                uri: String::new(),
                version: Some(value.clone()),
                submitted_at: None,
            })
            .collect();

        match version::latest(&records) {
            Some(latest) => println!("{latest}"),
            None => println!("(none)"),
        }
        Ok(())
    }
}
