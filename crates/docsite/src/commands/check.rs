//! `docsite check` command implementation.

use clap::Args;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) project: ProjectArgs,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let (config, descriptor) = self.project.compose()?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.highlight(&descriptor.metadata().title);
        output.info(&format!(
            "  {} sidebar entries, {} integrations, {} highlighting themes",
            descriptor.navigation().len(),
            descriptor.integrations().len(),
            descriptor.highlight().themes.len()
        ));
        output.success("Site configuration is valid");
        Ok(())
    }
}
