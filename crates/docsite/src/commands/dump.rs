//! `docsite dump` command implementation.

use clap::Args;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the dump command.
#[derive(Args)]
pub(crate) struct DumpArgs {
    #[command(flatten)]
    pub(crate) project: ProjectArgs,
}

impl DumpArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let (_, descriptor) = self.project.compose()?;
        Output::new().print(&descriptor.to_json()?)?;
        Ok(())
    }
}
