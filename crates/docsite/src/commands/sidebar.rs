//! `docsite sidebar` command implementation.

use std::fmt::Write;

use clap::Args;
use docsite_site::{NavEntry, NavTree};

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    #[command(flatten)]
    pub(crate) project: ProjectArgs,
}

impl SidebarArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let (_, descriptor) = self.project.compose()?;
        Output::new().print(render(descriptor.navigation()).trim_end())?;
        Ok(())
    }
}

/// Render the tree as indented text, one entry per line.
fn render(tree: &NavTree) -> String {
    let mut out = String::new();
    render_level(tree, 0, &mut out);
    out
}

fn render_level(tree: &NavTree, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for entry in tree {
        let _ = match entry {
            NavEntry::Link { label, url } => writeln!(out, "{indent}{label} -> {url}"),
            NavEntry::AutogenGroup {
                label,
                directory,
                collapsed,
            } => writeln!(
                out,
                "{indent}{label}/ [{directory}]{}",
                collapsed_marker(*collapsed)
            ),
            NavEntry::Group {
                label, collapsed, ..
            } => writeln!(out, "{indent}{label}/{}", collapsed_marker(*collapsed)),
        };
        if let NavEntry::Group { items, .. } = entry {
            render_level(items, depth + 1, out);
        }
    }
}

fn collapsed_marker(collapsed: bool) -> &'static str {
    if collapsed { " (collapsed)" } else { "" }
}
