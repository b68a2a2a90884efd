//! Command handlers for the CLI.

mod check;
mod list;
mod show;


use anyhow::Result;
use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};

pub use check::{compare_input, handle_check};
pub use list::handle_list;
pub use show::handle_show;

/// Writes shell completions for the `fixtures` binary to stdout.
pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "fixtures", &mut std::io::stdout());
    Ok(())
}
