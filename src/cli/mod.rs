//! CLI command definitions and handlers

pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// fixtures - check and update golden files
#[derive(Parser, Debug)]
#[command(name = "fixtures", version, about, long_about = None)]
pub struct Cli {
    /// Fixture directory (overrides fixtures.toml)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Fixture file name prefix (overrides fixtures.toml)
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Update fixtures instead of verifying them
    #[arg(long, global = true)]
    pub fix: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare input against a fixture, or write it with --fix
    Check(CheckArgs),

    /// List fixtures in the fixture directory
    #[command(name = "ls")]
    List(ListArgs),

    /// Print a fixture's content
    Show(ShowArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// How `check` interprets its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// UTF-8 text; JSON text is pretty-printed before comparing
    #[default]
    Text,
    /// A JSON document, re-encoded with two-space indentation
    Json,
    /// Raw bytes compared exactly
    Bytes,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Fixture name
    pub name: String,

    /// Input file (reads stdin when omitted or `-`)
    pub input: Option<PathBuf>,

    /// How to interpret the input
    #[arg(short = 'f', long, value_enum, default_value_t = InputFormat::Text)]
    pub format: InputFormat,
}

/// Arguments for the `ls` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Fixture name
    pub name: String,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
