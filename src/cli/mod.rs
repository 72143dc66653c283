//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{MockCommand, ResolveCommand, ValidateCommand};
use std::ffi::OsString;

/// Rewrite CI workflow steps with mock replacements
#[derive(Debug, Parser, Clone)]
#[command(name = "step-mocker")]
#[command(version = "0.1.0")]
#[command(about = "Rewrite CI workflow steps with mock replacements", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Mock steps of a workflow in place
    Mock(MockCommand),

    /// Validate a mock spec file
    Validate(ValidateCommand),

    /// Show where a workflow or local composite action resolves to
    Resolve(ResolveCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
