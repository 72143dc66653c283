//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Mock steps of a workflow in place
#[derive(Debug, Args, Clone)]
pub struct MockCommand {
    /// Workflow file name or path, relative to --cwd
    #[arg(short, long)]
    pub workflow: String,

    /// Mock spec file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    pub mocks: PathBuf,

    /// Directory to look up the workflow from
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Print the rewritten documents instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

/// Validate a mock spec file
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Mock spec file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    pub mocks: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Show where a workflow or local composite action resolves to
#[derive(Debug, Args, Clone)]
pub struct ResolveCommand {
    /// Workflow file name or path, relative to --cwd
    #[arg(short, long)]
    pub workflow: String,

    /// Directory to look up the workflow from
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Local action reference to resolve (e.g. ./actions/build)
    #[arg(long)]
    pub action: Option<String>,
}
