//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

use crate::cli::commands::{
    case::CaseCommands, completions::CompletionsArgs, export::ExportCommands,
    import::ImportArgs, init::InitArgs, project::ProjectCommands, version::VersionCommands,
};

#[derive(Parser)]
#[command(name = "casetrack")]
#[command(author, version, about = "Manual QA test case tracking")]
#[command(
    long_about = "Track manual QA test cases across project versions, drive them through the open/fixed/verified lifecycle, and exchange them as CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a casetrack workspace in the current directory
    Init(InitArgs),

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Version management (opening a version is gated on older versions
    /// being fully verified)
    #[command(subcommand)]
    Version(VersionCommands),

    /// Test case management and lifecycle actions
    #[command(subcommand)]
    Case(CaseCommands),

    /// Import test cases from a CSV file
    Import(ImportArgs),

    /// Export test cases to CSV
    #[command(subcommand)]
    Export(ExportCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
