//! `casetrack export` command - Export test cases to CSV

use clap::Subcommand;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{open_store, write_output};
use crate::interchange::{export_flat_records, export_localized_records};

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export flat test cases (simple template schema)
    Flat(FlatArgs),

    /// Export localized records (legacy sheet schema)
    Localized(LocalizedArgs),
}

#[derive(clap::Args, Debug)]
pub struct FlatArgs {
    /// Project to export
    #[arg(long, short = 'p')]
    pub project: String,

    /// Restrict to one version (default: all versions)
    #[arg(long, short = 'V')]
    pub version: Option<String>,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct LocalizedArgs {
    /// Restrict to one application (default: all apps)
    #[arg(long)]
    pub app: Option<String>,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(cmd: ExportCommands) -> Result<()> {
    match cmd {
        ExportCommands::Flat(args) => flat(args),
        ExportCommands::Localized(args) => localized(args),
    }
}

fn flat(args: FlatArgs) -> Result<()> {
    let (_, store) = open_store()?;
    let project = store
        .project(&args.project)
        .map_err(|e| miette::miette!("{}", e))?;

    let cases: Vec<_> = project
        .versions
        .iter()
        .filter(|v| args.version.as_ref().map_or(true, |only| &v.name == only))
        .flat_map(|v| v.cases.iter().cloned())
        .collect();

    write_output(&export_flat_records(&cases), args.output)
}

fn localized(args: LocalizedArgs) -> Result<()> {
    let (_, store) = open_store()?;

    let records: Vec<_> = store
        .localized
        .iter()
        .filter(|r| args.app.as_ref().map_or(true, |only| &r.app_name == only))
        .cloned()
        .collect();

    write_output(&export_localized_records(&records), args.output)
}
