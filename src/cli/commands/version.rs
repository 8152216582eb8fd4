//! `casetrack version` command - Version management
//!
//! Opening a version is gated: every existing version of the project
//! must be fully verified first. The gate is re-checked on every open
//! against the freshly loaded store.

use clap::Subcommand;
use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_date, open_store, save_store};
use crate::core::gate::{blocking_versions, can_open_new_version};

#[derive(Subcommand, Debug)]
pub enum VersionCommands {
    /// Open a new version (requires all older versions fully verified)
    Open(OpenArgs),

    /// List versions of a project
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct OpenArgs {
    /// Version name (e.g. "1.2.0")
    pub name: String,

    /// Project to open the version in
    #[arg(long, short = 'p')]
    pub project: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Project to list versions of
    #[arg(long, short = 'p')]
    pub project: String,
}

pub fn run(cmd: VersionCommands) -> Result<()> {
    match cmd {
        VersionCommands::Open(args) => open(args),
        VersionCommands::List(args) => list(args),
    }
}

fn open(args: OpenArgs) -> Result<()> {
    let (workspace, mut store) = open_store()?;

    let project = store
        .project(&args.project)
        .map_err(|e| miette::miette!("{}", e))?;

    if !can_open_new_version(&project.versions) {
        eprintln!(
            "{} Cannot open version {}: unresolved test cases remain",
            style("✗").red(),
            style(&args.name).cyan()
        );
        for version in blocking_versions(&project.versions) {
            eprintln!(
                "    {} has {} unresolved case(s)",
                style(&version.name).yellow(),
                version.unresolved_count()
            );
        }
        return Err(miette::miette!(
            "All existing versions must be fully verified before opening a new one"
        ));
    }

    store
        .add_version(&args.project, &args.name)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&workspace, &store)?;

    println!(
        "{} Opened version {} in {}",
        style("✓").green(),
        style(&args.name).cyan(),
        style(&args.project).cyan()
    );
    Ok(())
}

fn list(args: ListArgs) -> Result<()> {
    let (_, store) = open_store()?;
    let project = store
        .project(&args.project)
        .map_err(|e| miette::miette!("{}", e))?;

    if project.versions.is_empty() {
        println!("No versions yet in '{}'", project.name);
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Version", "Cases", "Verified", "Created"]);
    for version in &project.versions {
        let verified = version.cases.len() - version.unresolved_count();
        builder.push_record([
            version.name.clone(),
            version.cases.len().to_string(),
            format!("{}/{}", verified, version.cases.len()),
            format_date(&version.created),
        ]);
    }
    println!("{}", builder.build().with(Style::rounded()));
    Ok(())
}
