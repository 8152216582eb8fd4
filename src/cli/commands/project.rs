//! `casetrack project` command - Project management

use clap::Subcommand;
use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_date, open_store, save_store};

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a new project
    New(NewArgs),

    /// List projects
    List,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Project name
    pub name: String,
}

pub fn run(cmd: ProjectCommands) -> Result<()> {
    match cmd {
        ProjectCommands::New(args) => new(args),
        ProjectCommands::List => list(),
    }
}

fn new(args: NewArgs) -> Result<()> {
    let (workspace, mut store) = open_store()?;

    store
        .add_project(&args.name)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&workspace, &store)?;

    println!(
        "{} Created project {}",
        style("✓").green(),
        style(&args.name).cyan()
    );
    Ok(())
}

fn list() -> Result<()> {
    let (_, store) = open_store()?;

    if store.projects.is_empty() {
        println!("No projects yet. Create one with 'casetrack project new NAME'");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Project", "Versions", "Created"]);
    for project in &store.projects {
        builder.push_record([
            project.name.clone(),
            project.versions.len().to_string(),
            format_date(&project.created),
        ]);
    }
    println!("{}", builder.build().with(Style::rounded()));
    Ok(())
}
