//! `casetrack init` command - Initialize a new workspace

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::workspace::{Workspace, WorkspaceError};
use crate::store::Store;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
    }

    match Workspace::init(&path) {
        Ok(workspace) => {
            Store::default()
                .save(&workspace.store_path())
                .map_err(|e| miette::miette!("{}", e))?;

            println!(
                "{} Initialized casetrack workspace at {}",
                style("✓").green(),
                style(workspace.root().display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!(
                "  {} Create a project",
                style("casetrack project new NAME").yellow()
            );
            println!(
                "  {} Open its first version",
                style("casetrack version open 1.0 --project NAME").yellow()
            );
            Ok(())
        }
        Err(WorkspaceError::AlreadyExists(path)) => {
            println!(
                "{} Workspace already exists at {}",
                style("✗").red(),
                path.display()
            );
            Err(miette::miette!("Workspace already initialized"))
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
