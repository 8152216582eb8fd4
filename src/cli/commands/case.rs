//! `casetrack case` command - Test case management and lifecycle actions
//!
//! Both the dedicated toggle subcommands (fix/unfix/verify/unverify)
//! and the general `update` subcommand route flag changes through the
//! status engine, so the lifecycle invariants hold on every path.

use chrono::Utc;
use clap::Subcommand;
use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_date, open_store, save_store, truncate_str};
use crate::core::identity::CaseId;
use crate::core::status::{apply_field_update, apply_toggle, FlagPatch, StatusAction};
use crate::entities::test_case::{CaseStatus, Priority, Severity, TestCaseRecord};

#[derive(Subcommand, Debug)]
pub enum CaseCommands {
    /// Add a test case to a project version
    Add(AddArgs),

    /// List test cases
    List(ListArgs),

    /// Mark a test case fixed
    Fix(IdArg),

    /// Mark a test case not fixed (also clears verification)
    Unfix(IdArg),

    /// Mark a test case verified (requires it to be fixed)
    Verify(IdArg),

    /// Clear a test case's verification
    Unverify(IdArg),

    /// Update fields of a test case
    Update(UpdateArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Project name
    #[arg(long, short = 'p')]
    pub project: String,

    /// Version name
    #[arg(long, short = 'V')]
    pub version: String,

    /// Bug summary or category
    #[arg(long)]
    pub bug: String,

    /// What to test
    #[arg(long)]
    pub test: String,

    /// Observed result
    #[arg(long)]
    pub result: Option<String>,

    /// Severity (critical, high, medium, low)
    #[arg(long)]
    pub severity: Option<Severity>,

    /// Priority (high, medium, low)
    #[arg(long)]
    pub priority: Option<Priority>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Project name
    #[arg(long, short = 'p')]
    pub project: String,

    /// Restrict to one version (default: all versions)
    #[arg(long, short = 'V')]
    pub version: Option<String>,

    /// Filter by status (open, fixed, verified)
    #[arg(long, short = 's')]
    pub status: Option<CaseStatus>,
}

#[derive(clap::Args, Debug)]
pub struct IdArg {
    /// Test case id (TC-...)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Test case id (TC-...)
    pub id: String,

    /// Set the fixed flag
    #[arg(long)]
    pub fixed: Option<bool>,

    /// Set the verified flag
    #[arg(long)]
    pub verified: Option<bool>,

    /// Replace the observed result
    #[arg(long)]
    pub result: Option<String>,

    /// Replace the notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Replace the severity
    #[arg(long)]
    pub severity: Option<Severity>,

    /// Replace the priority
    #[arg(long)]
    pub priority: Option<Priority>,
}

pub fn run(cmd: CaseCommands) -> Result<()> {
    match cmd {
        CaseCommands::Add(args) => add(args),
        CaseCommands::List(args) => list(args),
        CaseCommands::Fix(arg) => toggle(&arg.id, StatusAction::SetFixed(true)),
        CaseCommands::Unfix(arg) => toggle(&arg.id, StatusAction::SetFixed(false)),
        CaseCommands::Verify(arg) => toggle(&arg.id, StatusAction::SetVerified(true)),
        CaseCommands::Unverify(arg) => toggle(&arg.id, StatusAction::SetVerified(false)),
        CaseCommands::Update(args) => update(args),
    }
}

fn parse_id(raw: &str) -> Result<CaseId> {
    raw.parse().map_err(|e| miette::miette!("{}", e))
}

fn add(args: AddArgs) -> Result<()> {
    let (workspace, mut store) = open_store()?;

    let mut case = TestCaseRecord::new(args.bug, args.test);
    case.result = args.result.unwrap_or_default();
    case.notes = args.notes.unwrap_or_default();
    case.severity = args.severity.unwrap_or_default();
    case.priority = args.priority.unwrap_or_default();

    let ids = store
        .insert_cases(&args.project, &args.version, vec![case])
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&workspace, &store)?;

    println!(
        "{} Created test case {}",
        style("✓").green(),
        style(&ids[0]).cyan()
    );
    Ok(())
}

fn list(args: ListArgs) -> Result<()> {
    let (_, store) = open_store()?;
    let project = store
        .project(&args.project)
        .map_err(|e| miette::miette!("{}", e))?;

    let mut builder = Builder::default();
    builder.push_record(["Id", "Version", "Bug", "Test", "Sev", "Pri", "Status", "Created"]);

    let mut shown = 0;
    for version in &project.versions {
        if let Some(only) = &args.version {
            if &version.name != only {
                continue;
            }
        }
        for case in &version.cases {
            if let Some(status) = args.status {
                if case.status != status {
                    continue;
                }
            }
            builder.push_record([
                case.id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                version.name.clone(),
                truncate_str(&case.bug, 24),
                truncate_str(&case.test, 32),
                case.severity.to_string(),
                case.priority.to_string(),
                case.status.to_string(),
                format_date(&case.created),
            ]);
            shown += 1;
        }
    }

    if shown == 0 {
        println!("No matching test cases");
    } else {
        println!("{}", builder.build().with(Style::rounded()));
    }
    Ok(())
}

fn toggle(raw_id: &str, action: StatusAction) -> Result<()> {
    let (workspace, mut store) = open_store()?;
    let id = parse_id(raw_id)?;

    let case = store
        .find_case_mut(&id)
        .map_err(|e| miette::miette!("{}", e))?;

    let transition =
        apply_toggle(&case.flags(), action, Utc::now()).map_err(|e| miette::miette!("{}", e))?;
    case.apply_transition(transition);
    let status = case.status;

    save_store(&workspace, &store)?;

    println!(
        "{} {} is now {}",
        style("✓").green(),
        style(&id).cyan(),
        style(status).yellow()
    );
    Ok(())
}

fn update(args: UpdateArgs) -> Result<()> {
    let (workspace, mut store) = open_store()?;
    let id = parse_id(&args.id)?;

    let case = store
        .find_case_mut(&id)
        .map_err(|e| miette::miette!("{}", e))?;

    // flag changes go through the same engine as the toggle commands
    let patch = FlagPatch {
        is_fixed: args.fixed,
        is_verified: args.verified,
    };
    let transition = apply_field_update(&case.flags(), &patch, Utc::now())
        .map_err(|e| miette::miette!("{}", e))?;
    case.apply_transition(transition);

    if let Some(result) = args.result {
        case.result = result;
    }
    if let Some(notes) = args.notes {
        case.notes = notes;
    }
    if let Some(severity) = args.severity {
        case.severity = severity;
    }
    if let Some(priority) = args.priority {
        case.priority = priority;
    }
    let status = case.status;

    save_store(&workspace, &store)?;

    println!(
        "{} Updated {} (status: {})",
        style("✓").green(),
        style(&id).cyan(),
        style(status).yellow()
    );
    Ok(())
}
