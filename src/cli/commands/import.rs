//! `casetrack import` command - Import test cases from CSV files
//!
//! The import is atomic: every record is staged against the in-memory
//! store first and a single save publishes them all. A failure at any
//! point (bad header, unknown project, IO error) persists nothing.

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{open_store, save_store};
use crate::interchange::export::{FLAT_HEADER, LOCALIZED_HEADER};
use crate::interchange::field::encode_field;
use crate::interchange::{
    import_flat_records, import_localized_records, parse_flat, parse_localized,
};

/// Which CSV schema the file uses
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ImportFormat {
    /// Simple template: bug,test,result,severity,priority,notes
    Flat,
    /// Legacy per-language sheet: appName,language,title,description,steps,expectedResult
    Localized,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV schema of the input file
    #[arg(value_enum)]
    pub format: ImportFormat,

    /// CSV file to import
    pub file: Option<PathBuf>,

    /// Print a CSV template for the schema instead of importing
    #[arg(long)]
    pub template: bool,

    /// Parse and report without persisting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Target project (flat format)
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Target version (flat format)
    #[arg(long, short = 'V')]
    pub version: Option<String>,
}

pub fn run(args: ImportArgs) -> Result<()> {
    if args.template {
        return template(args.format);
    }

    let file_path = args
        .file
        .clone()
        .ok_or_else(|| miette::miette!("CSV file required. Usage: casetrack import flat data.csv"))?;

    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }
    let text = std::fs::read_to_string(&file_path).into_diagnostic()?;

    println!(
        "{} Importing {} from {}{}",
        style("→").blue(),
        style(format_name(args.format)).cyan(),
        style(file_path.display()).yellow(),
        if args.dry_run {
            style(" (dry run)").dim().to_string()
        } else {
            String::new()
        }
    );

    match args.format {
        ImportFormat::Flat => import_flat(&text, &args),
        ImportFormat::Localized => import_localized(&text, &args),
    }
}

fn format_name(format: ImportFormat) -> &'static str {
    match format {
        ImportFormat::Flat => "flat test cases",
        ImportFormat::Localized => "localized test cases",
    }
}

fn import_flat(text: &str, args: &ImportArgs) -> Result<()> {
    let project = args
        .project
        .clone()
        .ok_or_else(|| miette::miette!("--project is required for flat imports"))?;
    let version = args
        .version
        .clone()
        .ok_or_else(|| miette::miette!("--version is required for flat imports"))?;

    let rows = parse_flat(text).map_err(|e| miette::miette!("{}", e))?;
    let cases = import_flat_records(rows);
    let count = cases.len();

    if args.dry_run {
        println!(
            "{} Would create {} test case(s) in {}/{}",
            style("○").dim(),
            count,
            project,
            version
        );
        return Ok(());
    }

    let (workspace, mut store) = open_store()?;
    store
        .insert_cases(&project, &version, cases)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&workspace, &store)?;

    println!(
        "{} Imported {} test case(s) into {}/{}",
        style("✓").green(),
        count,
        style(project).cyan(),
        style(version).cyan()
    );
    Ok(())
}

fn import_localized(text: &str, args: &ImportArgs) -> Result<()> {
    let rows = parse_localized(text).map_err(|e| miette::miette!("{}", e))?;
    let row_count = rows.len();
    let records = import_localized_records(rows);
    let count = records.len();

    if args.dry_run {
        println!(
            "{} Would create {} record(s) from {} row(s)",
            style("○").dim(),
            count,
            row_count
        );
        return Ok(());
    }

    let (workspace, mut store) = open_store()?;
    store.insert_localized(records);
    save_store(&workspace, &store)?;

    println!(
        "{} Imported {} localized record(s) from {} row(s)",
        style("✓").green(),
        count,
        row_count
    );
    Ok(())
}

fn template(format: ImportFormat) -> Result<()> {
    // output on stdout so it can be redirected to a file
    match format {
        ImportFormat::Flat => {
            println!("{}", FLAT_HEADER);
            let example = [
                encode_field("Login Bug"),
                encode_field("Check, then verify the login form"),
                encode_field("Error shown"),
                "high".to_string(),
                "high".to_string(),
                encode_field("repro on build 42"),
            ];
            println!("{}", example.join(","));
        }
        ImportFormat::Localized => {
            println!("{}", LOCALIZED_HEADER);
            let example = [
                encode_field("MyApp"),
                encode_field("en"),
                encode_field("Login"),
                encode_field("The login flow"),
                encode_field("1. Open the app|2. Tap login"),
                encode_field("Dashboard appears"),
            ];
            println!("{}", example.join(","));
        }
    }

    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to a file: casetrack import flat --template > cases.csv",
        style("→").blue()
    );
    Ok(())
}
