//! Shared helper functions for CLI commands

use chrono::{DateTime, Utc};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::core::workspace::Workspace;
use crate::store::Store;

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Format a timestamp for table output (date only)
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Discover the workspace and load its store
pub fn open_store() -> Result<(Workspace, Store)> {
    let workspace = Workspace::discover().map_err(|e| miette::miette!("{}", e))?;
    let store = Store::load(&workspace.store_path()).map_err(|e| miette::miette!("{}", e))?;
    Ok((workspace, store))
}

/// Persist the store back to the workspace
pub fn save_store(workspace: &Workspace, store: &Store) -> Result<()> {
    store
        .save(&workspace.store_path())
        .map_err(|e| miette::miette!("{}", e))
}

/// Write text to a file, or to stdout when no path is given
pub fn write_output(text: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, text).into_diagnostic()?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}
