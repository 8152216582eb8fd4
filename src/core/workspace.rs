//! Workspace discovery and structure
//!
//! A casetrack workspace is any directory containing a `.casetrack/`
//! marker directory, which in turn holds the JSON store.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marker directory name
const MARKER_DIR: &str = ".casetrack";

/// Store file name inside the marker directory
const STORE_FILE: &str = "store.json";

/// Errors that can occur finding or creating a workspace
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("No casetrack workspace found (searched from {searched_from}). Run 'casetrack init' first")]
    NotFound { searched_from: PathBuf },

    #[error("A casetrack workspace already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(String),
}

/// A casetrack workspace on disk
#[derive(Debug)]
pub struct Workspace {
    /// Root directory (parent of .casetrack/)
    root: PathBuf,
}

impl Workspace {
    /// Find the workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current =
            std::env::current_dir().map_err(|e| WorkspaceError::Io(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::Io(e.to_string()))?;

        loop {
            if current.join(MARKER_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new workspace at the given path
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let marker = root.join(MARKER_DIR);
        if marker.exists() {
            return Err(WorkspaceError::AlreadyExists(root));
        }

        std::fs::create_dir_all(&marker).map_err(|e| WorkspaceError::Io(e.to_string()))?;

        Ok(Self { root })
    }

    /// Workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the JSON store file
    pub fn store_path(&self) -> PathBuf {
        self.root.join(MARKER_DIR).join(STORE_FILE)
    }
}
