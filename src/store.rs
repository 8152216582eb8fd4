//! JSON file store for the workspace
//!
//! The whole workspace lives in one JSON document. Commands load it,
//! mutate it in memory, and save it back with a single atomic write
//! (temp file + rename), so a bulk import either lands completely or
//! not at all — readers never observe a partially imported file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::CaseId;
use crate::entities::localized::LocalizedTestCaseRecord;
use crate::entities::test_case::TestCaseRecord;
use crate::entities::version::{Project, Version};

/// Errors raised by store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Version '{version}' not found in project '{project}'")]
    VersionNotFound { project: String, version: String },

    #[error("Test case '{0}' not found")]
    CaseNotFound(String),

    #[error("Project '{0}' already exists")]
    DuplicateProject(String),

    #[error("Version '{version}' already exists in project '{project}'")]
    DuplicateVersion { project: String, version: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The persisted workspace state
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Store {
    /// QA projects with their versions and cases
    #[serde(default)]
    pub projects: Vec<Project>,

    /// Legacy multi-language records, kept per app rather than per version
    #[serde(default)]
    pub localized: Vec<LocalizedTestCaseRecord>,
}

impl Store {
    /// Load the store from disk; a missing file is an empty store
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the store atomically: write a temp file next to the target,
    /// then rename over it.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Look up a project by name
    pub fn project(&self, name: &str) -> Result<&Project, StoreError> {
        self.projects
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| StoreError::ProjectNotFound(name.to_string()))
    }

    /// Look up a project by name, mutably
    pub fn project_mut(&mut self, name: &str) -> Result<&mut Project, StoreError> {
        self.projects
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| StoreError::ProjectNotFound(name.to_string()))
    }

    /// Add a new, empty project
    pub fn add_project(&mut self, name: &str) -> Result<&mut Project, StoreError> {
        if self.projects.iter().any(|p| p.name == name) {
            return Err(StoreError::DuplicateProject(name.to_string()));
        }
        self.projects.push(Project::new(name));
        Ok(self.projects.last_mut().unwrap())
    }

    /// Add a new, empty version to a project. The caller is expected
    /// to have consulted the version gate first; this only guards
    /// against duplicate names.
    pub fn add_version(&mut self, project: &str, version: &str) -> Result<(), StoreError> {
        let proj = self.project_mut(project)?;
        if proj.version(version).is_some() {
            return Err(StoreError::DuplicateVersion {
                project: project.to_string(),
                version: version.to_string(),
            });
        }
        proj.versions.push(Version::new(version));
        Ok(())
    }

    /// Insert test cases into a project version, assigning ids.
    /// Returns the assigned ids in insertion order.
    pub fn insert_cases(
        &mut self,
        project: &str,
        version: &str,
        cases: Vec<TestCaseRecord>,
    ) -> Result<Vec<CaseId>, StoreError> {
        let proj = self.project_mut(project)?;
        let ver = proj
            .version_mut(version)
            .ok_or_else(|| StoreError::VersionNotFound {
                project: project.to_string(),
                version: version.to_string(),
            })?;

        let mut ids = Vec::with_capacity(cases.len());
        for mut case in cases {
            let id = CaseId::new();
            ids.push(id.clone());
            case.id = Some(id);
            ver.cases.push(case);
        }
        Ok(ids)
    }

    /// Insert localized records, assigning ids
    pub fn insert_localized(&mut self, records: Vec<LocalizedTestCaseRecord>) -> Vec<CaseId> {
        let mut ids = Vec::with_capacity(records.len());
        for mut record in records {
            let id = CaseId::new();
            ids.push(id.clone());
            record.id = Some(id);
            self.localized.push(record);
        }
        ids
    }

    /// Find a test case anywhere in the workspace by id
    pub fn find_case_mut(&mut self, id: &CaseId) -> Result<&mut TestCaseRecord, StoreError> {
        self.projects
            .iter_mut()
            .flat_map(|p| p.versions.iter_mut())
            .flat_map(|v| v.cases.iter_mut())
            .find(|c| c.id.as_ref() == Some(id))
            .ok_or_else(|| StoreError::CaseNotFound(id.to_string()))
    }

    /// Localized records for one app, in stored order
    pub fn localized_for_app(&self, app_name: &str) -> Vec<&LocalizedTestCaseRecord> {
        self.localized
            .iter()
            .filter(|r| r.app_name == app_name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_with_project() -> Store {
        let mut store = Store::default();
        store.add_project("Website").unwrap();
        store.add_version("Website", "1.0").unwrap();
        store
    }

    #[test]
    fn test_insert_assigns_ids() {
        let mut store = store_with_project();
        let ids = store
            .insert_cases(
                "Website",
                "1.0",
                vec![
                    TestCaseRecord::new("Bug A", "Test A"),
                    TestCaseRecord::new("Bug B", "Test B"),
                ],
            )
            .unwrap();

        assert_eq!(ids.len(), 2);
        let version = store.project("Website").unwrap().version("1.0").unwrap();
        assert_eq!(version.cases.len(), 2);
        assert_eq!(version.cases[0].id, Some(ids[0].clone()));
    }

    #[test]
    fn test_find_case_by_id() {
        let mut store = store_with_project();
        let ids = store
            .insert_cases("Website", "1.0", vec![TestCaseRecord::new("Bug", "Test")])
            .unwrap();

        let case = store.find_case_mut(&ids[0]).unwrap();
        assert_eq!(case.bug, "Bug");

        let missing = CaseId::new();
        assert!(matches!(
            store.find_case_mut(&missing),
            Err(StoreError::CaseNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut store = store_with_project();
        assert!(matches!(
            store.add_project("Website"),
            Err(StoreError::DuplicateProject(_))
        ));
        assert!(matches!(
            store.add_version("Website", "1.0"),
            Err(StoreError::DuplicateVersion { .. })
        ));
    }

    #[test]
    fn test_unknown_targets_rejected() {
        let mut store = store_with_project();
        assert!(matches!(
            store.insert_cases("Nowhere", "1.0", vec![]),
            Err(StoreError::ProjectNotFound(_))
        ));
        assert!(matches!(
            store.insert_cases("Website", "9.9", vec![]),
            Err(StoreError::VersionNotFound { .. })
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("store.json");

        let mut store = store_with_project();
        store
            .insert_cases("Website", "1.0", vec![TestCaseRecord::new("Bug", "Test")])
            .unwrap();
        store.save(&path).unwrap();

        // no temp file left behind
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = Store::load(&path).unwrap();
        assert_eq!(loaded.projects.len(), 1);
        assert_eq!(
            loaded.project("Website").unwrap().version("1.0").unwrap().cases.len(),
            1
        );
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let tmp = tempdir().unwrap();
        let store = Store::load(&tmp.path().join("absent.json")).unwrap();
        assert!(store.projects.is_empty());
        assert!(store.localized.is_empty());
    }
}
