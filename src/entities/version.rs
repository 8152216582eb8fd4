//! Project and version entity types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::test_case::{CaseStatus, TestCaseRecord};

/// One release under test, holding its test cases in creation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// Version label, unique within its project (e.g. "1.2.0")
    pub name: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Test cases recorded against this version
    #[serde(default)]
    pub cases: Vec<TestCaseRecord>,
}

impl Version {
    /// Create an empty version
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: Utc::now(),
            cases: Vec::new(),
        }
    }

    /// A version is fully resolved when every case is verified
    pub fn is_fully_resolved(&self) -> bool {
        self.cases.iter().all(|c| c.status == CaseStatus::Verified)
    }

    /// Number of cases not yet verified
    pub fn unresolved_count(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| c.status != CaseStatus::Verified)
            .count()
    }
}

/// A QA project: a creation-ordered list of versions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project name, unique within the workspace
    pub name: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Versions in creation order
    #[serde(default)]
    pub versions: Vec<Version>,
}

impl Project {
    /// Create a project with no versions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: Utc::now(),
            versions: Vec::new(),
        }
    }

    /// Look up a version by name
    pub fn version(&self, name: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.name == name)
    }

    /// Look up a version by name, mutably
    pub fn version_mut(&mut self, name: &str) -> Option<&mut Version> {
        self.versions.iter_mut().find(|v| v.name == name)
    }

    /// The most recently opened version
    pub fn latest_version(&self) -> Option<&Version> {
        self.versions.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_case::TestCaseRecord;

    #[test]
    fn test_empty_version_is_resolved() {
        let version = Version::new("1.0");
        assert!(version.is_fully_resolved());
        assert_eq!(version.unresolved_count(), 0);
    }

    #[test]
    fn test_unresolved_counting() {
        let mut version = Version::new("1.0");
        version.cases.push(TestCaseRecord::new("Bug A", "Test A"));

        let mut verified = TestCaseRecord::new("Bug B", "Test B");
        verified.is_fixed = true;
        verified.is_verified = true;
        verified.status = CaseStatus::Verified;
        version.cases.push(verified);

        assert!(!version.is_fully_resolved());
        assert_eq!(version.unresolved_count(), 1);
    }

    #[test]
    fn test_project_version_lookup() {
        let mut project = Project::new("Website");
        project.versions.push(Version::new("1.0"));
        project.versions.push(Version::new("1.1"));

        assert!(project.version("1.0").is_some());
        assert!(project.version("2.0").is_none());
        assert_eq!(project.latest_version().unwrap().name, "1.1");
    }
}
