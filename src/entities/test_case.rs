//! Test case entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::CaseId;
use crate::core::status::{CaseFlags, Transition};

/// How badly the defect hurts when the test fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Severity {
    Critical,
    High,
    Medium,
    #[default]
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// How urgently the test case should be worked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Lifecycle status, always derived from the two flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum CaseStatus {
    #[default]
    Open,
    Fixed,
    Verified,
}

impl CaseStatus {
    /// Derive the status label from the flag pair.
    ///
    /// Verified wins over Fixed; a record with neither flag is Open.
    /// Callers must never set a verified flag on an unfixed record
    /// (the status engine enforces this), so the (false, true)
    /// combination cannot arise from a persisted record.
    pub fn from_flags(is_fixed: bool, is_verified: bool) -> Self {
        if is_verified {
            CaseStatus::Verified
        } else if is_fixed {
            CaseStatus::Fixed
        } else {
            CaseStatus::Open
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseStatus::Open => write!(f, "open"),
            CaseStatus::Fixed => write!(f, "fixed"),
            CaseStatus::Verified => write!(f, "verified"),
        }
    }
}

impl std::str::FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(CaseStatus::Open),
            "fixed" => Ok(CaseStatus::Fixed),
            "verified" => Ok(CaseStatus::Verified),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// A single manual test case inside a project version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseRecord {
    /// Unique identifier, assigned by the store on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CaseId>,

    /// Bug summary or category
    pub bug: String,

    /// What to test
    pub test: String,

    /// Observed result of the last execution
    #[serde(default)]
    pub result: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Defect severity
    #[serde(default)]
    pub severity: Severity,

    /// Work priority
    #[serde(default)]
    pub priority: Priority,

    /// Whether a developer marked the underlying defect fixed
    #[serde(default)]
    pub is_fixed: bool,

    /// Whether a tester confirmed the fix
    #[serde(default)]
    pub is_verified: bool,

    /// Derived status; written together with the flags, never edited alone
    #[serde(default)]
    pub status: CaseStatus,

    /// Stamped the first time is_fixed goes false -> true.
    /// Never cleared afterwards, including on a later unfix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tested_at: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl TestCaseRecord {
    /// Create a new open test case
    pub fn new(bug: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            id: None,
            bug: bug.into(),
            test: test.into(),
            result: String::new(),
            notes: String::new(),
            severity: Severity::default(),
            priority: Priority::default(),
            is_fixed: false,
            is_verified: false,
            status: CaseStatus::Open,
            tested_at: None,
            created: Utc::now(),
        }
    }

    /// Snapshot the lifecycle flags for the status engine
    pub fn flags(&self) -> CaseFlags {
        CaseFlags {
            is_fixed: self.is_fixed,
            is_verified: self.is_verified,
            tested_at: self.tested_at,
        }
    }

    /// Write back a transition computed by the status engine.
    ///
    /// Flags, status and tested_at land together so the derived
    /// status can never drift from the flags.
    pub fn apply_transition(&mut self, transition: Transition) {
        self.is_fixed = transition.is_fixed;
        self.is_verified = transition.is_verified;
        self.status = transition.status;
        self.tested_at = transition.tested_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_open() {
        let case = TestCaseRecord::new("Login bug", "Check the login form");
        assert!(case.id.is_none());
        assert_eq!(case.status, CaseStatus::Open);
        assert!(!case.is_fixed);
        assert!(!case.is_verified);
        assert!(case.tested_at.is_none());
        assert_eq!(case.severity, Severity::Low);
        assert_eq!(case.priority, Priority::Low);
    }

    #[test]
    fn test_status_from_flags() {
        assert_eq!(CaseStatus::from_flags(false, false), CaseStatus::Open);
        assert_eq!(CaseStatus::from_flags(true, false), CaseStatus::Fixed);
        assert_eq!(CaseStatus::from_flags(true, true), CaseStatus::Verified);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("verified".parse::<CaseStatus>().unwrap(), CaseStatus::Verified);
        assert!("urgent".parse::<Severity>().is_err());
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_record_json_roundtrip() {
        let mut case = TestCaseRecord::new("Crash on save", "Save with empty title");
        case.severity = Severity::High;
        case.notes = "repro on build 42".to_string();

        let json = serde_json::to_string(&case).unwrap();
        let parsed: TestCaseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(case, parsed);
    }
}
