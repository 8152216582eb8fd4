//! Test case identity using prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Prefix carried by every test case id
const CASE_PREFIX: &str = "TC";

/// Errors that can occur parsing a case id
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("Missing '-' delimiter in id: {0}")]
    MissingDelimiter(String),

    #[error("Invalid id prefix '{0}' (expected 'TC')")]
    InvalidPrefix(String),

    #[error("Invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

/// A unique test case identifier ("TC-" + ULID)
///
/// Ids are assigned by the store on insert; records built by the
/// importer or by `TestCaseRecord::new` carry no id yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseId(Ulid);

impl CaseId {
    /// Create a new random CaseId
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.0
    }

    /// Parse a CaseId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl Default for CaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", CASE_PREFIX, self.0)
    }
}

impl FromStr for CaseId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        if !prefix.eq_ignore_ascii_case(CASE_PREFIX) {
            return Err(IdParseError::InvalidPrefix(prefix.to_string()));
        }

        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self(ulid))
    }
}

impl Serialize for CaseId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CaseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
