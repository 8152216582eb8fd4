//! Entity type definitions
//!
//! - [`TestCaseRecord`] - One manual test case inside a project version
//! - [`LocalizedTestCaseRecord`] - Legacy multi-language test case with
//!   one [`Translation`] per language
//! - [`Version`] / [`Project`] - A release under test and the project
//!   that owns it

pub mod localized;
pub mod test_case;
pub mod version;

pub use localized::{LocalizedTestCaseRecord, Translation};
pub use test_case::{CaseStatus, Priority, Severity, TestCaseRecord};
pub use version::{Project, Version};
