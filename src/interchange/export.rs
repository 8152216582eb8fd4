//! CSV export for both interchange schemas
//!
//! Every field goes through [`encode_field`], so values containing the
//! delimiter, quotes or newlines come back intact when the output is
//! fed to the quote-aware importer. The flat and localized headers are
//! fixed; column order matches the documented wire formats.

use crate::entities::localized::LocalizedTestCaseRecord;
use crate::entities::test_case::TestCaseRecord;
use crate::interchange::field::{encode_field, newlines_to_pipes};

/// Header of the flat (simple template) schema
pub const FLAT_HEADER: &str = "bug,test,result,severity,priority,notes";

/// Header of the localized sheet schema
pub const LOCALIZED_HEADER: &str = "appName,language,title,description,steps,expectedResult";

/// Emit flat records as CSV text, one line per record
pub fn export_flat_records(records: &[TestCaseRecord]) -> String {
    let mut lines = vec![FLAT_HEADER.to_string()];

    for record in records {
        let fields = [
            encode_field(&record.bug),
            encode_field(&record.test),
            encode_field(&record.result),
            record.severity.to_string(),
            record.priority.to_string(),
            encode_field(&record.notes),
        ];
        lines.push(fields.join(","));
    }

    lines.join("\n") + "\n"
}

/// Emit localized records as CSV text, one line per translation.
///
/// The app name repeats on every line and steps travel pipe-encoded,
/// matching the legacy sheet layout the importer groups back together.
pub fn export_localized_records(records: &[LocalizedTestCaseRecord]) -> String {
    let mut lines = vec![LOCALIZED_HEADER.to_string()];

    for record in records {
        for translation in &record.translations {
            let fields = [
                encode_field(&record.app_name),
                encode_field(&translation.language),
                encode_field(&translation.title),
                encode_field(translation.description.as_deref().unwrap_or("")),
                encode_field(&newlines_to_pipes(&translation.steps)),
                encode_field(&translation.expected_result),
            ];
            lines.push(fields.join(","));
        }
    }

    lines.join("\n") + "\n"
}
