//! CSV import for both interchange schemas
//!
//! Parsing runs in two stages: the `csv` crate tokenizes the raw text
//! (quote-aware, so commas and newlines inside quoted fields survive),
//! then each record is lifted into a typed row struct. Nothing past
//! this module works with raw string maps.
//!
//! Header validation is strict (a missing required column rejects the
//! whole file before any rows are read); row values are permissive (a
//! row with an empty required value still produces a record carrying
//! the empty string, and unknown severity/priority values fall back to
//! the defaults).

use std::collections::HashMap;

use crate::entities::localized::LocalizedTestCaseRecord;
use crate::entities::test_case::{Priority, Severity, TestCaseRecord};
use crate::interchange::group::group_rows;
use crate::interchange::FormatError;

/// Columns a flat (simple template) file must declare
const FLAT_REQUIRED: &[&str] = &["bug", "test"];

/// Columns a localized sheet file must declare
const LOCALIZED_REQUIRED: &[&str] = &["appname", "language", "title", "steps", "expectedresult"];

/// One tokenized row of the flat schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub bug: String,
    pub test: String,
    pub result: String,
    pub notes: String,
    pub severity: Option<Severity>,
    pub priority: Option<Priority>,
}

/// One tokenized row of the localized sheet schema.
/// `steps` is still pipe-encoded at this stage; the grouper converts
/// the pipes back to newlines when it builds translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedRow {
    pub app_name: String,
    pub language: String,
    pub title: String,
    pub description: Option<String>,
    pub steps: String,
    pub expected_result: String,
}

/// Tokenize CSV text and validate the header against required columns.
///
/// Returns the header map (lower-cased, trimmed name -> column index)
/// and the data records. Fails if the file has no header or no data
/// rows, or if a required column is absent.
fn read_rows(
    text: &str,
    required: &[&'static str],
    schema: &'static str,
) -> Result<(HashMap<String, usize>, Vec<csv::StringRecord>), FormatError> {
    if text.trim().is_empty() {
        return Err(FormatError::Empty);
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let header_map: HashMap<String, usize> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase().trim().to_string(), i))
        .collect();

    for &column in required {
        if !header_map.contains_key(column) {
            return Err(FormatError::MissingColumn { column, schema });
        }
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    if records.is_empty() {
        return Err(FormatError::Empty);
    }

    Ok((header_map, records))
}

/// Get a non-empty field value from a record by column name
fn get_field(
    record: &csv::StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<String> {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse flat (simple template) CSV text into typed rows
pub fn parse_flat(text: &str) -> Result<Vec<FlatRow>, FormatError> {
    let (header_map, records) = read_rows(text, FLAT_REQUIRED, "flat")?;

    Ok(records
        .iter()
        .map(|record| FlatRow {
            bug: get_field(record, &header_map, "bug").unwrap_or_default(),
            test: get_field(record, &header_map, "test").unwrap_or_default(),
            result: get_field(record, &header_map, "result").unwrap_or_default(),
            notes: get_field(record, &header_map, "notes").unwrap_or_default(),
            severity: get_field(record, &header_map, "severity").and_then(|s| s.parse().ok()),
            priority: get_field(record, &header_map, "priority").and_then(|s| s.parse().ok()),
        })
        .collect())
}

/// Parse localized sheet CSV text into typed rows
pub fn parse_localized(text: &str) -> Result<Vec<LocalizedRow>, FormatError> {
    let (header_map, records) = read_rows(text, LOCALIZED_REQUIRED, "localized")?;

    Ok(records
        .iter()
        .map(|record| LocalizedRow {
            app_name: get_field(record, &header_map, "appname").unwrap_or_default(),
            language: get_field(record, &header_map, "language").unwrap_or_default(),
            title: get_field(record, &header_map, "title").unwrap_or_default(),
            description: get_field(record, &header_map, "description"),
            steps: get_field(record, &header_map, "steps").unwrap_or_default(),
            expected_result: get_field(record, &header_map, "expectedresult").unwrap_or_default(),
        })
        .collect())
}

/// Map flat rows one-to-one onto open test case records
pub fn import_flat_records(rows: Vec<FlatRow>) -> Vec<TestCaseRecord> {
    rows.into_iter()
        .map(|row| {
            let mut case = TestCaseRecord::new(row.bug, row.test);
            case.result = row.result;
            case.notes = row.notes;
            case.severity = row.severity.unwrap_or_default();
            case.priority = row.priority.unwrap_or_default();
            case
        })
        .collect()
}

/// Assemble localized rows into multi-language records
pub fn import_localized_records(rows: Vec<LocalizedRow>) -> Vec<LocalizedTestCaseRecord> {
    group_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_case::CaseStatus;

    #[test]
    fn test_quoted_comma_preserved() {
        let text = "bug,test,result,severity,priority,notes\n\
                    Login Bug,\"Check, then verify\",Error shown,High,High,\"\"\n";
        let rows = parse_flat(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].test, "Check, then verify");
        assert_eq!(rows[0].severity, Some(Severity::High));
        assert_eq!(rows[0].priority, Some(Priority::High));
        assert_eq!(rows[0].notes, "");
    }

    #[test]
    fn test_quoted_newline_stays_one_record() {
        let text = "bug,test\nCrash,\"step one\nstep two\"\n";
        let rows = parse_flat(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].test, "step one\nstep two");
    }

    #[test]
    fn test_missing_required_column_rejected() {
        let text = "bug,result\nLogin Bug,Error shown\n";
        let err = parse_flat(text).unwrap_err();
        assert!(matches!(
            err,
            FormatError::MissingColumn { column: "test", .. }
        ));
    }

    #[test]
    fn test_header_only_rejected() {
        let err = parse_flat("bug,test\n").unwrap_err();
        assert!(matches!(err, FormatError::Empty));
    }

    #[test]
    fn test_blank_input_rejected() {
        assert!(matches!(parse_flat(""), Err(FormatError::Empty)));
        assert!(matches!(parse_flat("  \n \n"), Err(FormatError::Empty)));
    }

    #[test]
    fn test_header_case_and_whitespace_normalized() {
        let text = " Bug , TEST \nLogin Bug,Check login\n";
        let rows = parse_flat(text).unwrap();
        assert_eq!(rows[0].bug, "Login Bug");
        assert_eq!(rows[0].test, "Check login");
    }

    #[test]
    fn test_flat_defaults_applied() {
        let text = "bug,test\nLogin Bug,Check login\n";
        let cases = import_flat_records(parse_flat(text).unwrap());
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].severity, Severity::Low);
        assert_eq!(cases[0].priority, Priority::Low);
        assert_eq!(cases[0].result, "");
        assert_eq!(cases[0].notes, "");
        assert_eq!(cases[0].status, CaseStatus::Open);
        assert!(cases[0].id.is_none());
    }

    #[test]
    fn test_unknown_severity_falls_back_to_default() {
        let text = "bug,test,severity,priority\nLogin Bug,Check,catastrophic,urgent\n";
        let cases = import_flat_records(parse_flat(text).unwrap());
        assert_eq!(cases[0].severity, Severity::Low);
        assert_eq!(cases[0].priority, Priority::Low);
    }

    #[test]
    fn test_empty_required_value_still_produces_record() {
        let text = "bug,test,result\n,Check login,Error\nLogin Bug,,\n";
        let cases = import_flat_records(parse_flat(text).unwrap());
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].bug, "");
        assert_eq!(cases[1].test, "");
    }

    #[test]
    fn test_localized_required_columns() {
        let text = "appName,language,title\nMyApp,en,Login\n";
        let err = parse_localized(text).unwrap_err();
        assert!(matches!(
            err,
            FormatError::MissingColumn {
                column: "steps",
                ..
            }
        ));
    }

    #[test]
    fn test_localized_import_groups_languages() {
        let text = "appName,language,title,description,steps,expectedResult\n\
                    MyApp,en,Login,,1. A|2. B,OK\n\
                    MyApp,ja,ログイン,,1. あ|2. い,OK\n";
        let records = import_localized_records(parse_localized(text).unwrap());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].translations.len(), 2);
        assert_eq!(records[0].translation("en").unwrap().steps, "1. A\n2. B");
    }

    #[test]
    fn test_localized_description_optional() {
        let text = "appName,language,title,steps,expectedResult\n\
                    MyApp,en,Login,1. A,OK\n";
        let rows = parse_localized(text).unwrap();
        assert_eq!(rows[0].description, None);
    }
}
