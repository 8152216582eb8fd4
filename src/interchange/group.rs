//! Row grouping for the localized sheet format
//!
//! The localized CSV carries one physical row per language, and one
//! logical test case spans several rows. Grouping reconstructs the
//! logical records. The accumulator is explicit: all groups live in a
//! single vector in open order, and a per-app index maps each app name
//! to the indices of its groups, so rows can never leak across apps.
//!
//! Grouping policy (the sheets give no record ids, so this is a
//! heuristic, chosen deliberately and tested):
//!
//! - An English row joins the group for its app whose English title
//!   equals the row's title; otherwise it opens a new group.
//! - A non-English row joins the most recently opened group for its
//!   app that does not yet contain that language; otherwise it opens
//!   a new group.
//!
//! Consequences: a file whose rows for an app are all in one
//! non-English language degrades to one group per row (every earlier
//! group already has that language). A duplicate English row (same
//! app, same title) is dropped, since its group already holds an
//! English translation. Non-English rows with no preceding English
//! row form title-less groups rather than failing the import.

use std::collections::HashMap;

use crate::entities::localized::{LocalizedTestCaseRecord, Translation, ENGLISH};
use crate::interchange::field::pipes_to_newlines;
use crate::interchange::import::LocalizedRow;

/// Assemble flat rows into logical multi-language records.
///
/// Records come back in the order their first row appeared; steps have
/// the pipe separators converted back to real newlines.
pub fn group_rows(rows: Vec<LocalizedRow>) -> Vec<LocalizedTestCaseRecord> {
    let mut groups: Vec<LocalizedTestCaseRecord> = Vec::new();
    let mut by_app: HashMap<String, Vec<usize>> = HashMap::new();

    for row in rows {
        let app_groups = by_app.entry(row.app_name.clone()).or_default();

        let target = if row.language == ENGLISH {
            app_groups
                .iter()
                .copied()
                .find(|&i| groups[i].english_title() == Some(row.title.as_str()))
        } else {
            app_groups
                .iter()
                .rev()
                .copied()
                .find(|&i| !groups[i].has_language(&row.language))
        };

        let index = match target {
            Some(i) => i,
            None => {
                groups.push(LocalizedTestCaseRecord::new(row.app_name.clone()));
                let i = groups.len() - 1;
                app_groups.push(i);
                i
            }
        };

        groups[index].push_translation(Translation {
            language: row.language,
            title: row.title,
            description: row.description,
            steps: pipes_to_newlines(&row.steps),
            expected_result: row.expected_result,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(app: &str, lang: &str, title: &str, steps: &str) -> LocalizedRow {
        LocalizedRow {
            app_name: app.to_string(),
            language: lang.to_string(),
            title: title.to_string(),
            description: None,
            steps: steps.to_string(),
            expected_result: "OK".to_string(),
        }
    }

    #[test]
    fn test_english_and_japanese_rows_merge() {
        let rows = vec![
            row("MyApp", "en", "Login", "1. A|2. B"),
            row("MyApp", "ja", "ログイン", "1. あ|2. い"),
        ];

        let records = group_rows(rows);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.app_name, "MyApp");
        assert_eq!(record.translations.len(), 2);
        assert_eq!(record.english_title(), Some("Login"));
        assert_eq!(record.translation("en").unwrap().steps, "1. A\n2. B");
        assert_eq!(record.translation("ja").unwrap().steps, "1. あ\n2. い");
    }

    #[test]
    fn test_distinct_english_titles_open_distinct_groups() {
        let rows = vec![
            row("MyApp", "en", "Login", "1. A"),
            row("MyApp", "en", "Logout", "1. B"),
            row("MyApp", "ja", "ログアウト", "1. い"),
        ];

        let records = group_rows(rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].english_title(), Some("Login"));
        assert_eq!(records[1].english_title(), Some("Logout"));
        // the ja row joins the most recently opened group
        assert!(records[1].has_language("ja"));
        assert!(!records[0].has_language("ja"));
    }

    #[test]
    fn test_non_english_only_degrades_to_one_group_per_row() {
        let rows = vec![
            row("MyApp", "ja", "ログイン", "1. あ"),
            row("MyApp", "ja", "ログアウト", "1. い"),
        ];

        let records = group_rows(rows);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.translations.len(), 1);
            assert!(record.english_title().is_none());
        }
    }

    #[test]
    fn test_apps_do_not_share_groups() {
        let rows = vec![
            row("AppOne", "en", "Login", "1. A"),
            row("AppTwo", "ja", "ログイン", "1. あ"),
        ];

        let records = group_rows(rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].app_name, "AppOne");
        assert_eq!(records[1].app_name, "AppTwo");
        assert_eq!(records[1].translations.len(), 1);
    }

    #[test]
    fn test_interleaved_apps_keep_their_own_latest_group() {
        let rows = vec![
            row("AppOne", "en", "Login", "1. A"),
            row("AppTwo", "en", "Search", "1. S"),
            row("AppOne", "ja", "ログイン", "1. あ"),
            row("AppTwo", "ja", "検索", "1. け"),
        ];

        let records = group_rows(rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].translation("ja").unwrap().title, "ログイン");
        assert_eq!(records[1].translation("ja").unwrap().title, "検索");
    }

    #[test]
    fn test_duplicate_english_row_dropped() {
        let rows = vec![
            row("MyApp", "en", "Login", "1. A"),
            row("MyApp", "en", "Login", "1. A again"),
        ];

        let records = group_rows(rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].translations.len(), 1);
        assert_eq!(records[0].translation("en").unwrap().steps, "1. A");
    }

    #[test]
    fn test_three_languages_one_record() {
        let rows = vec![
            row("MyApp", "en", "Login", "1. A"),
            row("MyApp", "ja", "ログイン", "1. あ"),
            row("MyApp", "de", "Anmeldung", "1. Ö"),
        ];

        let records = group_rows(rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].translations.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_rows(Vec::new()).is_empty());
    }
}
