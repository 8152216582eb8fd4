//! Legacy multi-language test case entity type
//!
//! These records come from the old per-app test case sheets where one
//! logical test case carries a translation per language. Translation
//! storage only; rendering is up to the consumer.

use serde::{Deserialize, Serialize};

use crate::core::identity::CaseId;

/// Language code used to key translations
pub const ENGLISH: &str = "en";

/// One language-specific rendering of a test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Language code ("en", "ja", ...)
    pub language: String,

    /// Title in this language
    pub title: String,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Step-by-step instructions, newline separated
    pub steps: String,

    /// What a passing run looks like
    pub expected_result: String,
}

/// A test case with one translation per language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedTestCaseRecord {
    /// Unique identifier, assigned by the store on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CaseId>,

    /// The application this case belongs to
    pub app_name: String,

    /// Optional key linking back to the sheet template the case came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_key: Option<String>,

    /// Translations, at most one per language
    pub translations: Vec<Translation>,
}

impl LocalizedTestCaseRecord {
    /// Create an empty record for an application
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            id: None,
            app_name: app_name.into(),
            template_key: None,
            translations: Vec::new(),
        }
    }

    /// Look up the translation for a language
    pub fn translation(&self, language: &str) -> Option<&Translation> {
        self.translations.iter().find(|t| t.language == language)
    }

    /// Whether a translation for this language is already present
    pub fn has_language(&self, language: &str) -> bool {
        self.translation(language).is_some()
    }

    /// The canonical English title, if an English translation exists
    pub fn english_title(&self) -> Option<&str> {
        self.translation(ENGLISH).map(|t| t.title.as_str())
    }

    /// Add a translation; returns false (and keeps the record
    /// unchanged) if the language is already present.
    pub fn push_translation(&mut self, translation: Translation) -> bool {
        if self.has_language(&translation.language) {
            return false;
        }
        self.translations.push(translation);
        true
    }
}
