//! CSV interchange: field codec, row grouping, import and export
//!
//! Two wire schemas are supported:
//!
//! - flat (simple template): `bug,test,result,severity,priority,notes`
//! - localized sheet: `appName,language,title,description,steps,expectedResult`,
//!   one row per language, steps pipe-encoded
//!
//! Import is strict about headers and permissive about row values; see
//! [`import`] for the details.

pub mod export;
pub mod field;
pub mod group;
pub mod import;

use thiserror::Error;

/// File-level errors that abort an import before any record is built
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Input must contain a header row and at least one data row")]
    Empty,

    #[error("Missing required column '{column}' for the {schema} format")]
    MissingColumn {
        column: &'static str,
        schema: &'static str,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

pub use export::{export_flat_records, export_localized_records};
pub use group::group_rows;
pub use import::{
    import_flat_records, import_localized_records, parse_flat, parse_localized, FlatRow,
    LocalizedRow,
};
