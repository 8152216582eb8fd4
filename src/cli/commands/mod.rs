//! CLI command implementations

pub mod case;
pub mod completions;
pub mod export;
pub mod import;
pub mod init;
pub mod project;
pub mod version;
