//! Version gate: may a new version be opened?
//!
//! A project may only open a new version once every existing version
//! is fully resolved (all cases verified). Pure and read-only; callers
//! fetch the current version list immediately before checking, since
//! case statuses change between requests. Nothing is cached here.

use crate::entities::version::Version;

/// True if a new version may be opened: no versions yet, or every
/// existing version has only verified cases.
pub fn can_open_new_version(existing: &[Version]) -> bool {
    existing.iter().all(Version::is_fully_resolved)
}

/// The versions that currently block opening a new one
pub fn blocking_versions(existing: &[Version]) -> Vec<&Version> {
    existing.iter().filter(|v| !v.is_fully_resolved()).collect()
}
