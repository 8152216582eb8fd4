//! Status engine for test case lifecycle transitions
//!
//! A test case carries two flags, `is_fixed` and `is_verified`, and a
//! status label derived from them (open / fixed / verified). Every
//! mutation of the flags funnels through this module so the two
//! invariants hold everywhere:
//!
//! - a case can only be verified while it is fixed
//! - un-fixing a verified case cascades into un-verifying it
//!
//! Both the dedicated toggle commands and the full-record update path
//! call the same transition function; there is deliberately no second
//! code path that could drift.
//!
//! All functions are pure: the caller supplies the current flags and
//! the clock, and persists the returned [`Transition`] itself.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entities::test_case::CaseStatus;

/// Errors that can occur during a status transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("Cannot verify a test case before it is fixed")]
    VerifyBeforeFix,
}

/// Snapshot of a test case's lifecycle flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseFlags {
    pub is_fixed: bool,
    pub is_verified: bool,
    pub tested_at: Option<DateTime<Utc>>,
}

/// A requested flag mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    SetFixed(bool),
    SetVerified(bool),
}

/// The computed result of a transition: new flags, the derived status,
/// and the (possibly freshly stamped) first-fix timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub is_fixed: bool,
    pub is_verified: bool,
    pub status: CaseStatus,
    pub tested_at: Option<DateTime<Utc>>,
}

/// Partial flag update from a full-record edit payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagPatch {
    pub is_fixed: Option<bool>,
    pub is_verified: Option<bool>,
}

/// Apply a single toggle action to the current flags.
///
/// `now` is only consulted when the action fixes a previously unfixed
/// case and no first-fix timestamp exists yet (first-fix-wins; a later
/// unfix does not clear it).
pub fn apply_toggle(
    current: &CaseFlags,
    action: StatusAction,
    now: DateTime<Utc>,
) -> Result<Transition, StatusError> {
    let mut is_fixed = current.is_fixed;
    let mut is_verified = current.is_verified;
    let mut tested_at = current.tested_at;

    match action {
        StatusAction::SetFixed(true) => {
            if !is_fixed && tested_at.is_none() {
                tested_at = Some(now);
            }
            is_fixed = true;
        }
        StatusAction::SetFixed(false) => {
            is_fixed = false;
            // un-fixing always un-verifies
            is_verified = false;
        }
        StatusAction::SetVerified(true) => {
            if !is_fixed {
                return Err(StatusError::VerifyBeforeFix);
            }
            is_verified = true;
        }
        StatusAction::SetVerified(false) => {
            is_verified = false;
        }
    }

    Ok(Transition {
        is_fixed,
        is_verified,
        status: CaseStatus::from_flags(is_fixed, is_verified),
        tested_at,
    })
}

/// Apply a partial flag update from a full-record edit.
///
/// The patch is reduced to toggle actions, fixed flag first, so the
/// verify-requires-fixed and unfix-cascades rules apply exactly as in
/// [`apply_toggle`]. A patch asking for `is_fixed: false` together
/// with `is_verified: true` is rejected rather than silently dropping
/// the verification.
pub fn apply_field_update(
    current: &CaseFlags,
    patch: &FlagPatch,
    now: DateTime<Utc>,
) -> Result<Transition, StatusError> {
    let mut state = *current;

    if let Some(fixed) = patch.is_fixed {
        let transition = apply_toggle(&state, StatusAction::SetFixed(fixed), now)?;
        state = CaseFlags {
            is_fixed: transition.is_fixed,
            is_verified: transition.is_verified,
            tested_at: transition.tested_at,
        };
    }

    if let Some(verified) = patch.is_verified {
        let transition = apply_toggle(&state, StatusAction::SetVerified(verified), now)?;
        state = CaseFlags {
            is_fixed: transition.is_fixed,
            is_verified: transition.is_verified,
            tested_at: transition.tested_at,
        };
    }

    Ok(Transition {
        is_fixed: state.is_fixed,
        is_verified: state.is_verified,
        status: CaseStatus::from_flags(state.is_fixed, state.is_verified),
        tested_at: state.tested_at,
    })
}
