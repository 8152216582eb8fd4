//! Core module - fundamental types and pure lifecycle logic

pub mod gate;
pub mod identity;
pub mod status;
pub mod workspace;

pub use gate::{blocking_versions, can_open_new_version};
pub use identity::{CaseId, IdParseError};
pub use status::{
    apply_field_update, apply_toggle, CaseFlags, FlagPatch, StatusAction, StatusError, Transition,
};
pub use workspace::{Workspace, WorkspaceError};
