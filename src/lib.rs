//! casetrack: manual QA test case tracking
//!
//! Tracks test cases across project versions with a strict status
//! lifecycle (open -> fixed -> verified) and moves them in and out of
//! the tool through two CSV interchange formats.

pub mod cli;
pub mod core;
pub mod entities;
pub mod interchange;
pub mod store;
