//! Domain models for bizdesk.
//!
//! These are the core types shared across all crates.

pub mod branch;
pub mod permission;
pub mod role;
pub mod tenant;
pub mod user;
