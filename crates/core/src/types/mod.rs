//! Core types for the treasury portal.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod region;
pub mod role;

pub use email::{Email, EmailError};
pub use region::{RegionId, RegionParseError, Scope};
pub use role::{AdminRole, ChatRole, RoleParseError};
