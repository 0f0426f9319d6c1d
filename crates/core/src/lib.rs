//! Treasury Core - Shared types library.
//!
//! This crate provides the common domain types used by the treasury portal:
//! - `portal` - The dashboard core (session, access control, content, chat)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no clocks, no external
//! service clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Region codes, visibility scopes, roles, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
