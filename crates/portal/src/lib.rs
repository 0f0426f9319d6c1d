//! Treasury Portal - dashboard core for a document/chat portal.
//!
//! This crate is the engine behind the demo dashboard: who is logged in,
//! which region they are allowed to see, which documents and statistics
//! that scope yields, and the simulated chat assistant. The view layer,
//! the authentication protocol, object-storage semantics and real model
//! inference are external collaborators reached through capability traits.
//!
//! # Architecture
//!
//! - [`session`] - Tab-scoped identity store
//! - [`access`] - Role/region visibility resolution
//! - [`provider`] - Document and statistics capability, plus the demo tables
//! - [`chat`] - Transcript-owning chat simulator
//! - [`directory`] / [`storage`] - Identity provider and object store boundaries
//! - [`task`] - Cancellable simulated delays
//! - [`dashboard`] - The orchestrating context object
//!
//! The one invariant everything bends around: no code path returns
//! documents or statistics for a region outside the caller's authorized
//! scope.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod directory;
pub mod error;
pub mod models;
pub mod provider;
pub mod session;
pub mod storage;
pub mod task;

pub use dashboard::{Dashboard, UploadReceipt};
pub use error::PortalError;
pub use models::Identity;
