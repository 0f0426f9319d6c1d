//! Unified error handling for the portal.

use thiserror::Error;

use crate::access::AccessError;
use crate::chat::ChatError;
use crate::directory::DirectoryError;
use crate::session::SessionError;
use crate::storage::StoreError;

/// Application-level error type for the portal core.
///
/// Collaborator failures are converted at the boundary; none of them may
/// corrupt the portal's own session or scope state.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Session read failed or no login is recorded.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Scope resolution rejected the request.
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// The identity provider refused or failed.
    #[error("identity provider error: {0}")]
    Directory(#[from] DirectoryError),

    /// The object store refused or failed.
    #[error("document store error: {0}")]
    Store(#[from] StoreError),

    /// The chat simulator rejected the input.
    #[error("chat error: {0}")]
    Chat(#[from] ChatError),
}
