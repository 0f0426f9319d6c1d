//! Session-stored portal identity.

use treasury_core::{AdminRole, Email, Scope};

/// The authenticated portal user.
///
/// Created at successful login, immutable for the session, destroyed at
/// logout. Every operation derives its visibility from this value rather
/// than from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The user's email address.
    pub email: Email,
    /// The user's display name.
    pub name: String,
    /// The user's role, including the home region for regional admins.
    pub role: AdminRole,
}

impl Identity {
    /// Create a new identity.
    #[must_use]
    pub fn new(email: Email, name: impl Into<String>, role: AdminRole) -> Self {
        Self {
            email,
            name: name.into(),
            role,
        }
    }

    /// The region of record: `ALL` for a super admin, the home region for
    /// a regional admin.
    #[must_use]
    pub const fn home_region(&self) -> Scope {
        self.role.home_region()
    }
}
