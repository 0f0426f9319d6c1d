//! Tab-scoped session store.
//!
//! Holds the authenticated identity as string key-value pairs for the life
//! of one logical browser tab. Written at login, read by every other
//! component, cleared at logout. There is no expiry: no real token is
//! involved.

use std::collections::HashMap;

use treasury_core::{AdminRole, Email, Scope};

use crate::models::Identity;

/// Session keys for the stored identity fields.
pub mod keys {
    /// Marker that a login has completed.
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
    /// The user's email address.
    pub const USER_EMAIL: &str = "userEmail";
    /// The user's role label.
    pub const USER_ROLE: &str = "userRole";
    /// The user's region of record (`ALL` for super admins).
    pub const USER_REGION: &str = "userRegion";
    /// The user's display name.
    pub const USER_NAME: &str = "userName";
}

/// Errors that can occur when reading the session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No login has been recorded in this session.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The stored values cannot be rebuilt into an identity.
    #[error("session data corrupted: {0}")]
    Corrupted(String),
}

/// In-memory key-value session store.
///
/// Reads observe writes immediately; there is no caching layer between the
/// store and its consumers.
#[derive(Debug, Default)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    /// Create an empty (logged-out) session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a raw session value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether a login has been recorded.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.get(keys::IS_LOGGED_IN) == Some("true")
    }

    /// Store the authenticated identity.
    pub fn create_session(&mut self, identity: &Identity) {
        self.set(keys::IS_LOGGED_IN, "true");
        self.set(keys::USER_EMAIL, identity.email.as_str());
        self.set(keys::USER_ROLE, identity.role.label());
        self.set(keys::USER_REGION, identity.home_region().as_str());
        self.set(keys::USER_NAME, identity.name.clone());
        tracing::info!(email = %identity.email, role = %identity.role, "session created");
    }

    /// Rebuild the current identity from the stored values.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when no login has been
    /// recorded, or [`SessionError::Corrupted`] when the stored values
    /// cannot be parsed back into a valid identity (including a regional
    /// admin stored with region `ALL`).
    pub fn current(&self) -> Result<Identity, SessionError> {
        if !self.is_logged_in() {
            return Err(SessionError::NotAuthenticated);
        }

        let email = Email::parse(self.require(keys::USER_EMAIL)?)
            .map_err(|e| SessionError::Corrupted(e.to_string()))?;
        let region: Scope = self
            .require(keys::USER_REGION)?
            .parse()
            .map_err(|e: treasury_core::RegionParseError| SessionError::Corrupted(e.to_string()))?;
        let role = AdminRole::from_parts(self.require(keys::USER_ROLE)?, region)
            .map_err(|e| SessionError::Corrupted(e.to_string()))?;
        let name = self.require(keys::USER_NAME)?.to_string();

        Ok(Identity::new(email, name, role))
    }

    /// Erase every stored value.
    pub fn clear_session(&mut self) {
        self.values.clear();
        tracing::debug!("session cleared");
    }

    fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    fn require(&self, key: &str) -> Result<&str, SessionError> {
        self.get(key)
            .ok_or_else(|| SessionError::Corrupted(format!("missing key {key}")))
    }
}
