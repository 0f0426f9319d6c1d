//! Identity provider boundary.
//!
//! Authentication is an opaque capability: the portal hands credentials to
//! an [`IdentityProvider`] and gets an identity or a refusal back. The
//! demo deployment uses [`StaticDirectory`], whose records are injected at
//! construction (typically from deployment configuration) - credentials
//! never live in library source.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use treasury_core::{AdminRole, Email, Scope};

use crate::models::Identity;

/// Errors surfaced by an identity provider.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The credentials did not match any account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The provider itself failed.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur when building a directory from injected records.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryParseError {
    /// The record set was not valid JSON.
    #[error("malformed directory JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record failed validation.
    #[error("directory record {index}: {reason}")]
    InvalidRecord {
        /// Zero-based index of the offending record.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Capability for verifying login credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return the authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidCredentials`] when the credentials
    /// match no account, or [`DirectoryError::Unavailable`] when the
    /// provider cannot be reached.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, DirectoryError>;
}

/// One account in a [`StaticDirectory`].
#[derive(Debug)]
pub struct DirectoryRecord {
    email: Email,
    password: SecretString,
    name: String,
    role: AdminRole,
}

impl DirectoryRecord {
    /// Create a record from already-validated parts.
    #[must_use]
    pub fn new(email: Email, password: SecretString, name: impl Into<String>, role: AdminRole) -> Self {
        Self {
            email,
            password,
            name: name.into(),
            role,
        }
    }
}

/// Wire form of a directory record, as injected via configuration.
#[derive(Debug, Deserialize)]
struct RawRecord {
    email: String,
    password: String,
    name: String,
    role: String,
    region: String,
}

impl RawRecord {
    fn validate(self) -> Result<DirectoryRecord, String> {
        let email = Email::parse(&self.email).map_err(|e| e.to_string())?;
        let region: Scope = self.region.parse().map_err(|e: treasury_core::RegionParseError| e.to_string())?;
        let role = AdminRole::from_parts(&self.role, region).map_err(|e| e.to_string())?;
        Ok(DirectoryRecord::new(
            email,
            SecretString::from(self.password),
            self.name,
            role,
        ))
    }
}

/// Demo identity provider over an injected account table.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    records: Vec<DirectoryRecord>,
}

impl StaticDirectory {
    /// Build a directory from validated records.
    #[must_use]
    pub fn new(records: Vec<DirectoryRecord>) -> Self {
        Self { records }
    }

    /// Parse a directory from a JSON array of records.
    ///
    /// Each record is `{email, password, name, role, region}` with the
    /// role labels and region codes of the session layer. Invalid
    /// combinations (a regional admin with region `ALL`, unknown codes,
    /// malformed emails) are rejected up front.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryParseError`] for malformed JSON or an invalid
    /// record.
    pub fn from_json(json: &str) -> Result<Self, DirectoryParseError> {
        let raw: Vec<RawRecord> = serde_json::from_str(json)?;
        let records = raw
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .validate()
                    .map_err(|reason| DirectoryParseError::InvalidRecord { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(records))
    }

    /// Number of accounts in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticDirectory {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, DirectoryError> {
        let record = self
            .records
            .iter()
            .find(|r| r.email.as_str() == email && r.password.expose_secret() == password)
            .ok_or_else(|| {
                debug!(email, "no matching directory record");
                DirectoryError::InvalidCredentials
            })?;

        Ok(Identity::new(
            record.email.clone(),
            record.name.clone(),
            record.role,
        ))
    }
}
