//! Dashboard service.
//!
//! The explicit session/context object behind every portal operation.
//! Where the original kept the logged-in user and the viewed region in
//! process-wide mutable globals, everything here flows through this one
//! value: the session store decides who you are, the access-control
//! resolver decides what you may see - on every read, not just when the
//! selection changes - and the injected collaborators do the rest.

use tracing::{info, instrument};

use treasury_core::{RegionId, Scope};

use crate::access::{resolve_scope, resolve_upload_region, shows_region_selector};
use crate::chat::{ChatMessage, ChatSimulator};
use crate::config::{LatencyConfig, PortalConfig};
use crate::directory::IdentityProvider;
use crate::error::PortalError;
use crate::models::Identity;
use crate::provider::{ContentProvider, DocumentRecord, UsageStats};
use crate::session::SessionStore;
use crate::storage::DocumentStore;
use crate::task::{CancelToken, sleep_unless_cancelled};

/// Confirmation of a completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Region the document landed in.
    pub region: RegionId,
    /// Object key within the documents bucket.
    pub key: String,
}

/// The portal dashboard, wired to its injected collaborators.
///
/// Operations that touch authenticated state fail with
/// [`crate::session::SessionError::NotAuthenticated`] (wrapped in
/// [`PortalError`]) when no login is recorded.
#[derive(Debug)]
pub struct Dashboard<P, D, S> {
    provider: P,
    directory: D,
    store: S,
    chat: ChatSimulator,
    session: SessionStore,
    selection: Option<String>,
    latency: LatencyConfig,
}

impl<P, D, S> Dashboard<P, D, S>
where
    P: ContentProvider,
    D: IdentityProvider,
    S: DocumentStore,
{
    /// Wire up a dashboard from configuration and collaborators.
    #[must_use]
    pub fn new(config: &PortalConfig, provider: P, directory: D, store: S) -> Self {
        Self {
            provider,
            directory,
            store,
            chat: ChatSimulator::new(
                config.latency.chat_reply,
                config.latency.greeting,
                config.inference.model_id.clone(),
            ),
            session: SessionStore::new(),
            selection: None,
            latency: config.latency,
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Authenticate and start a session.
    ///
    /// Waits the simulated login latency first; a cancelled attempt
    /// returns `Ok(None)` without touching the session. A failed
    /// authentication leaves the session logged out - there is no retry.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Directory`] when the credentials are refused
    /// or the provider fails.
    #[instrument(skip(self, password, cancel))]
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        cancel: &CancelToken,
    ) -> Result<Option<Identity>, PortalError> {
        if !sleep_unless_cancelled(self.latency.login, cancel).await {
            info!("login cancelled");
            return Ok(None);
        }

        let identity = self.directory.authenticate(email, password).await?;
        self.session.create_session(&identity);
        self.selection = None;
        self.chat.clear();
        info!(role = %identity.role, "login succeeded");
        Ok(Some(identity))
    }

    /// End the session: session values, region selection and transcript
    /// are all erased.
    pub fn logout(&mut self) {
        self.session.clear_session();
        self.selection = None;
        self.chat.clear();
        info!("logged out");
    }

    /// The authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Session`] when logged out.
    pub fn identity(&self) -> Result<Identity, PortalError> {
        Ok(self.session.current()?)
    }

    /// The session store, for renderer reads of the raw values.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    // =========================================================================
    // Visibility scope
    // =========================================================================

    /// The effective visibility scope, re-resolved from the identity on
    /// every call.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Session`] when logged out, or
    /// [`PortalError::Access`] when a stored super-admin selection no
    /// longer parses.
    pub fn scope(&self) -> Result<Scope, PortalError> {
        let identity = self.session.current()?;
        Ok(resolve_scope(&identity, self.selection.as_deref())?)
    }

    /// Record a region selection and return the resulting scope.
    ///
    /// For a regional admin the selection is never consulted: the home
    /// region comes back no matter what was requested.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Access`] when a super admin selects a
    /// region outside the closed set; the previous selection is kept.
    #[instrument(skip(self))]
    pub fn select_region(&mut self, requested: &str) -> Result<Scope, PortalError> {
        let identity = self.session.current()?;
        let scope = resolve_scope(&identity, Some(requested))?;
        self.selection = Some(requested.to_string());
        info!(%scope, "view scope changed");
        Ok(scope)
    }

    /// Whether region-selection controls are shown.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Session`] when logged out.
    pub fn region_selector_visible(&self) -> Result<bool, PortalError> {
        let identity = self.session.current()?;
        Ok(shows_region_selector(&identity))
    }

    // =========================================================================
    // Documents & statistics
    // =========================================================================

    /// Documents visible under the current scope.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Session`] when logged out.
    pub fn documents(&self) -> Result<Vec<DocumentRecord>, PortalError> {
        Ok(self.provider.list_documents(self.scope()?))
    }

    /// Search the visible documents by case-insensitive substring.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Session`] when logged out.
    pub fn search(&self, query: &str) -> Result<Vec<DocumentRecord>, PortalError> {
        Ok(self.provider.search_documents(self.scope()?, query))
    }

    /// Usage statistics for the current scope.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Session`] when logged out.
    pub fn stats(&self) -> Result<UsageStats, PortalError> {
        Ok(self.provider.get_stats(self.scope()?))
    }

    /// Upload a document to its resolved region.
    ///
    /// The target region comes from the access-control resolver, never
    /// from the caller directly. A cancelled upload returns `Ok(None)`
    /// and leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Access`] for an unusable target region, or
    /// [`PortalError::Store`] when the store refuses; session and scope
    /// state survive either.
    #[instrument(skip(self, content, cancel), fields(size_bytes = content.len()))]
    pub async fn upload(
        &mut self,
        file_name: &str,
        content: &[u8],
        content_type: &str,
        requested_region: Option<&str>,
        cancel: &CancelToken,
    ) -> Result<Option<UploadReceipt>, PortalError> {
        let identity = self.session.current()?;
        let region = resolve_upload_region(&identity, requested_region)?;

        if !sleep_unless_cancelled(self.latency.upload, cancel).await {
            info!("upload cancelled");
            return Ok(None);
        }

        self.store
            .put_document(region.as_str(), file_name, content, content_type)
            .await?;

        let receipt = UploadReceipt {
            region,
            key: format!("{region}/{file_name}"),
        };
        info!(key = %receipt.key, "upload complete");
        Ok(Some(receipt))
    }

    /// The document store, for observing simulated placements.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Chat
    // =========================================================================

    /// Deliver the welcome message for the authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Session`] when logged out.
    pub async fn greet(&mut self, cancel: &CancelToken) -> Result<Option<ChatMessage>, PortalError> {
        let identity = self.session.current()?;
        Ok(self.chat.greet(&identity, cancel).await)
    }

    /// Send a chat message under the current scope.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Session`] when logged out,
    /// [`PortalError::Chat`] for empty input, or [`PortalError::Access`]
    /// if the stored selection no longer resolves.
    pub async fn send_chat(
        &mut self,
        text: &str,
        cancel: &CancelToken,
    ) -> Result<Option<ChatMessage>, PortalError> {
        let identity = self.session.current()?;
        let scope = resolve_scope(&identity, self.selection.as_deref())?;
        Ok(self.chat.send(&identity, scope, text, cancel).await?)
    }

    /// The session transcript, oldest first.
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        self.chat.transcript()
    }
}
