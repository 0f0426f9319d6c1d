//! Object store boundary.
//!
//! Uploads leave the portal through the [`DocumentStore`] capability with
//! a region-prefixed key. Object-storage semantics are an external
//! concern; the demo deployment uses [`SimulatedStore`], which accepts
//! everything and keeps the placements in memory so they can be observed.

use async_trait::async_trait;
use tracing::info;

/// Errors surfaced by a document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store refused the upload.
    #[error("upload rejected: {0}")]
    Rejected(String),

    /// The store itself failed.
    #[error("object store unavailable: {0}")]
    Unavailable(String),
}

/// Capability for storing uploaded documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store one document under `{region_prefix}/{file_name}`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store refuses or fails; the
    /// caller's own state must survive either.
    async fn put_document(
        &mut self,
        region_prefix: &str,
        file_name: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), StoreError>;
}

/// A document as placed in the simulated store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Full object key, `{region_prefix}/{file_name}`.
    pub key: String,
    /// Content size in bytes.
    pub size_bytes: usize,
    /// MIME type as supplied by the uploader.
    pub content_type: String,
}

/// In-memory demo store that accepts every upload.
#[derive(Debug, Default)]
pub struct SimulatedStore {
    objects: Vec<StoredObject>,
}

impl SimulatedStore {
    /// Create an empty simulated store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything stored so far, in upload order.
    #[must_use]
    pub fn objects(&self) -> &[StoredObject] {
        &self.objects
    }
}

#[async_trait]
impl DocumentStore for SimulatedStore {
    async fn put_document(
        &mut self,
        region_prefix: &str,
        file_name: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), StoreError> {
        let key = format!("{region_prefix}/{file_name}");
        info!(%key, size_bytes = content.len(), content_type, "stored document");
        self.objects.push(StoredObject {
            key,
            size_bytes: content.len(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}
