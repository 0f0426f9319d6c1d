//! Content provider boundary.
//!
//! The dashboard reads documents and usage statistics through the
//! [`ContentProvider`] capability, so the demo tables in [`mock`] can be
//! swapped for a real document index without touching the access-control
//! logic.

pub mod mock;

pub use mock::MockContentProvider;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use treasury_core::{RegionId, Scope};

/// A document as reported by the provider.
///
/// Provider-owned, read-only; the portal never persists these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// File name, including extension.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modification date.
    pub modified: NaiveDate,
    /// The region the document belongs to.
    pub region: RegionId,
}

/// Usage statistics for a visibility scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Number of stored documents.
    pub document_count: u64,
    /// Storage consumed, in megabytes.
    pub storage_used_mb: u64,
    /// Number of AI queries served.
    pub ai_query_count: u64,
}

impl UsageStats {
    /// The deterministic base component of the statistics.
    ///
    /// The all-regions base is strictly larger than any single region's.
    /// Providers layer their jitter on top of this; tests assert against
    /// the base alone.
    #[must_use]
    pub const fn base(scope: Scope) -> Self {
        match scope {
            Scope::AllRegions => Self {
                document_count: 250,
                storage_used_mb: 5000,
                ai_query_count: 150,
            },
            Scope::Region(_) => Self {
                document_count: 50,
                storage_used_mb: 1000,
                ai_query_count: 30,
            },
        }
    }
}

/// Capability for reading documents and statistics under a scope.
///
/// Implementations own the data; callers are expected to have resolved
/// `scope` through the access-control layer already.
pub trait ContentProvider {
    /// List every document visible under `scope`.
    fn list_documents(&self, scope: Scope) -> Vec<DocumentRecord>;

    /// Usage statistics for `scope`.
    fn get_stats(&self, scope: Scope) -> UsageStats;

    /// Case-insensitive substring search over the visible documents.
    ///
    /// An empty query matches everything; no match is an empty result,
    /// not an error.
    fn search_documents(&self, scope: Scope, query: &str) -> Vec<DocumentRecord> {
        let needle = query.to_lowercase();
        self.list_documents(scope)
            .into_iter()
            .filter(|doc| doc.name.to_lowercase().contains(&needle))
            .collect()
    }
}
