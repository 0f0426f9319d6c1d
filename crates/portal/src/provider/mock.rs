//! Demo content provider with fixed per-region tables.
//!
//! Stands in for a real document index / metrics service. Document sets
//! are deterministic lookup tables keyed by region; statistics are a
//! deterministic base plus a bounded random jitter recomputed on every
//! call, to simulate live data variability.

use chrono::NaiveDate;
use rand::Rng;
use treasury_core::{RegionId, Scope};

use super::{ContentProvider, DocumentRecord, UsageStats};

/// Upper bounds (exclusive) for the per-call statistics jitter.
const DOC_COUNT_JITTER: u64 = 50;
const STORAGE_MB_JITTER: u64 = 500;
const AI_QUERY_JITTER: u64 = 20;

/// Demo provider backed by fixed region tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockContentProvider;

impl MockContentProvider {
    /// Create the demo provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ContentProvider for MockContentProvider {
    fn list_documents(&self, scope: Scope) -> Vec<DocumentRecord> {
        match scope {
            Scope::Region(region) => region_documents(region),
            Scope::AllRegions => RegionId::ALL_REGIONS
                .into_iter()
                .flat_map(region_documents)
                .collect(),
        }
    }

    fn get_stats(&self, scope: Scope) -> UsageStats {
        let base = UsageStats::base(scope);
        let mut rng = rand::rng();
        UsageStats {
            document_count: base.document_count + rng.random_range(0..DOC_COUNT_JITTER),
            storage_used_mb: base.storage_used_mb + rng.random_range(0..STORAGE_MB_JITTER),
            ai_query_count: base.ai_query_count + rng.random_range(0..AI_QUERY_JITTER),
        }
    }
}

/// The fixed record set for one region.
fn region_documents(region: RegionId) -> Vec<DocumentRecord> {
    let rows: &[(&str, u64, (i32, u32, u32))] = match region {
        RegionId::Ncr => &[
            ("NCR Budget 2025.pdf", 2_100_000, (2025, 1, 15)),
            ("NCR Financial Report.xlsx", 1_800_000, (2025, 1, 10)),
            ("NCR Treasury Guidelines.docx", 1_100_000, (2025, 1, 10)),
        ],
        RegionId::Region1 => &[
            ("Region 1 Allocation.pdf", 1_500_000, (2025, 1, 12)),
            ("Region 1 Audit.docx", 900_000, (2025, 1, 8)),
            ("Region 1 Financial Statement.xlsx", 856_000, (2025, 1, 8)),
        ],
        RegionId::Region2 => &[
            ("Region 2 Budget.pdf", 1_900_000, (2025, 1, 14)),
            ("Region 2 Summary.xlsx", 1_200_000, (2025, 1, 9)),
            ("Region 2 Treasury Report.pdf", 1_700_000, (2025, 1, 12)),
        ],
    };

    rows.iter()
        .map(|&(name, size_bytes, (y, m, d))| DocumentRecord {
            name: name.to_string(),
            size_bytes,
            modified: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            region,
        })
        .collect()
}
