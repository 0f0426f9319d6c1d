//! End-to-end dashboard scenarios.
//!
//! These drive the portal the way the view layer would: log in, look at
//! documents and statistics, change the viewed region, upload, chat, log
//! out. Timers run on a paused clock, so the simulated latencies cost
//! nothing here.

use secrecy::SecretString;
use treasury_core::{AdminRole, ChatRole, Email, RegionId, Scope};
use treasury_portal::access::AccessError;
use treasury_portal::chat::ChatError;
use treasury_portal::config::PortalConfig;
use treasury_portal::dashboard::Dashboard;
use treasury_portal::directory::{DirectoryError, DirectoryRecord, StaticDirectory};
use treasury_portal::error::PortalError;
use treasury_portal::provider::{MockContentProvider, UsageStats};
use treasury_portal::session::SessionError;
use treasury_portal::storage::{DocumentStore, SimulatedStore, StoreError};
use treasury_portal::task::{CancelToken, cancellation};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn demo_directory() -> StaticDirectory {
    let record = |email: &str, password: &str, name: &str, role: AdminRole| {
        DirectoryRecord::new(
            Email::parse(email).expect("fixture email"),
            SecretString::from(password.to_string()),
            name,
            role,
        )
    };

    StaticDirectory::new(vec![
        record(
            "superadmin@btr.gov.ph",
            "cross-regional-2025",
            "Sir Cons",
            AdminRole::SuperAdmin,
        ),
        record(
            "ncr@btr.gov.ph",
            "metro-manila-2025",
            "Maria Santos",
            AdminRole::RegionalAdmin(RegionId::Ncr),
        ),
        record(
            "region1@btr.gov.ph",
            "ilocos-2025",
            "Juan Dela Cruz",
            AdminRole::RegionalAdmin(RegionId::Region1),
        ),
        record(
            "region2@btr.gov.ph",
            "cagayan-2025",
            "Ana Reyes",
            AdminRole::RegionalAdmin(RegionId::Region2),
        ),
    ])
}

fn demo_dashboard() -> Dashboard<MockContentProvider, StaticDirectory, SimulatedStore> {
    init_tracing();
    Dashboard::new(
        &PortalConfig::default(),
        MockContentProvider::new(),
        demo_directory(),
        SimulatedStore::new(),
    )
}

/// Store that fails every upload, for boundary-isolation tests.
struct FailingStore;

#[async_trait::async_trait]
impl DocumentStore for FailingStore {
    async fn put_document(
        &mut self,
        _region_prefix: &str,
        _file_name: &str,
        _content: &[u8],
        _content_type: &str,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("simulated outage".to_string()))
    }
}

// =============================================================================
// Login & session
// =============================================================================

#[tokio::test(start_paused = true)]
async fn invalid_credentials_do_not_create_session() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    let err = dashboard
        .login("ncr@btr.gov.ph", "wrong-password", &token)
        .await
        .expect_err("login must fail");
    assert!(matches!(
        err,
        PortalError::Directory(DirectoryError::InvalidCredentials)
    ));

    assert!(matches!(
        dashboard.identity(),
        Err(PortalError::Session(SessionError::NotAuthenticated))
    ));
}

#[tokio::test(start_paused = true)]
async fn cancelled_login_leaves_logged_out() {
    let mut dashboard = demo_dashboard();
    let (canceller, token) = cancellation();
    canceller.cancel();

    let outcome = dashboard
        .login("ncr@btr.gov.ph", "metro-manila-2025", &token)
        .await
        .expect("cancellation is not an error");
    assert!(outcome.is_none());
    assert!(dashboard.identity().is_err());
}

#[tokio::test(start_paused = true)]
async fn logout_clears_session_selection_and_transcript() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    dashboard
        .login("superadmin@btr.gov.ph", "cross-regional-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");
    dashboard.select_region("NCR").expect("valid selection");
    dashboard.send_chat("hello", &token).await.expect("chat");

    dashboard.logout();

    assert!(matches!(
        dashboard.identity(),
        Err(PortalError::Session(SessionError::NotAuthenticated))
    ));
    assert!(dashboard.transcript().is_empty());
    assert!(dashboard.documents().is_err());
}

// =============================================================================
// Visibility scope
// =============================================================================

#[tokio::test(start_paused = true)]
async fn regional_admin_sees_only_home_region() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    dashboard
        .login("region1@btr.gov.ph", "ilocos-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");

    assert!(!dashboard.region_selector_visible().expect("logged in"));

    let docs = dashboard.documents().expect("documents");
    assert!(!docs.is_empty());
    assert!(docs.iter().all(|doc| doc.region == RegionId::Region1));

    // Requesting another region must not widen the view
    let scope = dashboard.select_region("NCR").expect("never errors for regional admins");
    assert_eq!(scope, Scope::Region(RegionId::Region1));

    let docs = dashboard.documents().expect("documents");
    assert!(docs.iter().all(|doc| doc.region == RegionId::Region1));
}

#[tokio::test(start_paused = true)]
async fn super_admin_defaults_to_union_of_all_regions() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    dashboard
        .login("superadmin@btr.gov.ph", "cross-regional-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");

    assert!(dashboard.region_selector_visible().expect("logged in"));
    assert_eq!(dashboard.scope().expect("scope"), Scope::AllRegions);

    let docs = dashboard.documents().expect("documents");
    for region in RegionId::ALL_REGIONS {
        assert!(docs.iter().any(|doc| doc.region == region));
    }

    let stats = dashboard.stats().expect("stats");
    let base = UsageStats::base(Scope::AllRegions);
    assert!(stats.document_count >= base.document_count);
    assert!(stats.storage_used_mb >= base.storage_used_mb);
    assert!(stats.ai_query_count >= base.ai_query_count);
}

#[tokio::test(start_paused = true)]
async fn super_admin_selection_narrows_and_invalid_is_rejected() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    dashboard
        .login("superadmin@btr.gov.ph", "cross-regional-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");

    let scope = dashboard.select_region("NCR").expect("valid selection");
    assert_eq!(scope, Scope::Region(RegionId::Ncr));
    let docs = dashboard.documents().expect("documents");
    assert!(docs.iter().all(|doc| doc.region == RegionId::Ncr));

    let err = dashboard.select_region("REGION-9").expect_err("outside the closed set");
    assert!(matches!(
        err,
        PortalError::Access(AccessError::InvalidRegion(_))
    ));

    // The failed selection must not have replaced the previous one
    assert_eq!(dashboard.scope().expect("scope"), Scope::Region(RegionId::Ncr));
}

#[tokio::test(start_paused = true)]
async fn search_is_scoped_to_visibility() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    dashboard
        .login("ncr@btr.gov.ph", "metro-manila-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");

    // Another region's documents are invisible even by name
    let hits = dashboard.search("Region 1").expect("search");
    assert!(hits.is_empty());

    let hits = dashboard.search("budget").expect("search");
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|doc| doc.region == RegionId::Ncr));

    // Empty query degrades to the full visible listing
    assert_eq!(
        dashboard.search("").expect("search"),
        dashboard.documents().expect("documents")
    );
}

// =============================================================================
// Uploads
// =============================================================================

#[tokio::test(start_paused = true)]
async fn regional_admin_upload_is_pinned_to_home_region() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    dashboard
        .login("region1@btr.gov.ph", "ilocos-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");

    let receipt = dashboard
        .upload("audit.pdf", b"%PDF-", "application/pdf", Some("NCR"), &token)
        .await
        .expect("upload")
        .expect("not cancelled");

    assert_eq!(receipt.region, RegionId::Region1);
    assert_eq!(receipt.key, "REGION-1/audit.pdf");

    let keys: Vec<&str> = dashboard.store().objects().iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys, ["REGION-1/audit.pdf"]);
}

#[tokio::test(start_paused = true)]
async fn super_admin_upload_requires_concrete_region() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    dashboard
        .login("superadmin@btr.gov.ph", "cross-regional-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");

    let err = dashboard
        .upload("budget.pdf", b"%PDF-", "application/pdf", None, &token)
        .await
        .expect_err("no target region");
    assert!(matches!(
        err,
        PortalError::Access(AccessError::RegionRequired)
    ));

    let err = dashboard
        .upload("budget.pdf", b"%PDF-", "application/pdf", Some("ALL"), &token)
        .await
        .expect_err("ALL is not an upload target");
    assert!(matches!(
        err,
        PortalError::Access(AccessError::InvalidRegion(_))
    ));

    let receipt = dashboard
        .upload("budget.pdf", b"%PDF-", "application/pdf", Some("REGION-2"), &token)
        .await
        .expect("upload")
        .expect("not cancelled");
    assert_eq!(receipt.key, "REGION-2/budget.pdf");
}

#[tokio::test(start_paused = true)]
async fn cancelled_upload_leaves_store_untouched() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    dashboard
        .login("ncr@btr.gov.ph", "metro-manila-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");

    let (canceller, cancel) = cancellation();
    canceller.cancel();

    let outcome = dashboard
        .upload("budget.pdf", b"%PDF-", "application/pdf", None, &cancel)
        .await
        .expect("cancellation is not an error");
    assert!(outcome.is_none());
    assert!(dashboard.store().objects().is_empty());
}

#[tokio::test(start_paused = true)]
async fn store_failure_does_not_corrupt_session_or_scope() {
    init_tracing();
    let mut dashboard = Dashboard::new(
        &PortalConfig::default(),
        MockContentProvider::new(),
        demo_directory(),
        FailingStore,
    );
    let token = CancelToken::never();

    dashboard
        .login("region2@btr.gov.ph", "cagayan-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");

    let err = dashboard
        .upload("summary.xlsx", b"xlsx", "application/vnd.ms-excel", None, &token)
        .await
        .expect_err("store is down");
    assert!(matches!(err, PortalError::Store(StoreError::Unavailable(_))));

    // The failure stays at the boundary
    let identity = dashboard.identity().expect("still authenticated");
    assert_eq!(identity.role, AdminRole::RegionalAdmin(RegionId::Region2));
    assert_eq!(
        dashboard.scope().expect("scope"),
        Scope::Region(RegionId::Region2)
    );
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test(start_paused = true)]
async fn chat_greets_then_replies_under_current_scope() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    dashboard
        .login("ncr@btr.gov.ph", "metro-manila-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");

    let greeting = dashboard
        .greet(&token)
        .await
        .expect("logged in")
        .expect("not cancelled");
    assert_eq!(greeting.role, ChatRole::Assistant);
    assert!(greeting.text.contains("Maria Santos"));
    assert!(greeting.text.contains("NCR"));

    let reply = dashboard
        .send_chat("how is the budget looking?", &token)
        .await
        .expect("chat")
        .expect("not cancelled");
    assert!(reply.text.contains("NCR"));

    let roles: Vec<ChatRole> = dashboard.transcript().iter().map(|m| m.role).collect();
    assert_eq!(roles, [ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]);
}

#[tokio::test(start_paused = true)]
async fn whitespace_chat_message_changes_nothing() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    dashboard
        .login("ncr@btr.gov.ph", "metro-manila-2025", &token)
        .await
        .expect("login")
        .expect("not cancelled");

    let err = dashboard.send_chat(" ", &token).await.expect_err("empty input");
    assert!(matches!(err, PortalError::Chat(ChatError::EmptyMessage)));
    assert!(dashboard.transcript().is_empty());
}

#[tokio::test(start_paused = true)]
async fn chat_requires_authentication() {
    let mut dashboard = demo_dashboard();
    let token = CancelToken::never();

    let err = dashboard.send_chat("hello", &token).await.expect_err("logged out");
    assert!(matches!(
        err,
        PortalError::Session(SessionError::NotAuthenticated)
    ));
}
