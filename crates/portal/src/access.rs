//! Access-control resolution.
//!
//! Given an identity and a requested region, these functions decide the
//! effective visibility scope. The one invariant that matters: no code
//! path may yield documents or statistics for a region outside the
//! caller's authorized scope. Regional admins are pinned to their home
//! region; only super admins get a say in what they view.

use treasury_core::{AdminRole, RegionId, Scope};

use crate::models::Identity;

/// Errors that can occur while resolving a scope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The requested region is outside the closed region set.
    #[error("invalid region selection: {0}")]
    InvalidRegion(String),

    /// An upload needs a concrete target region, not `ALL`.
    #[error("a concrete upload region is required")]
    RegionRequired,
}

/// Resolve the visibility scope for a view or query.
///
/// A regional admin always gets the home region; the request is never
/// consulted, so even an invalid selection cannot error (or leak). A super
/// admin gets `ALL` until a selection is made, then the parsed selection.
///
/// # Errors
///
/// Returns [`AccessError::InvalidRegion`] when a super admin's selection
/// is outside the closed region set. The operation is rejected outright -
/// falling back to a broader scope here would be a security bug, not a
/// usability nicety.
pub fn resolve_scope(identity: &Identity, requested: Option<&str>) -> Result<Scope, AccessError> {
    match identity.role {
        AdminRole::RegionalAdmin(home) => Ok(Scope::Region(home)),
        AdminRole::SuperAdmin => requested.map_or(Ok(Scope::AllRegions), |raw| {
            raw.parse()
                .map_err(|_| AccessError::InvalidRegion(raw.to_string()))
        }),
    }
}

/// Resolve the target region for an upload.
///
/// A regional admin's uploads land in the home region regardless of the
/// request. A super admin must name a concrete region: `ALL` is a view
/// scope, never an upload destination.
///
/// # Errors
///
/// Returns [`AccessError::RegionRequired`] when a super admin names no
/// region, or [`AccessError::InvalidRegion`] when the named region does
/// not parse (including `ALL`).
pub fn resolve_upload_region(
    identity: &Identity,
    requested: Option<&str>,
) -> Result<RegionId, AccessError> {
    match identity.role {
        AdminRole::RegionalAdmin(home) => Ok(home),
        AdminRole::SuperAdmin => {
            let raw = requested.ok_or(AccessError::RegionRequired)?;
            raw.parse()
                .map_err(|_| AccessError::InvalidRegion(raw.to_string()))
        }
    }
}

/// Whether region-selection controls are shown for this identity.
#[must_use]
pub const fn shows_region_selector(identity: &Identity) -> bool {
    matches!(identity.role, AdminRole::SuperAdmin)
}
