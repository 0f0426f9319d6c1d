//! Role enums for portal users and chat participants.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::region::{RegionId, Scope};

/// Admin role with different visibility levels.
///
/// A regional admin carries its home region in the variant, so a regional
/// admin scoped to `ALL` cannot be constructed at all - the original data
/// model kept role and region in parallel fields and had to police the
/// combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminRole {
    /// Cross-regional access; may view any single region or all of them.
    SuperAdmin,
    /// Access confined to the home region.
    RegionalAdmin(RegionId),
}

impl AdminRole {
    /// The role label stored in the session (`super-admin` / `regional-admin`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super-admin",
            Self::RegionalAdmin(_) => "regional-admin",
        }
    }

    /// The scope this role is at home in: `ALL` for a super admin, the
    /// home region otherwise.
    #[must_use]
    pub const fn home_region(self) -> Scope {
        match self {
            Self::SuperAdmin => Scope::AllRegions,
            Self::RegionalAdmin(region) => Scope::Region(region),
        }
    }

    /// Rebuild a role from its stored label and region code.
    ///
    /// # Errors
    ///
    /// Returns `RoleParseError` for an unknown label, or for the invalid
    /// `regional-admin` + `ALL` combination.
    pub fn from_parts(label: &str, region: Scope) -> Result<Self, RoleParseError> {
        match (label, region) {
            ("super-admin", _) => Ok(Self::SuperAdmin),
            ("regional-admin", Scope::Region(region)) => Ok(Self::RegionalAdmin(region)),
            ("regional-admin", Scope::AllRegions) => Err(RoleParseError::RegionalWithoutRegion),
            (other, _) => Err(RoleParseError::UnknownLabel(other.to_string())),
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur when rebuilding an [`AdminRole`] from stored parts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    /// The role label is not one of the known labels.
    #[error("unknown role label: {0}")]
    UnknownLabel(String),
    /// A regional admin must have a concrete home region, never `ALL`.
    #[error("regional-admin requires a concrete home region")]
    RegionalWithoutRegion,
}

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        let role = AdminRole::RegionalAdmin(RegionId::Ncr);
        let rebuilt = AdminRole::from_parts(role.label(), role.home_region()).unwrap();
        assert_eq!(rebuilt, role);

        let rebuilt =
            AdminRole::from_parts(AdminRole::SuperAdmin.label(), Scope::AllRegions).unwrap();
        assert_eq!(rebuilt, AdminRole::SuperAdmin);
    }

    #[test]
    fn test_home_region() {
        assert_eq!(AdminRole::SuperAdmin.home_region(), Scope::AllRegions);
        assert_eq!(
            AdminRole::RegionalAdmin(RegionId::Region1).home_region(),
            Scope::Region(RegionId::Region1)
        );
    }

    #[test]
    fn test_regional_admin_never_scoped_to_all() {
        let err = AdminRole::from_parts("regional-admin", Scope::AllRegions).unwrap_err();
        assert_eq!(err, RoleParseError::RegionalWithoutRegion);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = AdminRole::from_parts("auditor", Scope::AllRegions).unwrap_err();
        assert!(matches!(err, RoleParseError::UnknownLabel(_)));
    }

    #[test]
    fn test_chat_role_serde() {
        let json = serde_json::to_string(&ChatRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
