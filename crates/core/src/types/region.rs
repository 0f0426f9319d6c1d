//! Region codes and visibility scopes.
//!
//! Documents and statistics are partitioned by administrative region.
//! [`RegionId`] is the closed set of concrete regions; [`Scope`] is what a
//! view or query is authorized to see - either one region or the `ALL`
//! sentinel.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`RegionId`] or [`Scope`] from a string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown region code: {0}")]
pub struct RegionParseError(pub String);

/// A concrete administrative region.
///
/// The set of regions is closed; anything outside it fails to parse.
/// The string form is the wire/storage code (`NCR`, `REGION-1`, `REGION-2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionId {
    /// National Capital Region.
    #[serde(rename = "NCR")]
    Ncr,
    /// Region 1.
    #[serde(rename = "REGION-1")]
    Region1,
    /// Region 2.
    #[serde(rename = "REGION-2")]
    Region2,
}

impl RegionId {
    /// Every concrete region, in canonical order.
    ///
    /// `ALL`-scoped queries iterate this to build their union.
    pub const ALL_REGIONS: [Self; 3] = [Self::Ncr, Self::Region1, Self::Region2];

    /// Returns the region code as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ncr => "NCR",
            Self::Region1 => "REGION-1",
            Self::Region2 => "REGION-2",
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RegionId {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NCR" => Ok(Self::Ncr),
            "REGION-1" => Ok(Self::Region1),
            "REGION-2" => Ok(Self::Region2),
            other => Err(RegionParseError(other.to_string())),
        }
    }
}

/// The region (or all regions) a view or query is authorized to see.
///
/// The string form is `ALL` or a region code, matching what the session
/// layer stores under `userRegion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scope {
    /// Every region; only a super admin may hold this scope.
    AllRegions,
    /// A single concrete region.
    Region(RegionId),
}

impl Scope {
    /// Sentinel code for the all-regions scope.
    pub const ALL_CODE: &'static str = "ALL";

    /// Returns the scope code as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllRegions => Self::ALL_CODE,
            Self::Region(region) => region.as_str(),
        }
    }

    /// Returns the concrete region, or `None` for the all-regions scope.
    #[must_use]
    pub const fn region(self) -> Option<RegionId> {
        match self {
            Self::AllRegions => None,
            Self::Region(region) => Some(region),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scope {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_CODE {
            Ok(Self::AllRegions)
        } else {
            s.parse::<RegionId>().map(Self::Region)
        }
    }
}

impl From<RegionId> for Scope {
    fn from(region: RegionId) -> Self {
        Self::Region(region)
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.as_str().to_string()
    }
}

impl TryFrom<String> for Scope {
    type Error = RegionParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
