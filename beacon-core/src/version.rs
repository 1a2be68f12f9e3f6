use std::fmt;

use serde::{Serialize, Serializer};

/// Version reported by both services' index endpoints.
pub const API_VERSION: SemVer = SemVer::new(1, 0, 0);

/// Semantic version following the `major.minor.patch` scheme.
///
/// Serializes as its dotted string form (`"1.0.0"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct SemVer {
    /// Major version, incremented on breaking changes.
    pub major: u32,
    /// Minor version, incremented on backwards-compatible additions.
    pub minor: u32,
    /// Patch version, incremented on backwards-compatible bug fixes.
    pub patch: u32,
}

impl SemVer {
    /// Creates a new `SemVer`.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for SemVer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
