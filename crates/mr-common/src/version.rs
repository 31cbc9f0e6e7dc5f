//! Host tool version triples.
//!
//! A `VersionTriple` is the only input the resolver needs from the calling
//! build context. Ordering is lexicographic over `(major, minor, patch)`,
//! which the derived `Ord` provides from the field order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Host tool release identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionTriple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionTriple {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Strictly older than `major.minor.patch`.
    pub fn is_older_than(&self, major: u32, minor: u32, patch: u32) -> bool {
        *self < Self::new(major, minor, patch)
    }

    /// At or newer than `major.minor.patch`.
    ///
    /// Host compatibility layers usually spell this "newer than", but the
    /// boundary release itself counts.
    pub fn is_at_least(&self, major: u32, minor: u32, patch: u32) -> bool {
        !self.is_older_than(major, minor, patch)
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl From<(u32, u32, u32)> for VersionTriple {
    fn from((major, minor, patch): (u32, u32, u32)) -> Self {
        Self::new(major, minor, patch)
    }
}

impl FromStr for VersionTriple {
    type Err = Error;

    /// Parse `"5"`, `"5.3"` or `"5.3.2"`. Missing components are zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidVersion(s.to_string()));
        }

        let mut parts = [0u32; 3];
        let mut count = 0;
        for component in trimmed.split('.') {
            // `u32::from_str` alone would let "+5" through.
            if count == parts.len()
                || component.is_empty()
                || !component.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(Error::InvalidVersion(s.to_string()));
            }
            parts[count] = component
                .parse::<u32>()
                .map_err(|_| Error::InvalidVersion(s.to_string()))?;
            count += 1;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}
