//! Version Ordering Rule
//!
//! Version strings are dot-separated sequences of non-negative integers.
//! Two versions compare lexicographically over their integer sequences, the
//! same order a relational store produces for `string_to_array(version, '.')::int[]`:
//!
//! ```text
//! 1.9 < 1.10 < 2.0
//! 1.0 < 1.0.0        (a missing component is absent, not zero)
//! ```
//!
//! "Latest" is the last element after an ascending sort.

use std::cmp::Ordering;

use crate::domain::ResourceVersion;
use crate::{Result, StorageError};

/// Parsed integer sequence of a version string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey(Vec<u64>);

impl VersionKey {
    /// Parse a version string into its integer components
    ///
    /// An empty string yields the empty key. Surrounding whitespace on a
    /// component is ignored; anything else that is not an integer fails
    /// with `ErrorKind::MalformedVersion`.
    pub fn parse(version: &str) -> Result<Self> {
        if version.is_empty() {
            return Ok(Self(Vec::new()));
        }

        version
            .split('.')
            .map(|part| {
                part.trim()
                    .parse::<u64>()
                    .map_err(|_| StorageError::malformed_version(version))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

/// Compare two version strings under the ordering rule
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering> {
    Ok(VersionKey::parse(a)?.cmp(&VersionKey::parse(b)?))
}

/// Sort versions ascending in place
///
/// Stable: versions with equal keys keep their fetch order. Nothing is
/// reordered if any version string is malformed.
pub fn sort_versions(versions: &mut [ResourceVersion]) -> Result<()> {
    let keys = versions
        .iter()
        .map(|v| VersionKey::parse(&v.version))
        .collect::<Result<Vec<_>>>()?;

    let mut keyed: Vec<(VersionKey, ResourceVersion)> =
        keys.into_iter().zip(versions.iter().cloned()).collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (slot, (_, version)) in versions.iter_mut().zip(keyed) {
        *slot = version;
    }
    Ok(())
}
