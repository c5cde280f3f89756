// crates/restbind-core/src/core/address.rs
// ============================================================================
// Module: Resolved Base Address
// Description: Normalized join of a deployment context root and an app path.
// Purpose: Guarantee a single separator at the join boundary.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A resolved base address is the deployment's reachable location joined with
//! the application's routing root. The join never drops or duplicates input
//! characters other than collapsing a doubled separator at the boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path separator used at the join boundary.
const PATH_SEPARATOR: char = '/';

// ============================================================================
// SECTION: Join
// ============================================================================

/// Joins two path fragments with exactly one separator at the boundary.
///
/// - Both sides contribute a separator: one is collapsed.
/// - Neither side contributes one: a separator is inserted.
/// - Exactly one side contributes one: the fragments are concatenated.
#[must_use]
pub fn join_path(first: &str, second: &str) -> String {
    let first_sep = first.ends_with(PATH_SEPARATOR);
    let second_sep = second.starts_with(PATH_SEPARATOR);
    let mut joined = String::with_capacity(first.len() + second.len() + 1);
    joined.push_str(first);
    match (first_sep, second_sep) {
        (true, true) => joined.push_str(&second[PATH_SEPARATOR.len_utf8()..]),
        (true, false) | (false, true) => joined.push_str(second),
        (false, false) => {
            joined.push(PATH_SEPARATOR);
            joined.push_str(second);
        }
    }
    joined
}

// ============================================================================
// SECTION: Resolved Base Address
// ============================================================================

/// Base address of the application-under-test.
///
/// # Invariants
/// - Exactly one separator sits between the context root and the root path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedBaseAddress(String);

impl ResolvedBaseAddress {
    /// Joins a context root and an application root path.
    #[must_use]
    pub fn join(context_root: &str, root_path: &str) -> Self {
        Self(join_path(context_root, root_path))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the address and returns the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Resolves a relative request path against this address.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        join_path(&self.0, path)
    }
}

impl fmt::Display for ResolvedBaseAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for ResolvedBaseAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ResolvedBaseAddress {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResolvedBaseAddress {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
