// crates/restbind-core/src/core/descriptor.rs
// ============================================================================
// Module: Application Descriptors
// Description: Type records, application descriptors, and scan scopes.
// Purpose: Model the metadata searched when resolving an application root path.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`TypeRecord`] is a type known to a metadata source. Records that are
//! application-equivalent and declare a root path become
//! [`ApplicationDescriptor`] candidates when they fall inside the
//! [`ScanScope`] being searched. Module paths use `::` as the segment
//! separator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator between module path segments.
pub const MODULE_SEPARATOR: &str = "::";

// ============================================================================
// SECTION: Scan Scope
// ============================================================================

/// Module namespace searched for application descriptors.
///
/// # Invariants
/// - A module is inside the scope when it equals the scope or is nested below it.
/// - The empty scope contains every module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanScope(String);

impl ScanScope {
    /// Creates a scope from a module path.
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self(module.into())
    }

    /// Returns the scope as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the module path segments of the scope.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(MODULE_SEPARATOR).filter(|segment| !segment.is_empty())
    }

    /// Returns true when `module` lies inside this scope.
    #[must_use]
    pub fn contains(&self, module: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        module
            .strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(MODULE_SEPARATOR))
    }

    /// Returns the ancestor scope made of the first `depth` segments.
    ///
    /// Returns `None` when the scope has fewer than `depth` segments or when
    /// truncation would not change the scope.
    #[must_use]
    pub fn widen(&self, depth: usize) -> Option<Self> {
        if depth == 0 {
            return None;
        }
        let segments: Vec<&str> = self.segments().collect();
        if segments.len() <= depth {
            return None;
        }
        Some(Self(segments[..depth].join(MODULE_SEPARATOR)))
    }
}

impl fmt::Display for ScanScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ScanScope {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ScanScope {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Type Records
// ============================================================================

/// A type known to a metadata source.
///
/// # Invariants
/// - `canonical_name` is `module::name` (or `name` for the root module).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    /// Module path the type is declared in.
    pub module: String,
    /// Type name without module qualification.
    pub name: String,
    /// Whether the type is application-equivalent.
    pub application: bool,
    /// Declared routing root path, when annotated.
    pub root_path: Option<String>,
}

impl TypeRecord {
    /// Creates an application-equivalent record without a root path.
    #[must_use]
    pub fn application(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            application: true,
            root_path: None,
        }
    }

    /// Creates a record for a type that is not application-equivalent.
    #[must_use]
    pub fn plain(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            application: false,
            root_path: None,
        }
    }

    /// Attaches a root path annotation to the record.
    #[must_use]
    pub fn with_root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = Some(root_path.into());
        self
    }

    /// Returns the fully qualified type name.
    #[must_use]
    pub fn canonical_name(&self) -> String {
        if self.module.is_empty() {
            return self.name.clone();
        }
        format!("{}{MODULE_SEPARATOR}{}", self.module, self.name)
    }
}

// ============================================================================
// SECTION: Application Descriptor
// ============================================================================

/// Routing root of the application-under-test selected during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDescriptor {
    /// Fully qualified type name.
    pub canonical_name: String,
    /// Declared root path.
    pub root_path: String,
}
