// crates/restbind-core/src/core/resource.rs
// ============================================================================
// Module: Resource Types
// Description: Identity of typed client interfaces and their proxy adapters.
// Purpose: Anchor descriptor search on the client's module path.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ResourceType`] names a client interface by module path and type name.
//! Client types implement [`Resource`] to be constructed from the proxy a
//! [`crate::ProxyRuntime`] produces.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::type_name;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::descriptor::MODULE_SEPARATOR;
use crate::core::descriptor::ScanScope;

// ============================================================================
// SECTION: Resource Type
// ============================================================================

/// Identity of a client interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceType {
    /// Module path of the client interface.
    module: String,
    /// Type name without module qualification.
    name: String,
}

impl ResourceType {
    /// Creates a resource type from an explicit module path and name.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Derives the resource type of `T` from its Rust type path.
    ///
    /// Generic arguments are ignored so `api::Client<Json>` maps to module
    /// `api` and name `Client`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        let full = type_name::<T>();
        let base = full.split_once('<').map_or(full, |(head, _)| head);
        match base.rsplit_once(MODULE_SEPARATOR) {
            Some((module, name)) => Self::new(module, name),
            None => Self::new("", base),
        }
    }

    /// Returns the module path.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the scope made of the resource's own module.
    #[must_use]
    pub fn scope(&self) -> ScanScope {
        ScanScope::new(self.module.clone())
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

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

// ============================================================================
// SECTION: Resource Trait
// ============================================================================

/// Typed client interface constructed from a runtime proxy `P`.
pub trait Resource<P>: Sized + Send + Sync + 'static {
    /// Returns the identity used to anchor descriptor search.
    #[must_use]
    fn resource_type() -> ResourceType {
        ResourceType::of::<Self>()
    }

    /// Wraps a proxy bound to the resolved base address.
    fn from_proxy(proxy: P) -> Self;
}
