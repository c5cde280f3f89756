// crates/restbind-core/src/runtime/registry.rs
// ============================================================================
// Module: Descriptor Registry
// Description: Explicit registry of type records known to the harness.
// Purpose: Replace classpath scanning with records populated at start-up.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! The descriptor registry is the in-process [`MetadataSource`]. Test suites
//! register the application types of the deployment they exercise, and the
//! resolver filters them by scope at lookup time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::ScanScope;
use crate::core::TypeRecord;
use crate::interfaces::MetadataSource;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registry errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A record with the same canonical name is already registered.
    #[error("type already registered: {0}")]
    Duplicate(String),
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// In-memory metadata source keyed by canonical name.
///
/// # Invariants
/// - Canonical names are unique within the registry.
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    /// Records keyed by canonical name.
    records: BTreeMap<String, TypeRecord>,
}

impl DescriptorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type record.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when the canonical name is taken.
    pub fn register(&mut self, record: TypeRecord) -> Result<(), RegistryError> {
        let name = record.canonical_name();
        if self.records.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.records.insert(name, record);
        Ok(())
    }

    /// Registers a record and returns the registry for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when the canonical name is taken.
    pub fn with(mut self, record: TypeRecord) -> Result<Self, RegistryError> {
        self.register(record)?;
        Ok(self)
    }

    /// Returns the number of registered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MetadataSource for DescriptorRegistry {
    fn find_types_in_scope(
        &self,
        scope: &ScanScope,
        predicate: &dyn Fn(&TypeRecord) -> bool,
    ) -> Vec<TypeRecord> {
        self.records
            .values()
            .filter(|record| scope.contains(&record.module) && predicate(record))
            .cloned()
            .collect()
    }

    fn find_root_path(&self, record: &TypeRecord) -> Option<String> {
        self.records.get(&record.canonical_name()).and_then(|found| found.root_path.clone())
    }
}
