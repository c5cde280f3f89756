// crates/restbind-core/src/runtime/binder.rs
// ============================================================================
// Module: Field Binder
// Description: Validates declared client fields and binds proxies to them.
// Purpose: Produce the bound-client bundle for one test class.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! The binder walks a test class's injection points in declaration order.
//! Each field is validated before its proxy is built; the first ineligible
//! field aborts the pass, so no later field is ever built.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::BoundClients;
use crate::core::Diagnostic;
use crate::core::TestClass;
use crate::interfaces::ProxyRuntime;
use crate::runtime::factory::ClientFactory;
use crate::runtime::factory::FactoryError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Binding errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum BindError {
    /// A declared field violates the modifier contract.
    #[error("client field must be public, class-level, and non-constant: {field}")]
    Configuration {
        /// Test class declaring the field.
        test_class: String,
        /// Offending field name.
        field: String,
    },
    /// Building the client for a field failed.
    #[error("failed to build client for field {field}: {source}")]
    Client {
        /// Field being bound.
        field: String,
        /// Underlying construction error.
        #[source]
        source: FactoryError,
    },
}

impl BindError {
    /// Returns the field the error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Configuration { field, .. } | Self::Client { field, .. } => field,
        }
    }
}

// ============================================================================
// SECTION: Binder
// ============================================================================

/// Binds proxies to the declared fields of a test class.
pub struct FieldBinder<'a, R> {
    /// Factory used to build each proxy.
    factory: &'a ClientFactory<R>,
}

impl<'a, R: ProxyRuntime> FieldBinder<'a, R> {
    /// Creates a binder over a client factory.
    #[must_use]
    pub const fn new(factory: &'a ClientFactory<R>) -> Self {
        Self {
            factory,
        }
    }

    /// Binds every declared field of `test_class` against `base_address`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Configuration`] for the first ineligible field and
    /// [`BindError::Client`] when a proxy cannot be built.
    pub fn bind(
        &self,
        test_class: &TestClass<R::Proxy>,
        base_address: &str,
    ) -> Result<BoundClients, BindError> {
        let mut bound = BoundClients::new(test_class.name());
        for point in test_class.injection_points() {
            if !point.modifiers().is_eligible() {
                return Err(BindError::Configuration {
                    test_class: test_class.name().to_string(),
                    field: point.field().to_string(),
                });
            }
            let proxy =
                self.factory.build(point.resource(), base_address).map_err(|source| {
                    BindError::Client {
                        field: point.field().to_string(),
                        source,
                    }
                })?;
            bound.insert(point, proxy);
            self.factory.resolver().reporter().report(&Diagnostic::ClientInjected {
                test_class: test_class.name().to_string(),
                field: point.field().to_string(),
                resource: point.resource().canonical_name(),
            });
        }
        Ok(bound)
    }
}
