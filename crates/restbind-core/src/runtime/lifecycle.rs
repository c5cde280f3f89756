// crates/restbind-core/src/runtime/lifecycle.rs
// ============================================================================
// Module: Lifecycle Hook
// Description: Per-test-class setup: provision, resolve, and bind.
// Purpose: Run the setup sequence once before a test class executes.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! The lifecycle hook applies provisioning configuration, starts the
//! deployment, reads its reachable address, and binds the test class's
//! declared clients against it. A test class is prepared at most once per
//! hook. Teardown belongs to the provisioner.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::BoundClients;
use crate::core::Diagnostic;
use crate::core::TestClass;
use crate::interfaces::DeploymentProvisioner;
use crate::interfaces::ProvisionError;
use crate::interfaces::ProxyRuntime;
use crate::runtime::binder::BindError;
use crate::runtime::binder::FieldBinder;
use crate::runtime::factory::ClientFactory;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Test-class setup errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum HookError {
    /// The test class was already prepared by this hook.
    #[error("test class already prepared: {0}")]
    AlreadyPrepared(String),
    /// Provisioning failed.
    #[error(transparent)]
    Provision(#[from] ProvisionError),
    /// Binding failed.
    #[error(transparent)]
    Bind(#[from] BindError),
}

// ============================================================================
// SECTION: Hook
// ============================================================================

/// Runs per-test-class setup against a provisioner and client factory.
pub struct LifecycleHook<D, R> {
    /// Deployment collaborator.
    provisioner: D,
    /// Factory used for binding.
    factory: ClientFactory<R>,
    /// Names of test classes already prepared.
    prepared: BTreeSet<String>,
}

impl<D: DeploymentProvisioner, R: ProxyRuntime> LifecycleHook<D, R> {
    /// Creates a hook over a provisioner and client factory.
    #[must_use]
    pub const fn new(provisioner: D, factory: ClientFactory<R>) -> Self {
        Self {
            provisioner,
            factory,
            prepared: BTreeSet::new(),
        }
    }

    /// Returns the provisioner.
    #[must_use]
    pub const fn provisioner(&self) -> &D {
        &self.provisioner
    }

    /// Returns the client factory.
    #[must_use]
    pub const fn factory(&self) -> &ClientFactory<R> {
        &self.factory
    }

    /// Returns true when `test_class` was already prepared.
    #[must_use]
    pub fn is_prepared(&self, test_class: &str) -> bool {
        self.prepared.contains(test_class)
    }

    /// Prepares `test_class`: provisions the deployment and binds its clients.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::AlreadyPrepared`] on a repeated call for the same
    /// class, and [`HookError::Provision`] or [`HookError::Bind`] when a setup
    /// step fails.
    pub fn before_test_class(
        &mut self,
        test_class: &TestClass<R::Proxy>,
    ) -> Result<BoundClients, HookError> {
        if self.is_prepared(test_class.name()) {
            return Err(HookError::AlreadyPrepared(test_class.name().to_string()));
        }
        self.provisioner.apply_configuration()?;
        self.provisioner.start_containers()?;
        let application_url = self.provisioner.application_url()?;
        self.factory.resolver().reporter().report(&Diagnostic::DeploymentReady {
            test_class: test_class.name().to_string(),
            application_url: application_url.clone(),
        });
        let bound = FieldBinder::new(&self.factory).bind(test_class, &application_url)?;
        self.prepared.insert(test_class.name().to_string());
        Ok(bound)
    }

    /// Consumes the hook and returns the provisioner, keeping the deployment alive.
    #[must_use]
    pub fn into_provisioner(self) -> D {
        self.provisioner
    }
}
