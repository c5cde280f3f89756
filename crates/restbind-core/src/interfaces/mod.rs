// crates/restbind-core/src/interfaces/mod.rs
// ============================================================================
// Module: Restbind Interfaces
// Description: Collaborator contracts for metadata, proxies, deployment, and reporting.
// Purpose: Define the seams the harness core integrates through.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The harness core never scans code, opens sockets, or starts containers
//! itself. It reaches metadata through [`MetadataSource`], builds proxies
//! through [`ProxyRuntime`], provisions deployments through
//! [`DeploymentProvisioner`], and surfaces diagnostics through [`Reporter`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Diagnostic;
use crate::core::ProviderList;
use crate::core::ResolvedBaseAddress;
use crate::core::ResourceType;
use crate::core::ScanScope;
use crate::core::TypeRecord;

// ============================================================================
// SECTION: Metadata Source
// ============================================================================

/// Source of type metadata searched during resolution.
pub trait MetadataSource {
    /// Returns the records inside `scope` that satisfy `predicate`.
    fn find_types_in_scope(
        &self,
        scope: &ScanScope,
        predicate: &dyn Fn(&TypeRecord) -> bool,
    ) -> Vec<TypeRecord>;

    /// Returns the root path annotation declared on `record`, if any.
    fn find_root_path(&self, record: &TypeRecord) -> Option<String>;
}

// ============================================================================
// SECTION: Proxy Runtime
// ============================================================================

/// Proxy construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The base address could not be used by the runtime.
    #[error("invalid base address {address}: {reason}")]
    InvalidAddress {
        /// Address that was rejected.
        address: String,
        /// Runtime-specific reason.
        reason: String,
    },
    /// The runtime failed to build the proxy.
    #[error("proxy build failed: {0}")]
    Build(String),
}

/// Transport that builds typed proxies for client interfaces.
pub trait ProxyRuntime {
    /// Proxy handle produced by the runtime.
    type Proxy;

    /// Creates a proxy for `resource` bound to `base_address`.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError`] when the proxy cannot be built.
    fn create(
        &self,
        base_address: &ResolvedBaseAddress,
        resource: &ResourceType,
        providers: &ProviderList,
    ) -> Result<Self::Proxy, ProxyError>;
}

// ============================================================================
// SECTION: Deployment Provisioner
// ============================================================================

/// Deployment provisioning errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Provisioning configuration is invalid.
    #[error("deployment configuration error: {0}")]
    Configuration(String),
    /// The deployment failed to start or become ready.
    #[error("deployment start failed: {0}")]
    Start(String),
    /// The deployment address is not available.
    #[error("deployment address unavailable: {0}")]
    Unavailable(String),
}

/// Collaborator that owns the deployment of the application-under-test.
pub trait DeploymentProvisioner {
    /// Applies provisioning configuration before start.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when configuration is invalid.
    fn apply_configuration(&mut self) -> Result<(), ProvisionError>;

    /// Starts the backing deployment.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when the deployment fails to start.
    fn start_containers(&mut self) -> Result<(), ProvisionError>;

    /// Returns the externally reachable application URL (scheme, host, port).
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when the deployment is not running.
    fn application_url(&self) -> Result<String, ProvisionError>;
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Sink for harness diagnostics.
pub trait Reporter: Send + Sync {
    /// Records a diagnostic.
    fn report(&self, diagnostic: &Diagnostic);
}

/// No-op reporter.
///
/// # Invariants
/// - Diagnostics are intentionally discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _diagnostic: &Diagnostic) {}
}
