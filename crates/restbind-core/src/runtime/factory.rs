// crates/restbind-core/src/runtime/factory.rs
// ============================================================================
// Module: Client Factory
// Description: Builds typed proxies bound to resolved base addresses.
// Purpose: Combine path resolution with the configured proxy runtime.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! The client factory resolves a base address through [`PathResolver`] and
//! asks the [`ProxyRuntime`] for a proxy bound to it, attaching the configured
//! provider list. Every build is reported.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Diagnostic;
use crate::core::ProviderList;
use crate::core::ResolvedBaseAddress;
use crate::core::Resource;
use crate::core::ResourceType;
use crate::interfaces::ProxyError;
use crate::interfaces::ProxyRuntime;
use crate::runtime::resolver::PathResolver;
use crate::runtime::resolver::ResolveError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Client construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Base address resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// The proxy runtime failed.
    #[error(transparent)]
    Proxy(#[from] ProxyError),
}

// ============================================================================
// SECTION: Factory
// ============================================================================

/// Builds proxies for client interfaces.
pub struct ClientFactory<R> {
    /// Runtime producing proxies.
    runtime: R,
    /// Resolver for base addresses.
    resolver: PathResolver,
    /// Providers attached to every proxy.
    providers: ProviderList,
}

impl<R: ProxyRuntime> ClientFactory<R> {
    /// Creates a factory with the default provider list.
    #[must_use]
    pub fn new(runtime: R, resolver: PathResolver) -> Self {
        Self {
            runtime,
            resolver,
            providers: ProviderList::default(),
        }
    }

    /// Replaces the provider list attached to built proxies.
    #[must_use]
    pub fn with_providers(mut self, providers: ProviderList) -> Self {
        self.providers = providers;
        self
    }

    /// Returns the provider list.
    #[must_use]
    pub const fn providers(&self) -> &ProviderList {
        &self.providers
    }

    /// Returns the resolver.
    #[must_use]
    pub const fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Returns the proxy runtime.
    #[must_use]
    pub const fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Resolves the base address for `resource` under `context_root` and builds a proxy.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when resolution or proxy construction fails.
    pub fn build(
        &self,
        resource: &ResourceType,
        context_root: &str,
    ) -> Result<R::Proxy, FactoryError> {
        let base_address = self.resolver.resolve(resource, context_root)?;
        self.build_at(resource, &base_address)
    }

    /// Builds a proxy bound to an already resolved base address.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Proxy`] when the runtime fails.
    pub fn build_at(
        &self,
        resource: &ResourceType,
        base_address: &ResolvedBaseAddress,
    ) -> Result<R::Proxy, FactoryError> {
        self.resolver.reporter().report(&Diagnostic::ClientBuilt {
            resource: resource.canonical_name(),
            base_address: base_address.to_string(),
            providers: self.providers.labels(),
        });
        Ok(self.runtime.create(base_address, resource, &self.providers)?)
    }

    /// Builds a typed client `T` under `context_root`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when resolution or proxy construction fails.
    pub fn build_resource<T: Resource<R::Proxy>>(
        &self,
        context_root: &str,
    ) -> Result<T, FactoryError> {
        self.build(&T::resource_type(), context_root).map(T::from_proxy)
    }
}
