// crates/restbind-rest/src/runtime.rs
// ============================================================================
// Module: REST Runtime
// Description: Proxy runtime backed by a shared blocking HTTP client.
// Purpose: Validate base addresses and hand out bound REST proxies.
// Dependencies: restbind-core, reqwest, url
// ============================================================================

//! ## Overview
//! The runtime owns one HTTP client and clones it into every proxy, so all
//! proxies built by a factory share a connection pool. Base addresses must be
//! absolute `http` or `https` URLs with a host.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::blocking::Client;
use restbind_core::ProviderList;
use restbind_core::ProxyError;
use restbind_core::ProxyRuntime;
use restbind_core::ResolvedBaseAddress;
use restbind_core::ResourceType;
use url::Url;

use crate::proxy::RestProxy;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Runtime
// ============================================================================

/// Proxy runtime producing [`RestProxy`] handles.
#[derive(Debug, Clone)]
pub struct RestRuntime {
    /// Client shared by all proxies.
    client: Client,
}

impl RestRuntime {
    /// Builds a runtime with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Build`] when the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, ProxyError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Builds a runtime with a specific per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Build`] when the HTTP client cannot be constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ProxyError::Build(err.to_string()))?;
        Ok(Self {
            client,
        })
    }

    /// Creates a runtime over a preconfigured client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
        }
    }
}

impl ProxyRuntime for RestRuntime {
    type Proxy = RestProxy;

    fn create(
        &self,
        base_address: &ResolvedBaseAddress,
        resource: &ResourceType,
        providers: &ProviderList,
    ) -> Result<Self::Proxy, ProxyError> {
        validate_base_address(base_address)?;
        Ok(RestProxy::new(
            base_address.clone(),
            resource.clone(),
            providers.clone(),
            self.client.clone(),
        ))
    }
}

/// Rejects base addresses that are not absolute http(s) URLs.
fn validate_base_address(base_address: &ResolvedBaseAddress) -> Result<(), ProxyError> {
    let invalid = |reason: String| ProxyError::InvalidAddress {
        address: base_address.to_string(),
        reason,
    };
    let url = Url::parse(base_address.as_str()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(invalid(format!("unsupported scheme: {scheme}"))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}
