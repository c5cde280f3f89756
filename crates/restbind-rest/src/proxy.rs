// crates/restbind-rest/src/proxy.rs
// ============================================================================
// Module: REST Proxy
// Description: Blocking HTTP calls relative to a resolved base address.
// Purpose: Give typed client wrappers a small, provider-aware request surface.
// Dependencies: restbind-core, reqwest, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! A [`RestProxy`] is bound to one base address. Request paths are joined to
//! it with exactly one separator, so `"/items"` and `"items"` address the same
//! endpoint. JSON calls need the JSON provider and text calls need the
//! plain-text provider. Non-success statuses fail closed. Response bodies
//! are read through a byte cap and never buffered past it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;

use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::blocking::Response;
use reqwest::header::ACCEPT;
use restbind_core::MediaProvider;
use restbind_core::ProviderList;
use restbind_core::ResolvedBaseAddress;
use restbind_core::ResourceType;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum size of a success response body.
pub const MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;
/// Maximum bytes of an error response body kept in [`RestError::Status`].
const MAX_ERROR_BODY_BYTES: u64 = 2048;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// REST call errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum RestError {
    /// The proxy was built without the provider the call needs.
    #[error("{resource} has no {provider} provider attached")]
    MissingProvider {
        /// Resource the proxy was built for.
        resource: String,
        /// Provider the call required.
        provider: MediaProvider,
    },
    /// The server answered with a non-success status.
    #[error("{method} {url} returned status {status}")]
    Status {
        /// HTTP method.
        method: &'static str,
        /// Request URL.
        url: String,
        /// Response status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },
    /// The request could not be sent or the body could not be read.
    #[error("{method} {url} failed: {reason}")]
    Transport {
        /// HTTP method.
        method: &'static str,
        /// Request URL.
        url: String,
        /// Transport failure description.
        reason: String,
    },
    /// The response body exceeded the size cap.
    #[error("{method} {url} returned a body larger than {max_bytes} bytes")]
    TooLarge {
        /// HTTP method.
        method: &'static str,
        /// Request URL.
        url: String,
        /// Size cap in bytes.
        max_bytes: usize,
    },
    /// The response body did not decode into the requested type.
    #[error("{method} {url} returned an undecodable body: {reason}")]
    Decode {
        /// HTTP method.
        method: &'static str,
        /// Request URL.
        url: String,
        /// Decoder failure description.
        reason: String,
    },
}

impl RestError {
    /// Returns the HTTP status for [`RestError::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status {
                status, ..
            } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Proxy
// ============================================================================

/// HTTP proxy bound to one base address.
#[derive(Debug, Clone)]
pub struct RestProxy {
    /// Base address every request path is joined to.
    base_address: ResolvedBaseAddress,
    /// Resource the proxy serves.
    resource: ResourceType,
    /// Attached media providers.
    providers: ProviderList,
    /// Shared HTTP client.
    client: Client,
    /// Size cap for success response bodies.
    max_body_bytes: usize,
}

impl RestProxy {
    /// Creates a proxy over an existing HTTP client.
    #[must_use]
    pub const fn new(
        base_address: ResolvedBaseAddress,
        resource: ResourceType,
        providers: ProviderList,
        client: Client,
    ) -> Self {
        Self {
            base_address,
            resource,
            providers,
            client,
            max_body_bytes: MAX_RESPONSE_BYTES,
        }
    }

    /// Replaces the size cap for success response bodies.
    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Returns the base address.
    #[must_use]
    pub const fn base_address(&self) -> &ResolvedBaseAddress {
        &self.base_address
    }

    /// Returns the resource the proxy serves.
    #[must_use]
    pub const fn resource(&self) -> &ResourceType {
        &self.resource
    }

    /// Returns the attached providers.
    #[must_use]
    pub const fn providers(&self) -> &ProviderList {
        &self.providers
    }

    /// Returns the absolute URL for a request path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        self.base_address.endpoint(path)
    }

    /// Sends `GET path` and decodes a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] when the JSON provider is missing or the call fails.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RestError> {
        self.require(MediaProvider::Json)?;
        let url = self.url(path);
        let request = self.client.get(&url);
        let response = self.send("GET", &url, request, MediaProvider::Json)?;
        let body = self.read_body("GET", &url, response)?;
        decode_json("GET", &url, &body)
    }

    /// Sends `POST path` with a JSON body and decodes a JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] when the JSON provider is missing or the call fails.
    pub fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.require(MediaProvider::Json)?;
        let url = self.url(path);
        let request = self.client.post(&url).json(body);
        let response = self.send("POST", &url, request, MediaProvider::Json)?;
        let body = self.read_body("POST", &url, response)?;
        decode_json("POST", &url, &body)
    }

    /// Sends `PUT path` with a JSON body and decodes a JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] when the JSON provider is missing or the call fails.
    pub fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, RestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.require(MediaProvider::Json)?;
        let url = self.url(path);
        let request = self.client.put(&url).json(body);
        let response = self.send("PUT", &url, request, MediaProvider::Json)?;
        let body = self.read_body("PUT", &url, response)?;
        decode_json("PUT", &url, &body)
    }

    /// Sends `DELETE path`, discarding any body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] when the call fails or answers with a non-success status.
    pub fn delete(&self, path: &str) -> Result<(), RestError> {
        let url = self.url(path);
        let request = self.client.delete(&url);
        let accept = self.providers.iter().next().unwrap_or(MediaProvider::Json);
        self.send("DELETE", &url, request, accept)?;
        Ok(())
    }

    /// Sends `GET path` and returns the body as text.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] when the plain-text provider is missing or the call fails.
    pub fn get_text(&self, path: &str) -> Result<String, RestError> {
        self.require(MediaProvider::PlainText)?;
        let url = self.url(path);
        let request = self.client.get(&url);
        let response = self.send("GET", &url, request, MediaProvider::PlainText)?;
        let body = self.read_body("GET", &url, response)?;
        String::from_utf8(body).map_err(|err| RestError::Decode {
            method: "GET",
            url,
            reason: err.to_string(),
        })
    }

    /// Fails when `provider` is not attached.
    fn require(&self, provider: MediaProvider) -> Result<(), RestError> {
        if self.providers.contains(provider) {
            return Ok(());
        }
        Err(RestError::MissingProvider {
            resource: self.resource.canonical_name(),
            provider,
        })
    }

    /// Sends a request and rejects non-success statuses.
    fn send(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
        accept: MediaProvider,
    ) -> Result<Response, RestError> {
        debug!(
            target: "restbind::rest",
            method,
            url,
            resource = %self.resource,
            "sending request"
        );
        let response = request.header(ACCEPT, accept.media_type()).send().map_err(|err| {
            RestError::Transport {
                method,
                url: url.to_string(),
                reason: err.to_string(),
            }
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let mut body = Vec::new();
        let _ = response.take(MAX_ERROR_BODY_BYTES).read_to_end(&mut body);
        Err(RestError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// Reads a success body, failing once it exceeds the size cap.
    fn read_body(
        &self,
        method: &'static str,
        url: &str,
        response: Response,
    ) -> Result<Vec<u8>, RestError> {
        let too_large = || RestError::TooLarge {
            method,
            url: url.to_string(),
            max_bytes: self.max_body_bytes,
        };
        let max_bytes = u64::try_from(self.max_body_bytes).unwrap_or(u64::MAX);
        if response.content_length().is_some_and(|length| length > max_bytes) {
            return Err(too_large());
        }
        let mut body = Vec::new();
        response.take(max_bytes.saturating_add(1)).read_to_end(&mut body).map_err(|err| {
            RestError::Transport {
                method,
                url: url.to_string(),
                reason: err.to_string(),
            }
        })?;
        if body.len() > self.max_body_bytes {
            return Err(too_large());
        }
        Ok(body)
    }
}

/// Decodes a JSON response body.
fn decode_json<T: DeserializeOwned>(
    method: &'static str,
    url: &str,
    body: &[u8],
) -> Result<T, RestError> {
    serde_json::from_slice(body).map_err(|err| RestError::Decode {
        method,
        url: url.to_string(),
        reason: err.to_string(),
    })
}
