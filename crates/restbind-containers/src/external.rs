// crates/restbind-containers/src/external.rs
// ============================================================================
// Module: External Provisioner
// Description: Provisioner for a deployment that is already running.
// Purpose: Reuse an existing application endpoint instead of a container.
// Dependencies: restbind-config, restbind-core, reqwest
// ============================================================================

//! ## Overview
//! The external provisioner never starts anything. It validates the
//! configured URL, optionally waits for a readiness path to answer, and
//! reports the URL unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::blocking::Client;
use restbind_config::DeploymentConfig;
use restbind_config::validate_application_url;
use restbind_core::DeploymentProvisioner;
use restbind_core::ProvisionError;
use restbind_core::join_path;
use tracing::info;

use crate::readiness::wait_for_http_ready;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Per-request timeout used while probing readiness.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// SECTION: Provisioner
// ============================================================================

/// Provisioner pointing at an already-running deployment.
#[derive(Debug, Clone)]
pub struct ExternalProvisioner {
    /// Application URL, when known.
    url: Option<String>,
    /// Optional readiness path probed during start.
    ready_path: Option<String>,
    /// Readiness deadline.
    ready_timeout: Duration,
    /// Whether `apply_configuration` succeeded.
    configured: bool,
}

impl ExternalProvisioner {
    /// Creates a provisioner for `url` without readiness probing.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ready_path: None,
            ready_timeout: Duration::ZERO,
            configured: false,
        }
    }

    /// Creates a provisioner from the `[deployment]` section.
    #[must_use]
    pub fn from_config(config: &DeploymentConfig) -> Self {
        Self {
            url: config.url.clone(),
            ready_path: config.ready_path.clone(),
            ready_timeout: config.startup_timeout(),
            configured: false,
        }
    }

    /// Probes `path` during start until it answers or `timeout` expires.
    #[must_use]
    pub fn with_readiness(mut self, path: impl Into<String>, timeout: Duration) -> Self {
        self.ready_path = Some(path.into());
        self.ready_timeout = timeout;
        self
    }

    /// Returns the configured URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl DeploymentProvisioner for ExternalProvisioner {
    fn apply_configuration(&mut self) -> Result<(), ProvisionError> {
        let url = self.url.as_deref().ok_or_else(|| {
            ProvisionError::Configuration(
                "deployment.url is required in external mode".to_string(),
            )
        })?;
        validate_application_url(url)
            .map_err(|err| ProvisionError::Configuration(err.to_string()))?;
        self.configured = true;
        Ok(())
    }

    fn start_containers(&mut self) -> Result<(), ProvisionError> {
        if !self.configured {
            return Err(ProvisionError::Configuration(
                "configuration must be applied before start".to_string(),
            ));
        }
        let url = self.application_url()?;
        if let Some(path) = &self.ready_path {
            let client = Client::builder()
                .timeout(PROBE_TIMEOUT)
                .build()
                .map_err(|err| ProvisionError::Start(err.to_string()))?;
            wait_for_http_ready(&client, &join_path(&url, path), self.ready_timeout)?;
        }
        info!(target: "restbind::containers", url = %url, "using external deployment");
        Ok(())
    }

    fn application_url(&self) -> Result<String, ProvisionError> {
        match &self.url {
            Some(url) if self.configured => Ok(url.trim().to_string()),
            _ => Err(ProvisionError::Unavailable(
                "external deployment is not configured".to_string(),
            )),
        }
    }
}
