// crates/restbind-containers/src/container.rs
// ============================================================================
// Module: Container Provisioner
// Description: Starts the application image with testcontainers.
// Purpose: Provide an isolated deployment per hook and report its address.
// Dependencies: restbind-config, restbind-core, testcontainers, reqwest
// ============================================================================

//! ## Overview
//! `apply_configuration` turns the `[deployment]` section into a container
//! request, `start_containers` runs it synchronously and waits for the
//! configured log line and readiness path, and `application_url` reports
//! `http://{host}:{mapped_port}`. One container serves every test class
//! prepared through the provisioner: while it runs, both setup steps keep it
//! and its address. The container stops when the provisioner is dropped or
//! [`ContainerProvisioner::shutdown`] is called.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::process::Command;
use std::time::Duration;

use reqwest::blocking::Client;
use restbind_config::DeploymentConfig;
use restbind_core::DeploymentProvisioner;
use restbind_core::ProvisionError;
use restbind_core::join_path;
use testcontainers::Container;
use testcontainers::ContainerRequest;
use testcontainers::GenericImage;
use testcontainers::ImageExt;
use testcontainers::core::IntoContainerPort;
use testcontainers::core::WaitFor;
use testcontainers::runners::SyncRunner;
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

/// Provisioner backed by a container started from the configured image.
pub struct ContainerProvisioner {
    /// Deployment settings.
    config: DeploymentConfig,
    /// Prepared request, consumed by start.
    request: Option<ContainerRequest<GenericImage>>,
    /// Running container.
    container: Option<Container<GenericImage>>,
    /// Reachable application URL once started.
    url: Option<String>,
}

impl ContainerProvisioner {
    /// Creates a provisioner for `config`.
    #[must_use]
    pub const fn new(config: DeploymentConfig) -> Self {
        Self {
            config,
            request: None,
            container: None,
            url: None,
        }
    }

    /// Returns the deployment settings.
    #[must_use]
    pub const fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    /// Returns true while a container is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.container.is_some()
    }

    /// Stops the running container, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Start`] when the container cannot be stopped.
    pub fn shutdown(&mut self) -> Result<(), ProvisionError> {
        self.url = None;
        if let Some(container) = self.container.take() {
            container.stop().map_err(|err| {
                ProvisionError::Start(format!("failed to stop container: {err}"))
            })?;
            info!(
                target: "restbind::containers",
                image = %self.image_ref(),
                "container stopped"
            );
        }
        Ok(())
    }

    /// Returns `image:tag`.
    fn image_ref(&self) -> String {
        format!("{}:{}", self.config.image.as_deref().unwrap_or_default(), self.config.tag)
    }
}

impl fmt::Debug for ContainerProvisioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerProvisioner")
            .field("config", &self.config)
            .field("prepared", &self.request.is_some())
            .field("running", &self.container.is_some())
            .field("url", &self.url)
            .finish()
    }
}

impl DeploymentProvisioner for ContainerProvisioner {
    fn apply_configuration(&mut self) -> Result<(), ProvisionError> {
        if self.container.is_some() {
            return Ok(());
        }
        let image = match self.config.image.as_deref().map(str::trim) {
            Some(image) if !image.is_empty() => image.to_string(),
            _ => {
                return Err(ProvisionError::Configuration(
                    "deployment.image is required in container mode".to_string(),
                ));
            }
        };
        if self.config.port == 0 {
            return Err(ProvisionError::Configuration(
                "deployment.port must be greater than zero".to_string(),
            ));
        }
        let mut image = GenericImage::new(image, self.config.tag.clone())
            .with_exposed_port(self.config.port.tcp());
        if let Some(message) = &self.config.ready_log {
            image = image.with_wait_for(WaitFor::message_on_stdout(message.clone()));
        }
        let mut request = ContainerRequest::from(image);
        for (key, value) in &self.config.env {
            request = request.with_env_var(key.clone(), value.clone());
        }
        self.request = Some(request.with_startup_timeout(self.config.startup_timeout()));
        Ok(())
    }

    fn start_containers(&mut self) -> Result<(), ProvisionError> {
        if self.container.is_some() {
            info!(
                target: "restbind::containers",
                image = %self.image_ref(),
                "reusing running container"
            );
            return Ok(());
        }
        let request = self.request.take().ok_or_else(|| {
            ProvisionError::Configuration("configuration must be applied before start".to_string())
        })?;
        ensure_docker_available()?;
        info!(target: "restbind::containers", image = %self.image_ref(), "starting container");
        let container = request
            .start()
            .map_err(|err| ProvisionError::Start(format!("failed to start container: {err}")))?;
        let host = container
            .get_host()
            .map_err(|err| ProvisionError::Start(format!("failed to resolve host: {err}")))?;
        let port = container
            .get_host_port_ipv4(self.config.port.tcp())
            .map_err(|err| ProvisionError::Start(format!("failed to resolve port: {err}")))?;
        let url = format!("http://{host}:{port}");
        if let Some(path) = &self.config.ready_path {
            let client = Client::builder()
                .timeout(PROBE_TIMEOUT)
                .build()
                .map_err(|err| ProvisionError::Start(err.to_string()))?;
            wait_for_http_ready(&client, &join_path(&url, path), self.config.startup_timeout())?;
        }
        info!(
            target: "restbind::containers",
            image = %self.image_ref(),
            url = %url,
            "container ready"
        );
        self.container = Some(container);
        self.url = Some(url);
        Ok(())
    }

    fn application_url(&self) -> Result<String, ProvisionError> {
        self.url
            .clone()
            .ok_or_else(|| ProvisionError::Unavailable("container is not running".to_string()))
    }
}

// ============================================================================
// SECTION: Docker
// ============================================================================

/// Fails unless the docker daemon answers `docker info`.
///
/// # Errors
///
/// Returns [`ProvisionError::Unavailable`] when docker is missing or not running.
pub fn ensure_docker_available() -> Result<(), ProvisionError> {
    let output = Command::new("docker")
        .arg("info")
        .output()
        .map_err(|err| ProvisionError::Unavailable(format!("docker info failed: {err}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProvisionError::Unavailable(format!("docker info failed: {stderr}")));
    }
    Ok(())
}
