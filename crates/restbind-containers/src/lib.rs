// crates/restbind-containers/src/lib.rs
// ============================================================================
// Module: Restbind Containers Library
// Description: Deployment provisioners for the application under test.
// Purpose: Start or locate the deployment and report its reachable address.
// Dependencies: restbind-core, restbind-config, testcontainers, reqwest
// ============================================================================

//! ## Overview
//! Two provisioners implement the core deployment seam:
//! [`ContainerProvisioner`] starts the application image with
//! `testcontainers`, and [`ExternalProvisioner`] points at a deployment that
//! is already running. [`provisioner_from_config`] picks one from the
//! `[deployment]` configuration section.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod container;
pub mod external;
pub mod readiness;

// ============================================================================
// SECTION: Imports
// ============================================================================

use restbind_config::DeploymentConfig;
use restbind_config::DeploymentMode;
use restbind_core::DeploymentProvisioner;
use restbind_core::ProvisionError;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use container::ContainerProvisioner;
pub use container::ensure_docker_available;
pub use external::ExternalProvisioner;
pub use readiness::wait_for_http_ready;

// ============================================================================
// SECTION: Configured Provisioner
// ============================================================================

/// Provisioner selected from configuration.
#[derive(Debug)]
pub enum ConfiguredProvisioner {
    /// Container started from an image.
    Container(ContainerProvisioner),
    /// Already-running deployment.
    External(ExternalProvisioner),
}

impl DeploymentProvisioner for ConfiguredProvisioner {
    fn apply_configuration(&mut self) -> Result<(), ProvisionError> {
        match self {
            Self::Container(inner) => inner.apply_configuration(),
            Self::External(inner) => inner.apply_configuration(),
        }
    }

    fn start_containers(&mut self) -> Result<(), ProvisionError> {
        match self {
            Self::Container(inner) => inner.start_containers(),
            Self::External(inner) => inner.start_containers(),
        }
    }

    fn application_url(&self) -> Result<String, ProvisionError> {
        match self {
            Self::Container(inner) => inner.application_url(),
            Self::External(inner) => inner.application_url(),
        }
    }
}

/// Builds the provisioner named by `config.mode`.
#[must_use]
pub fn provisioner_from_config(config: &DeploymentConfig) -> ConfiguredProvisioner {
    match config.mode {
        DeploymentMode::Container => {
            ConfiguredProvisioner::Container(ContainerProvisioner::new(config.clone()))
        }
        DeploymentMode::External => {
            ConfiguredProvisioner::External(ExternalProvisioner::from_config(config))
        }
    }
}
