// crates/restbind-config/src/config.rs
// ============================================================================
// Module: Restbind Configuration
// Description: Configuration loading and validation for the test harness.
// Purpose: Provide strict, fail-closed config parsing with explicit limits.
// Dependencies: restbind-core, serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from `restbind.toml`, the path named by
//! `RESTBIND_CONFIG`, or an explicit path argument. Every section has
//! defaults, so an empty file is a valid configuration: JSON clients, the
//! default scan policy, and an external deployment whose URL is supplied
//! later.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use restbind_core::DEFAULT_ROOT_PATH;
use restbind_core::DEFAULT_WIDEN_DEPTH;
use restbind_core::MediaProvider;
use restbind_core::ProviderList;
use restbind_core::ScanPolicy;
use restbind_core::ScanScope;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "restbind.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "RESTBIND_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default client request timeout in milliseconds.
pub(crate) const DEFAULT_CLIENT_TIMEOUT_MS: u64 = 30_000;
/// Maximum client request timeout in milliseconds.
pub(crate) const MAX_CLIENT_TIMEOUT_MS: u64 = 600_000;
/// Default container image tag.
pub(crate) const DEFAULT_IMAGE_TAG: &str = "latest";
/// Default application port inside the container.
pub(crate) const DEFAULT_APPLICATION_PORT: u16 = 9080;
/// Default container startup timeout in milliseconds.
pub(crate) const DEFAULT_STARTUP_TIMEOUT_MS: u64 = 120_000;
/// Maximum container startup timeout in milliseconds.
pub(crate) const MAX_STARTUP_TIMEOUT_MS: u64 = 1_800_000;
/// Maximum number of container environment entries.
pub(crate) const MAX_CONTAINER_ENV_ENTRIES: usize = 128;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Restbind harness configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestbindConfig {
    /// Descriptor resolution settings.
    #[serde(default)]
    pub resolution: ResolutionConfig,
    /// Client proxy settings.
    #[serde(default)]
    pub client: ClientConfig,
    /// Deployment under test.
    #[serde(default)]
    pub deployment: DeploymentConfig,
}

impl RestbindConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolution.validate()?;
        self.client.validate()?;
        self.deployment.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Descriptor resolution settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolutionConfig {
    /// Explicit module scope searched instead of each resource's own module.
    #[serde(default)]
    pub scope: Option<String>,
    /// Whether to widen the search to an ancestor scope.
    #[serde(default = "default_widen")]
    pub widen: bool,
    /// Leading module segments kept when widening.
    #[serde(default = "default_widen_depth")]
    pub widen_depth: usize,
    /// Root path used when no application descriptor is found.
    #[serde(default = "default_root_path")]
    pub default_root_path: String,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            scope: None,
            widen: default_widen(),
            widen_depth: default_widen_depth(),
            default_root_path: default_root_path(),
        }
    }
}

impl ResolutionConfig {
    /// Validates resolution settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(scope) = &self.scope
            && scope.trim().is_empty()
        {
            return Err(ConfigError::Invalid("resolution.scope must be non-empty".to_string()));
        }
        if self.widen_depth == 0 {
            return Err(ConfigError::Invalid(
                "resolution.widen_depth must be greater than zero".to_string(),
            ));
        }
        if !self.default_root_path.starts_with('/') {
            return Err(ConfigError::Invalid(
                "resolution.default_root_path must start with '/'".to_string(),
            ));
        }
        Ok(())
    }

    /// Converts the settings into a resolver scan policy.
    #[must_use]
    pub fn scan_policy(&self) -> ScanPolicy {
        ScanPolicy {
            scope: self.scope.as_deref().map(|scope| ScanScope::new(scope.trim())),
            widen_depth: self.widen.then_some(self.widen_depth),
            default_root_path: self.default_root_path.clone(),
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Client proxy settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Provider labels attached to every proxy.
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_client_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            timeout_ms: default_client_timeout_ms(),
        }
    }
}

impl ClientConfig {
    /// Validates client settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.provider_list()?;
        if self.timeout_ms == 0 || self.timeout_ms > MAX_CLIENT_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "client.timeout_ms must be between 1 and {MAX_CLIENT_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }

    /// Parses the configured provider labels.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty list or an unknown label.
    pub fn provider_list(&self) -> Result<ProviderList, ConfigError> {
        if self.providers.is_empty() {
            return Err(ConfigError::Invalid("client.providers must be non-empty".to_string()));
        }
        self.providers
            .iter()
            .map(|label| {
                label
                    .parse::<MediaProvider>()
                    .map_err(|err| ConfigError::Invalid(format!("client.providers: {err}")))
            })
            .collect()
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// ============================================================================
// SECTION: Deployment
// ============================================================================

/// How the deployment under test is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
    /// Start a container from a configured image.
    Container,
    /// Use an already-running deployment.
    #[default]
    External,
}

/// Deployment under test.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentConfig {
    /// Deployment mode.
    #[serde(default)]
    pub mode: DeploymentMode,
    /// Container image name (container mode).
    #[serde(default)]
    pub image: Option<String>,
    /// Container image tag.
    #[serde(default = "default_image_tag")]
    pub tag: String,
    /// Application port inside the container.
    #[serde(default = "default_application_port")]
    pub port: u16,
    /// Stdout message signalling the application is up.
    #[serde(default)]
    pub ready_log: Option<String>,
    /// HTTP path polled until it answers with success.
    #[serde(default)]
    pub ready_path: Option<String>,
    /// Container startup timeout in milliseconds.
    #[serde(default = "default_startup_timeout_ms")]
    pub startup_timeout_ms: u64,
    /// Container environment variables.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Application URL (external mode).
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            mode: DeploymentMode::default(),
            image: None,
            tag: default_image_tag(),
            port: default_application_port(),
            ready_log: None,
            ready_path: None,
            startup_timeout_ms: default_startup_timeout_ms(),
            env: BTreeMap::new(),
            url: None,
        }
    }
}

impl DeploymentConfig {
    /// Validates deployment settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.mode == DeploymentMode::Container {
            match self.image.as_deref().map(str::trim) {
                Some(image) if !image.is_empty() => {}
                _ => {
                    return Err(ConfigError::Invalid(
                        "deployment.image is required in container mode".to_string(),
                    ));
                }
            }
            if self.tag.trim().is_empty() {
                return Err(ConfigError::Invalid("deployment.tag must be non-empty".to_string()));
            }
            if self.port == 0 {
                return Err(ConfigError::Invalid(
                    "deployment.port must be greater than zero".to_string(),
                ));
            }
        }
        if let Some(ready_log) = &self.ready_log
            && ready_log.is_empty()
        {
            return Err(ConfigError::Invalid(
                "deployment.ready_log must be non-empty".to_string(),
            ));
        }
        if let Some(ready_path) = &self.ready_path
            && !ready_path.starts_with('/')
        {
            return Err(ConfigError::Invalid(
                "deployment.ready_path must start with '/'".to_string(),
            ));
        }
        if self.startup_timeout_ms == 0 || self.startup_timeout_ms > MAX_STARTUP_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "deployment.startup_timeout_ms must be between 1 and {MAX_STARTUP_TIMEOUT_MS}"
            )));
        }
        if self.env.len() > MAX_CONTAINER_ENV_ENTRIES {
            return Err(ConfigError::Invalid(format!(
                "deployment.env exceeds {MAX_CONTAINER_ENV_ENTRIES} entries"
            )));
        }
        if self.env.keys().any(|key| key.trim().is_empty() || key.contains('=')) {
            return Err(ConfigError::Invalid(
                "deployment.env keys must be non-empty and must not contain '='".to_string(),
            ));
        }
        if let Some(url) = &self.url {
            validate_application_url(url)?;
        }
        Ok(())
    }

    /// Returns the container startup timeout.
    #[must_use]
    pub const fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates an application URL: absolute http(s) with a host.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the URL is unusable.
pub fn validate_application_url(value: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(value.trim())
        .map_err(|err| ConfigError::Invalid(format!("deployment.url is invalid: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid("deployment.url must use http or https".to_string()));
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::Invalid("deployment.url must include a host".to_string()));
    }
    Ok(())
}

/// Resolves the config path from an argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Widening is enabled by default.
const fn default_widen() -> bool {
    true
}

/// Default widening depth.
const fn default_widen_depth() -> usize {
    DEFAULT_WIDEN_DEPTH
}

/// Default fallback root path.
fn default_root_path() -> String {
    DEFAULT_ROOT_PATH.to_string()
}

/// Default provider labels.
fn default_providers() -> Vec<String> {
    ProviderList::default().labels()
}

/// Default client request timeout in milliseconds.
const fn default_client_timeout_ms() -> u64 {
    DEFAULT_CLIENT_TIMEOUT_MS
}

/// Default container image tag.
fn default_image_tag() -> String {
    DEFAULT_IMAGE_TAG.to_string()
}

/// Default application port.
const fn default_application_port() -> u16 {
    DEFAULT_APPLICATION_PORT
}

/// Default container startup timeout in milliseconds.
const fn default_startup_timeout_ms() -> u64 {
    DEFAULT_STARTUP_TIMEOUT_MS
}
