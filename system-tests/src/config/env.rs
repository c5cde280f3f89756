// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: restbind-config
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use restbind_config::DeploymentMode;
use restbind_config::RestbindConfig;
use restbind_config::validate_application_url;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional URL of an already-running application under test.
    AppUrl,
    /// Optional path to a `restbind.toml` used by the suites.
    ConfigPath,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Allow suites that start containers (`true`/`false` or `1`/`0`).
    AllowDocker,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AppUrl => "RESTBIND_SYSTEM_TEST_APP_URL",
            Self::ConfigPath => "RESTBIND_SYSTEM_TEST_CONFIG",
            Self::TimeoutSeconds => "RESTBIND_SYSTEM_TEST_TIMEOUT_SEC",
            Self::AllowDocker => "RESTBIND_SYSTEM_TEST_ALLOW_DOCKER",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional application URL; forces an external deployment.
    pub app_url: Option<String>,
    /// Optional harness config path.
    pub config_path: Option<PathBuf>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
    /// Allow suites that start containers.
    pub allow_docker: bool,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid timeout or boolean value).
    pub fn load() -> Result<Self, String> {
        let app_url = read_env_nonempty(SystemTestEnv::AppUrl.as_str())?;
        if let Some(url) = &app_url {
            validate_application_url(url)
                .map_err(|err| format!("{}: {err}", SystemTestEnv::AppUrl.as_str()))?;
        }
        let config_path =
            read_env_nonempty(SystemTestEnv::ConfigPath.as_str())?.map(PathBuf::from);
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let allow_docker = parse_bool_env(
            SystemTestEnv::AllowDocker.as_str(),
            read_env_nonempty(SystemTestEnv::AllowDocker.as_str())?,
        )?;
        Ok(Self {
            app_url,
            config_path,
            timeout,
            allow_docker,
        })
    }

    /// Builds the harness configuration the suites run against.
    ///
    /// Reads `config_path` when set, otherwise starts from defaults. An
    /// application URL switches the deployment to external mode, and a
    /// timeout override replaces the startup timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the config file cannot be loaded or the merged
    /// configuration is invalid.
    pub fn harness_config(&self) -> Result<RestbindConfig, String> {
        let mut config = match &self.config_path {
            Some(path) => RestbindConfig::load(Some(path)).map_err(|err| err.to_string())?,
            None => RestbindConfig::default(),
        };
        if let Some(url) = &self.app_url {
            config.deployment.mode = DeploymentMode::External;
            config.deployment.url = Some(url.clone());
        }
        if let Some(timeout) = self.timeout {
            config.deployment.startup_timeout_ms =
                u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        }
        config.validate().map_err(|err| err.to_string())?;
        Ok(config)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable with permissive defaults.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
