// crates/restbind-core/src/core/diagnostics.rs
// ============================================================================
// Module: Harness Diagnostics
// Description: Structured diagnostics emitted during resolution and binding.
// Purpose: Give reporters typed events instead of preformatted log lines.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Diagnostics are the only side effect of resolution and binding besides the
//! returned values. Each carries a [`DiagnosticLevel`] so reporters can route
//! it; none of them are errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Levels
// ============================================================================

/// Severity attached to a diagnostic.
///
/// # Invariants
/// - Variants are stable for reporter routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    /// Fine-grained progress.
    Debug,
    /// Notable but expected outcome.
    Info,
    /// Degraded outcome that still resolved.
    Warn,
}

impl DiagnosticLevel {
    /// Returns a stable label for the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Event reported by the harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No application descriptor was found; the default root path is used.
    NoApplicationFound {
        /// Client interface being resolved.
        resource: String,
        /// Scopes searched, in order.
        scopes: Vec<String>,
        /// Root path used instead.
        default_root_path: String,
    },
    /// Several descriptors were found; the first by canonical name was chosen.
    AmbiguousApplication {
        /// Client interface being resolved.
        resource: String,
        /// Candidate canonical names, sorted ascending.
        candidates: Vec<String>,
        /// Canonical name of the chosen descriptor.
        selected: String,
    },
    /// Exactly one descriptor was found.
    ApplicationSelected {
        /// Client interface being resolved.
        resource: String,
        /// Canonical name of the descriptor.
        descriptor: String,
        /// Root path declared by the descriptor.
        root_path: String,
    },
    /// A proxy was built.
    ClientBuilt {
        /// Client interface the proxy implements.
        resource: String,
        /// Address the proxy is bound to.
        base_address: String,
        /// Provider labels attached to the proxy.
        providers: Vec<String>,
    },
    /// A proxy was bound to a test-class field.
    ClientInjected {
        /// Test class being prepared.
        test_class: String,
        /// Field name.
        field: String,
        /// Client interface bound to the field.
        resource: String,
    },
    /// The deployment for a test class is reachable.
    DeploymentReady {
        /// Test class being prepared.
        test_class: String,
        /// Externally reachable application URL.
        application_url: String,
    },
}

impl Diagnostic {
    /// Returns the severity of the diagnostic.
    #[must_use]
    pub const fn level(&self) -> DiagnosticLevel {
        match self {
            Self::AmbiguousApplication { .. } => DiagnosticLevel::Warn,
            Self::NoApplicationFound { .. }
            | Self::ClientBuilt { .. }
            | Self::DeploymentReady { .. } => DiagnosticLevel::Info,
            Self::ApplicationSelected { .. } | Self::ClientInjected { .. } => {
                DiagnosticLevel::Debug
            }
        }
    }

    /// Returns a stable label for the diagnostic kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NoApplicationFound { .. } => "no_application_found",
            Self::AmbiguousApplication { .. } => "ambiguous_application",
            Self::ApplicationSelected { .. } => "application_selected",
            Self::ClientBuilt { .. } => "client_built",
            Self::ClientInjected { .. } => "client_injected",
            Self::DeploymentReady { .. } => "deployment_ready",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoApplicationFound {
                resource,
                scopes,
                default_root_path,
            } => write!(
                f,
                "no application descriptor found in [{}] for {resource}; defaulting root path to \
                 '{default_root_path}'",
                scopes.join(", ")
            ),
            Self::AmbiguousApplication {
                resource,
                candidates,
                selected,
            } => write!(
                f,
                "found multiple application descriptors for {resource}: [{}]; using the first \
                 ({selected})",
                candidates.join(", ")
            ),
            Self::ApplicationSelected {
                resource,
                descriptor,
                root_path,
            } => write!(f, "using {descriptor} with root path '{root_path}' for {resource}"),
            Self::ClientBuilt {
                resource,
                base_address,
                providers,
            } => write!(
                f,
                "building client for {resource} with base address {base_address} and providers \
                 [{}]",
                providers.join(", ")
            ),
            Self::ClientInjected {
                test_class,
                field,
                resource,
            } => write!(f, "injected {resource} client into {test_class}.{field}"),
            Self::DeploymentReady {
                test_class,
                application_url,
            } => write!(f, "deployment for {test_class} reachable at {application_url}"),
        }
    }
}
