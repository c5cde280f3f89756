// crates/restbind-core/src/runtime/resolver.rs
// ============================================================================
// Module: Path Resolver
// Description: Derives the application-under-test base address from metadata.
// Purpose: Select an application descriptor with fallback and disambiguation.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! Resolution searches the resource type's own module for application
//! descriptors, widens to an ancestor scope when nothing is found, falls back
//! to the default root path when still nothing is found, and breaks ties by
//! canonical name. Missing or ambiguous descriptors are reported, never
//! raised.
//! Invariants:
//! - The context root is required; every other outcome resolves.
//! - Arguments are joined without their surrounding whitespace.
//! - Repeated calls against the same metadata choose the same descriptor.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::ApplicationDescriptor;
use crate::core::Diagnostic;
use crate::core::ResolvedBaseAddress;
use crate::core::ResourceType;
use crate::core::ScanScope;
use crate::core::TypeRecord;
use crate::interfaces::MetadataSource;
use crate::interfaces::Reporter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of leading module segments kept when widening the scan scope.
pub const DEFAULT_WIDEN_DEPTH: usize = 3;
/// Root path used when no application descriptor is found.
pub const DEFAULT_ROOT_PATH: &str = "/";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A required argument was missing or blank.
    #[error("supplied '{argument}' must not be empty")]
    NullArgument {
        /// Name of the missing argument.
        argument: &'static str,
    },
}

// ============================================================================
// SECTION: Scan Policy
// ============================================================================

/// Controls which scopes are searched for application descriptors.
///
/// # Invariants
/// - An explicit `scope` disables widening.
/// - `widen_depth = None` disables widening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPolicy {
    /// Explicit scope searched instead of the resource's own module.
    pub scope: Option<ScanScope>,
    /// Leading segments kept when widening the resource's module.
    pub widen_depth: Option<usize>,
    /// Root path used when no descriptor is found.
    pub default_root_path: String,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            scope: None,
            widen_depth: Some(DEFAULT_WIDEN_DEPTH),
            default_root_path: DEFAULT_ROOT_PATH.to_string(),
        }
    }
}

impl ScanPolicy {
    /// Returns the scopes to search for `resource`, narrowest first.
    #[must_use]
    pub fn scopes_for(&self, resource: &ResourceType) -> Vec<ScanScope> {
        if let Some(scope) = &self.scope {
            return vec![scope.clone()];
        }
        let own = resource.scope();
        let wider = self.widen_depth.and_then(|depth| own.widen(depth));
        let mut scopes = vec![own];
        scopes.extend(wider);
        scopes
    }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves base addresses for client interfaces.
#[derive(Clone)]
pub struct PathResolver {
    /// Metadata searched for descriptors.
    source: Arc<dyn MetadataSource + Send + Sync>,
    /// Scope selection policy.
    policy: ScanPolicy,
    /// Diagnostic sink.
    reporter: Arc<dyn Reporter>,
}

impl PathResolver {
    /// Creates a resolver with the default scan policy.
    #[must_use]
    pub fn new(
        source: Arc<dyn MetadataSource + Send + Sync>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            source,
            policy: ScanPolicy::default(),
            reporter,
        }
    }

    /// Replaces the scan policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the scan policy.
    #[must_use]
    pub const fn policy(&self) -> &ScanPolicy {
        &self.policy
    }

    /// Returns the diagnostic sink.
    #[must_use]
    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    /// Resolves the base address of the application serving `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NullArgument`] when `context_root` is blank.
    pub fn resolve(
        &self,
        resource: &ResourceType,
        context_root: &str,
    ) -> Result<ResolvedBaseAddress, ResolveError> {
        let context_root = require_argument("context_root", context_root)?;
        let root_path = self
            .select_descriptor(resource)
            .map_or_else(|| self.policy.default_root_path.clone(), |found| found.root_path);
        Ok(ResolvedBaseAddress::join(context_root, &root_path))
    }

    /// Joins a context root with an explicit application path.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NullArgument`] when either argument is blank.
    pub fn resolve_with_root(
        &self,
        context_root: &str,
        application_path: &str,
    ) -> Result<ResolvedBaseAddress, ResolveError> {
        let context_root = require_argument("context_root", context_root)?;
        let application_path = require_argument("application_path", application_path)?;
        Ok(ResolvedBaseAddress::join(context_root, application_path))
    }

    /// Selects the application descriptor for `resource`.
    ///
    /// Returns `None` when no scope yields a candidate.
    #[must_use]
    pub fn select_descriptor(&self, resource: &ResourceType) -> Option<ApplicationDescriptor> {
        let scopes = self.policy.scopes_for(resource);
        let mut candidates = Vec::new();
        for scope in &scopes {
            candidates = self.candidates_in(scope);
            if !candidates.is_empty() {
                break;
            }
        }

        if candidates.is_empty() {
            self.reporter.report(&Diagnostic::NoApplicationFound {
                resource: resource.canonical_name(),
                scopes: scopes.iter().map(ToString::to_string).collect(),
                default_root_path: self.policy.default_root_path.clone(),
            });
            return None;
        }

        candidates.sort_by(|left, right| left.canonical_name.cmp(&right.canonical_name));
        let names: Vec<String> =
            candidates.iter().map(|candidate| candidate.canonical_name.clone()).collect();
        let selected = candidates.remove(0);
        if names.len() == 1 {
            self.reporter.report(&Diagnostic::ApplicationSelected {
                resource: resource.canonical_name(),
                descriptor: selected.canonical_name.clone(),
                root_path: selected.root_path.clone(),
            });
        } else {
            self.reporter.report(&Diagnostic::AmbiguousApplication {
                resource: resource.canonical_name(),
                candidates: names,
                selected: selected.canonical_name.clone(),
            });
        }
        Some(selected)
    }

    /// Returns application descriptors declared inside `scope`.
    fn candidates_in(&self, scope: &ScanScope) -> Vec<ApplicationDescriptor> {
        let source = self.source.as_ref();
        let is_candidate =
            |record: &TypeRecord| record.application && source.find_root_path(record).is_some();
        source
            .find_types_in_scope(scope, &is_candidate)
            .into_iter()
            .filter_map(|record| {
                source.find_root_path(&record).map(|root_path| ApplicationDescriptor {
                    canonical_name: record.canonical_name(),
                    root_path,
                })
            })
            .collect()
    }
}

/// Rejects a missing or blank argument and returns it without surrounding whitespace.
fn require_argument<'a>(argument: &'static str, value: &'a str) -> Result<&'a str, ResolveError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::NullArgument {
            argument,
        });
    }
    Ok(trimmed)
}
