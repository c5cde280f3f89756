// crates/restbind-core/src/lib.rs
// ============================================================================
// Module: Restbind Core Library
// Description: Public API surface for the Restbind test-harness core.
// Purpose: Expose base-address resolution, client binding, and lifecycle hooks.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Restbind core discovers where the application-under-test is routed, builds
//! typed proxy clients bound to that address, and hands them to a test class
//! before its tests run. Deployment, transport, and metadata discovery are
//! reached through explicit interfaces so adapters can be swapped without
//! touching the resolution or binding rules.
//! Invariants:
//! - Resolution never aborts on missing or ambiguous descriptors.
//! - Binding is fail-fast on the first ineligible field.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::DeploymentProvisioner;
pub use interfaces::MetadataSource;
pub use interfaces::NoopReporter;
pub use interfaces::ProvisionError;
pub use interfaces::ProxyError;
pub use interfaces::ProxyRuntime;
pub use interfaces::Reporter;
pub use runtime::BindError;
pub use runtime::DEFAULT_ROOT_PATH;
pub use runtime::DEFAULT_WIDEN_DEPTH;
pub use runtime::ClientFactory;
pub use runtime::DescriptorRegistry;
pub use runtime::FactoryError;
pub use runtime::FieldBinder;
pub use runtime::HookError;
pub use runtime::LifecycleHook;
pub use runtime::PathResolver;
pub use runtime::RecordingReporter;
pub use runtime::RegistryError;
pub use runtime::ResolveError;
pub use runtime::ScanPolicy;
pub use runtime::TracingReporter;
