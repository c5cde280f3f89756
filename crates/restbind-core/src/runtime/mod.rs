// crates/restbind-core/src/runtime/mod.rs
// ============================================================================
// Module: Restbind Runtime
// Description: Resolution, proxy construction, field binding, and lifecycle.
// Purpose: Implement the per-test-class setup pipeline over the interfaces.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! Runtime modules implement the setup pipeline: [`PathResolver`] derives a
//! base address, [`ClientFactory`] builds proxies against it,
//! [`FieldBinder`] assigns them to declared fields, and [`LifecycleHook`]
//! runs the whole sequence once per test class.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod binder;
pub mod factory;
pub mod lifecycle;
pub mod registry;
pub mod reporter;
pub mod resolver;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use binder::BindError;
pub use binder::FieldBinder;
pub use factory::ClientFactory;
pub use factory::FactoryError;
pub use lifecycle::HookError;
pub use lifecycle::LifecycleHook;
pub use registry::DescriptorRegistry;
pub use registry::RegistryError;
pub use reporter::RecordingReporter;
pub use reporter::TracingReporter;
pub use resolver::DEFAULT_ROOT_PATH;
pub use resolver::DEFAULT_WIDEN_DEPTH;
pub use resolver::PathResolver;
pub use resolver::ResolveError;
pub use resolver::ScanPolicy;
