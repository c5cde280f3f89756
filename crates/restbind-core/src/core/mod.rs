// crates/restbind-core/src/core/mod.rs
// ============================================================================
// Module: Restbind Core Types
// Description: Data model for descriptors, addresses, providers, and bindings.
// Purpose: Provide stable types shared by the resolver, factory, and binder.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types describe what the harness knows about the application-under-test
//! (type records and descriptors), where it lives (scan scopes and resolved
//! base addresses), and what a test class asks for (injection points and the
//! bound clients handed back to it).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod address;
pub mod descriptor;
pub mod diagnostics;
pub mod providers;
pub mod resource;
pub mod test_class;

#[cfg(test)]
mod address_tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use address::ResolvedBaseAddress;
pub use address::join_path;
pub use descriptor::ApplicationDescriptor;
pub use descriptor::MODULE_SEPARATOR;
pub use descriptor::ScanScope;
pub use descriptor::TypeRecord;
pub use diagnostics::Diagnostic;
pub use diagnostics::DiagnosticLevel;
pub use providers::MediaProvider;
pub use providers::ProviderList;
pub use providers::UnknownProvider;
pub use resource::Resource;
pub use resource::ResourceType;
pub use test_class::BoundClients;
pub use test_class::FieldBinding;
pub use test_class::FieldModifiers;
pub use test_class::FieldScope;
pub use test_class::InjectionPoint;
pub use test_class::TestClass;
pub use test_class::Visibility;
