// crates/restbind-rest/src/lib.rs
// ============================================================================
// Module: Restbind REST Library
// Description: Blocking HTTP proxy runtime for typed client interfaces.
// Purpose: Turn resolved base addresses into callable REST proxies.
// Dependencies: restbind-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`RestRuntime`] implements the core proxy runtime seam over a blocking
//! `reqwest` client. Each [`RestProxy`] is bound to one base address and
//! carries the provider list it was built with; calls whose media type has
//! no attached provider fail before any request is sent.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod proxy;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use proxy::MAX_RESPONSE_BYTES;
pub use proxy::RestError;
pub use proxy::RestProxy;
pub use runtime::DEFAULT_REQUEST_TIMEOUT;
pub use runtime::RestRuntime;
