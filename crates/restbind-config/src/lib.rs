// crates/restbind-config/src/lib.rs
// ============================================================================
// Module: Restbind Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for restbind.toml semantics.
// Dependencies: restbind-core, serde, toml, url
// ============================================================================

//! ## Overview
//! `restbind-config` defines the configuration model for the test harness:
//! descriptor scan policy, client provider list, and deployment settings.
//! Loading is fail-closed: oversized, non-UTF-8, unparsable, or inconsistent
//! files are rejected before any deployment starts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
