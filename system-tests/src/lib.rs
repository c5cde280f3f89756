// system-tests/src/lib.rs
// ============================================================================
// Module: Restbind System Tests Library
// Description: Shared configuration for end-to-end harness scenarios.
// Purpose: Provide common utilities for Restbind system-test binaries.
// Dependencies: restbind-config
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the Restbind system-tests
//! binaries in `system-tests/tests`. Suites run a real lifecycle hook against
//! a local stub application, an external deployment named by the
//! environment, or a container when docker is allowed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
