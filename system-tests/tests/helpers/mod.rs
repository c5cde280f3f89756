// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Restbind system-tests.
// Purpose: Provide the stub application, typed clients, and hook wiring.
// Dependencies: system-tests, restbind-core, restbind-rest, restbind-containers
// ============================================================================

//! ## Overview
//! Shared helpers for Restbind system-tests.
//! Invariants:
//! - System-test execution is deterministic and fail-closed.
//! - Every suite runs against a fresh stub application unless the environment
//!   names an external deployment.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod app_stub;
pub mod harness;
pub mod logging;
pub mod shop;
pub mod timeouts;
