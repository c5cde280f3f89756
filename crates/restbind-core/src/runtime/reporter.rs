// crates/restbind-core/src/runtime/reporter.rs
// ============================================================================
// Module: Diagnostic Reporters
// Description: Tracing-backed and in-memory diagnostic sinks.
// Purpose: Route harness diagnostics to structured logs or test assertions.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! [`TracingReporter`] forwards diagnostics to `tracing` under the `restbind`
//! target. [`RecordingReporter`] keeps them in memory so tests can assert on
//! what the harness reported.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::PoisonError;

use crate::core::Diagnostic;
use crate::core::DiagnosticLevel;
use crate::interfaces::Reporter;

// ============================================================================
// SECTION: Tracing Reporter
// ============================================================================

/// Reporter that emits diagnostics as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        let kind = diagnostic.kind();
        match diagnostic.level() {
            DiagnosticLevel::Debug => {
                tracing::debug!(target: "restbind", kind, "{diagnostic}");
            }
            DiagnosticLevel::Info => {
                tracing::info!(target: "restbind", kind, "{diagnostic}");
            }
            DiagnosticLevel::Warn => {
                tracing::warn!(target: "restbind", kind, "{diagnostic}");
            }
        }
    }
}

// ============================================================================
// SECTION: Recording Reporter
// ============================================================================

/// Reporter that records diagnostics in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    /// Diagnostics in report order.
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingReporter {
    /// Creates an empty recording reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded diagnostics.
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns recorded diagnostics at `level`.
    #[must_use]
    pub fn at_level(&self, level: DiagnosticLevel) -> Vec<Diagnostic> {
        self.entries().into_iter().filter(|entry| entry.level() == level).collect()
    }

    /// Clears recorded diagnostics.
    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(diagnostic.clone());
    }
}
