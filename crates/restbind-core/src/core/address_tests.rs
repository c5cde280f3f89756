// crates/restbind-core/src/core/address_tests.rs
// ============================================================================
// Module: Resolved Base Address Tests
// Description: Unit and property coverage for boundary separator joins.
// Purpose: Ensure joins keep exactly one separator and lose no content.
// Dependencies: proptest
// ============================================================================

//! ## Overview
//! Covers the four boundary cases explicitly and checks the single-separator
//! invariant over generated fragments.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;

use super::ResolvedBaseAddress;
use super::join_path;

#[test]
fn join_collapses_double_separator() {
    assert_eq!(join_path("/app/", "/api"), "/app/api");
}

#[test]
fn join_inserts_missing_separator() {
    assert_eq!(join_path("/app", "api"), "/app/api");
}

#[test]
fn join_keeps_single_separator_from_either_side() {
    assert_eq!(join_path("/app/", "api"), "/app/api");
    assert_eq!(join_path("/app", "/api"), "/app/api");
}

#[test]
fn join_with_root_path_yields_trailing_separator() {
    assert_eq!(join_path("http://host:9080", "/"), "http://host:9080/");
    assert_eq!(join_path("http://host:9080/", "/"), "http://host:9080/");
    assert_eq!(join_path("http://host:9080", ""), "http://host:9080/");
}

#[test]
fn join_only_touches_the_boundary() {
    assert_eq!(join_path("http://host//", "/a//b"), "http://host//a//b");
}

#[test]
fn resolved_address_endpoint_joins_relative_paths() {
    let address = ResolvedBaseAddress::join("http://localhost:32768", "/greeting");
    assert_eq!(address, "http://localhost:32768/greeting");
    assert_eq!(address.endpoint("hello"), "http://localhost:32768/greeting/hello");
    assert_eq!(address.endpoint("/hello"), "http://localhost:32768/greeting/hello");
}

proptest! {
    #[test]
    fn join_has_exactly_one_boundary_separator(
        head in "[a-z0-9:.]{1,16}",
        tail in "[a-z0-9.]{1,16}",
        head_sep in any::<bool>(),
        tail_sep in any::<bool>(),
    ) {
        let first = if head_sep { format!("{head}/") } else { head.clone() };
        let second = if tail_sep { format!("/{tail}") } else { tail.clone() };
        let joined = join_path(&first, &second);
        prop_assert_eq!(joined, format!("{head}/{tail}"));
    }
}
