// crates/restbind-containers/src/readiness.rs
// ============================================================================
// Module: Readiness Probes
// Description: HTTP readiness polling for started deployments.
// Purpose: Wait for the application without arbitrary sleeps.
// Dependencies: reqwest, restbind-core
// ============================================================================

//! ## Overview
//! HTTP readiness polling used by the provisioners to wait for a started
//! deployment to answer before tests run.

use std::thread;
use std::time::Duration;
use std::time::Instant;

use reqwest::blocking::Client;
use restbind_core::ProvisionError;
use tracing::debug;

/// Delay between readiness attempts.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls `url` until it answers with a success status or `timeout` expires.
///
/// # Errors
///
/// Returns [`ProvisionError::Start`] when the deadline passes first.
pub fn wait_for_http_ready(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<(), ProvisionError> {
    let start = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        match probe(client, url) {
            Ok(()) => {
                debug!(target: "restbind::containers", url, attempts, "deployment ready");
                return Ok(());
            }
            Err(err) => {
                if start.elapsed() > timeout {
                    return Err(ProvisionError::Start(format!(
                        "readiness timeout for {url} after {attempts} attempts: {err}"
                    )));
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

/// Sends one readiness request.
fn probe(client: &Client, url: &str) -> Result<(), String> {
    let response = client.get(url).send().map_err(|err| err.to_string())?;
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(format!("status {status}"))
    }
}
