// system-tests/tests/suites/containers.rs
// =============================================================================
// Module: Container Tests
// Description: Run the hook against a deployment started by testcontainers.
// Purpose: Confirm container provisioning reports a reachable address.
// Dependencies: system-tests helpers, docker
// =============================================================================

//! Requires `RESTBIND_SYSTEM_TEST_ALLOW_DOCKER=1` and a
//! `RESTBIND_SYSTEM_TEST_CONFIG` file whose `[deployment]` uses container
//! mode; otherwise the suite logs a skip and passes.

use std::time::Duration;

use restbind_config::DeploymentMode;
use restbind_core::DeploymentProvisioner;
use restbind_core::TestClass;
use restbind_rest::RestProxy;
use system_tests::config::SystemTestConfig;
use tracing::info;

use crate::helpers::harness::shop_hook;
use crate::helpers::logging::init_tracing;
use crate::helpers::shop::greeting::GreetingClient;
use crate::helpers::timeouts::resolve_timeout;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn container_deployment_binds_clients() -> TestResult {
    init_tracing();
    let env = SystemTestConfig::load()?;
    if !env.allow_docker {
        info!("skipping container suite: docker not allowed");
        return Ok(());
    }
    let mut config = env.harness_config()?;
    if config.deployment.mode != DeploymentMode::Container {
        info!("skipping container suite: deployment is not in container mode");
        return Ok(());
    }
    let startup = resolve_timeout(Duration::from_secs(120));
    config.deployment.startup_timeout_ms = u64::try_from(startup.as_millis())?;

    let (mut hook, _) = shop_hook(&config)?;
    let test_class =
        TestClass::<RestProxy>::new("ContainerIT").inject::<GreetingClient>("greeting");
    let bound = hook.before_test_class(&test_class)?;

    let greeting = bound.get::<GreetingClient>("greeting").ok_or("greeting not bound")?;
    let address = greeting.0.base_address().as_str();
    assert!(address.starts_with("http://"), "unexpected address {address}");
    assert!(address.ends_with("/greeting"), "unexpected address {address}");

    let second = TestClass::<RestProxy>::new("SecondContainerIT")
        .inject::<GreetingClient>("greeting");
    let second_bound = hook.before_test_class(&second)?;
    let second_greeting =
        second_bound.get::<GreetingClient>("greeting").ok_or("greeting not bound")?;
    assert_eq!(second_greeting.0.base_address().as_str(), address);
    assert!(hook.provisioner().application_url().is_ok());
    Ok(())
}
