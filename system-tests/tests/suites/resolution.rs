// system-tests/tests/suites/resolution.rs
// =============================================================================
// Module: Resolution Tests
// Description: Descriptor selection against the shop module layout.
// Purpose: Confirm widening, disambiguation, and fallback through a real hook.
// Dependencies: system-tests helpers
// =============================================================================

use restbind_config::RestbindConfig;
use restbind_core::DescriptorRegistry;
use restbind_core::Diagnostic;
use restbind_core::DiagnosticLevel;
use restbind_core::Resource;
use restbind_core::TestClass;
use restbind_rest::RestProxy;

use crate::helpers::app_stub::AppStub;
use crate::helpers::harness::external_config;
use crate::helpers::harness::hook_with_registry;
use crate::helpers::harness::module_of;
use crate::helpers::harness::shop_hook;
use crate::helpers::shop::greeting::GreetingClient;
use crate::helpers::shop::inventory::InventoryClient;
use crate::helpers::shop::orders::OrderClient;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn widened_scope_breaks_ties_by_canonical_name() -> TestResult {
    let app = AppStub::start()?;
    let (mut hook, reporter) = shop_hook(&external_config(app.base_url()))?;
    let test_class =
        TestClass::<RestProxy>::new("InventoryIT").inject::<InventoryClient>("inventory");

    let bound = hook.before_test_class(&test_class)?;

    let inventory = bound.get::<InventoryClient>("inventory").ok_or("inventory not bound")?;
    assert_eq!(inventory.0.base_address().as_str(), format!("{}/greeting", app.base_url()));
    let warnings = reporter.at_level(DiagnosticLevel::Warn);
    let [Diagnostic::AmbiguousApplication {
        candidates,
        selected,
        ..
    }] = warnings.as_slice()
    else {
        return Err(format!("expected one ambiguity warning, got {}", warnings.len()).into());
    };
    let greeting_app = format!("{}::GreetingApplication", module_of::<GreetingClient>());
    let shop_app = format!("{}::ShopApplication", module_of::<OrderClient>());
    assert_eq!(candidates, &vec![greeting_app.clone(), shop_app]);
    assert_eq!(selected, &greeting_app);
    Ok(())
}

#[test]
fn repeated_preparation_selects_the_same_descriptor() -> TestResult {
    let app = AppStub::start()?;
    let config = external_config(app.base_url());
    let mut addresses = Vec::new();
    for round in 0..3 {
        let (mut hook, _) = shop_hook(&config)?;
        let test_class = TestClass::<RestProxy>::new(format!("InventoryIT{round}"))
            .inject::<InventoryClient>("inventory");
        let bound = hook.before_test_class(&test_class)?;
        let inventory = bound.get::<InventoryClient>("inventory").ok_or("inventory not bound")?;
        addresses.push(inventory.0.base_address().to_string());
    }
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    Ok(())
}

#[test]
fn empty_registry_falls_back_to_root_path() -> TestResult {
    let app = AppStub::start()?;
    let (mut hook, reporter) =
        hook_with_registry(&external_config(app.base_url()), DescriptorRegistry::new())?;
    let test_class = TestClass::<RestProxy>::new("HealthIT").inject::<GreetingClient>("client");

    let bound = hook.before_test_class(&test_class)?;

    let client = bound.get::<GreetingClient>("client").ok_or("client not bound")?;
    assert_eq!(client.0.base_address().as_str(), format!("{}/", app.base_url()));
    assert!(reporter.at_level(DiagnosticLevel::Info).iter().any(|entry| matches!(
        entry,
        Diagnostic::NoApplicationFound { resource, .. }
            if *resource == GreetingClient::resource_type().canonical_name()
    )));
    Ok(())
}

#[test]
fn configured_scope_overrides_resource_module() -> TestResult {
    let app = AppStub::start()?;
    let mut config: RestbindConfig = external_config(app.base_url());
    config.resolution.scope = Some(module_of::<OrderClient>());
    let (mut hook, _) = shop_hook(&config)?;
    let test_class = TestClass::<RestProxy>::new("ScopedIT").inject::<GreetingClient>("client");

    let bound = hook.before_test_class(&test_class)?;

    let client = bound.get::<GreetingClient>("client").ok_or("client not bound")?;
    assert_eq!(client.0.base_address().as_str(), format!("{}/shop", app.base_url()));
    Ok(())
}
