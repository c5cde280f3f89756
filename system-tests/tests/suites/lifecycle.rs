// system-tests/tests/suites/lifecycle.rs
// =============================================================================
// Module: Lifecycle Tests
// Description: Run the full per-class hook against a live HTTP application.
// Purpose: Confirm provisioning, resolution, and binding compose end to end.
// Dependencies: system-tests helpers
// =============================================================================

use std::sync::OnceLock;

use restbind_core::BindError;
use restbind_core::BoundClients;
use restbind_core::DiagnosticLevel;
use restbind_core::FieldModifiers;
use restbind_core::FieldScope;
use restbind_core::HookError;
use restbind_core::TestClass;
use restbind_core::Visibility;
use restbind_rest::RestProxy;

use crate::helpers::app_stub::AppStub;
use crate::helpers::harness::external_config;
use crate::helpers::harness::shop_hook;
use crate::helpers::shop::NewOrder;
use crate::helpers::shop::greeting::GreetingClient;
use crate::helpers::shop::orders::OrderClient;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Stub application and the clients bound for the `ShopIT` class.
struct ShopIt {
    app: AppStub,
    clients: BoundClients,
}

/// Prepares `ShopIT` once for the whole binary, like class-level injection.
fn shop_it() -> Result<&'static ShopIt, String> {
    static SHOP_IT: OnceLock<Result<ShopIt, String>> = OnceLock::new();
    SHOP_IT
        .get_or_init(|| {
            let app = AppStub::start()?;
            let (mut hook, _) = shop_hook(&external_config(app.base_url()))?;
            let test_class = TestClass::<RestProxy>::new("ShopIT")
                .inject::<GreetingClient>("greeting")
                .inject::<OrderClient>("orders");
            let clients = hook.before_test_class(&test_class).map_err(|err| err.to_string())?;
            Ok(ShopIt {
                app,
                clients,
            })
        })
        .as_ref()
        .map_err(Clone::clone)
}

#[test]
fn bound_clients_resolve_each_application_root() -> TestResult {
    let shop = shop_it()?;
    let greeting = shop.clients.get::<GreetingClient>("greeting").ok_or("greeting not bound")?;
    let orders = shop.clients.get::<OrderClient>("orders").ok_or("orders not bound")?;

    assert_eq!(greeting.0.base_address().as_str(), format!("{}/greeting", shop.app.base_url()));
    assert_eq!(orders.0.base_address().as_str(), format!("{}/shop", shop.app.base_url()));
    assert_eq!(shop.clients.fields().collect::<Vec<_>>(), vec!["greeting", "orders"]);
    Ok(())
}

#[test]
fn greeting_client_calls_reach_the_application() -> TestResult {
    let shop = shop_it()?;
    let greeting = shop.clients.get::<GreetingClient>("greeting").ok_or("greeting not bound")?;

    assert_eq!(greeting.hello()?.message, "hello");
    assert_eq!(greeting.ping()?, "pong");
    let seen = shop.app.requests();
    assert!(seen.iter().any(|line| line == "GET /greeting/hello"));
    assert!(seen.iter().any(|line| line == "GET /greeting/ping"));
    Ok(())
}

#[test]
fn order_client_round_trips_through_the_application() -> TestResult {
    let shop = shop_it()?;
    let orders = shop.clients.get::<OrderClient>("orders").ok_or("orders not bound")?;

    let placed = orders.place(&NewOrder {
        item: "widget".to_string(),
        quantity: 2,
    })?;
    assert_eq!(orders.fetch(placed.id)?, placed);

    let updated = orders.update(
        placed.id,
        &NewOrder {
            item: "widget".to_string(),
            quantity: 5,
        },
    )?;
    assert_eq!(updated.quantity, 5);

    orders.cancel(placed.id)?;
    let err = orders.fetch(placed.id).err().ok_or("cancelled order still present")?;
    assert_eq!(err.status(), Some(404));
    Ok(())
}

#[test]
fn single_field_binds_to_expected_address() -> TestResult {
    let app = AppStub::start()?;
    let (mut hook, reporter) = shop_hook(&external_config(app.base_url()))?;
    let test_class = TestClass::<RestProxy>::new("GreetingIT").inject::<GreetingClient>("client");

    let mut bound = hook.before_test_class(&test_class)?;

    let client = bound.take::<GreetingClient>("client").ok_or("client not bound")?;
    assert_eq!(client.0.base_address().as_str(), format!("{}/greeting", app.base_url()));
    assert!(hook.is_prepared("GreetingIT"));
    assert!(reporter.at_level(DiagnosticLevel::Warn).is_empty());
    Ok(())
}

#[test]
fn class_is_prepared_only_once() -> TestResult {
    let app = AppStub::start()?;
    let (mut hook, _) = shop_hook(&external_config(app.base_url()))?;
    let test_class = TestClass::<RestProxy>::new("GreetingIT").inject::<GreetingClient>("client");

    hook.before_test_class(&test_class)?;
    let err = hook.before_test_class(&test_class).err().ok_or("second preparation succeeded")?;

    assert!(matches!(err, HookError::AlreadyPrepared(name) if name == "GreetingIT"));
    Ok(())
}

#[test]
fn ineligible_field_aborts_binding() -> TestResult {
    let app = AppStub::start()?;
    let (mut hook, _) = shop_hook(&external_config(app.base_url()))?;
    let instance_field = FieldModifiers {
        visibility: Visibility::Public,
        scope: FieldScope::Instance,
        constant: false,
    };
    let test_class = TestClass::<RestProxy>::new("BrokenIT")
        .inject::<GreetingClient>("greeting")
        .inject_with::<OrderClient>("orders", instance_field);

    let err = hook.before_test_class(&test_class).err().ok_or("binding succeeded")?;

    match err {
        HookError::Bind(BindError::Configuration {
            test_class,
            field,
        }) => {
            assert_eq!(test_class, "BrokenIT");
            assert_eq!(field, "orders");
        }
        other => return Err(format!("unexpected error: {other}").into()),
    }
    assert!(!hook.is_prepared("BrokenIT"));
    Ok(())
}

#[test]
fn missing_deployment_url_fails_before_binding() -> TestResult {
    let mut config = external_config("http://unused.invalid");
    config.deployment.url = None;
    let (mut hook, reporter) = shop_hook(&config)?;
    let test_class = TestClass::<RestProxy>::new("GreetingIT").inject::<GreetingClient>("client");

    let err = hook.before_test_class(&test_class).err().ok_or("preparation succeeded")?;

    assert!(matches!(err, HookError::Provision(_)));
    assert!(reporter.entries().is_empty());
    Ok(())
}

