// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Hook Harness
// Description: Wires registry, resolver, factory, and provisioner together.
// Purpose: Build lifecycle hooks the way a test runner integration would.
// Dependencies: restbind-core, restbind-config, restbind-rest, restbind-containers
// ============================================================================

use std::sync::Arc;

use restbind_config::RestbindConfig;
use restbind_containers::ConfiguredProvisioner;
use restbind_containers::provisioner_from_config;
use restbind_core::ClientFactory;
use restbind_core::DescriptorRegistry;
use restbind_core::Diagnostic;
use restbind_core::LifecycleHook;
use restbind_core::PathResolver;
use restbind_core::RecordingReporter;
use restbind_core::Reporter;
use restbind_core::Resource;
use restbind_core::TracingReporter;
use restbind_core::TypeRecord;
use restbind_rest::RestProxy;
use restbind_rest::RestRuntime;

use super::logging::init_tracing;
use super::shop::greeting::GreetingClient;
use super::shop::orders::OrderClient;

/// Hook type used by the suites.
pub type ShopHook = LifecycleHook<ConfiguredProvisioner, RestRuntime>;

/// Forwards diagnostics to tracing and keeps a copy for assertions.
pub struct TeeReporter {
    tracing: TracingReporter,
    recorded: Arc<RecordingReporter>,
}

impl Reporter for TeeReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        self.tracing.report(diagnostic);
        self.recorded.report(diagnostic);
    }
}

/// Module path of a client resource.
pub fn module_of<T: Resource<RestProxy>>() -> String {
    T::resource_type().module().to_string()
}

/// Registry holding the greeting and shop application descriptors.
pub fn shop_registry() -> Result<DescriptorRegistry, String> {
    DescriptorRegistry::new()
        .with(
            TypeRecord::application(module_of::<GreetingClient>(), "GreetingApplication")
                .with_root_path("/greeting"),
        )
        .and_then(|registry| {
            registry.with(
                TypeRecord::application(module_of::<OrderClient>(), "ShopApplication")
                    .with_root_path("/shop"),
            )
        })
        .and_then(|registry| {
            registry.with(TypeRecord::plain(module_of::<OrderClient>(), "OrderResource"))
        })
        .map_err(|err| err.to_string())
}

/// Builds a hook over `registry` configured by `config`.
pub fn hook_with_registry(
    config: &RestbindConfig,
    registry: DescriptorRegistry,
) -> Result<(ShopHook, Arc<RecordingReporter>), String> {
    init_tracing();
    let recorded = Arc::new(RecordingReporter::new());
    let reporter = Arc::new(TeeReporter {
        tracing: TracingReporter,
        recorded: Arc::clone(&recorded),
    });
    let resolver = PathResolver::new(Arc::new(registry), reporter)
        .with_policy(config.resolution.scan_policy());
    let runtime =
        RestRuntime::with_timeout(config.client.timeout()).map_err(|err| err.to_string())?;
    let providers = config.client.provider_list().map_err(|err| err.to_string())?;
    let factory = ClientFactory::new(runtime, resolver).with_providers(providers);
    let provisioner = provisioner_from_config(&config.deployment);
    Ok((LifecycleHook::new(provisioner, factory), recorded))
}

/// Builds a hook over the shop registry.
pub fn shop_hook(config: &RestbindConfig) -> Result<(ShopHook, Arc<RecordingReporter>), String> {
    hook_with_registry(config, shop_registry()?)
}

/// Default configuration pointed at `url`, with JSON and text providers.
pub fn external_config(url: &str) -> RestbindConfig {
    let mut config = RestbindConfig::default();
    config.deployment.url = Some(url.to_string());
    config.client.providers = vec!["json".to_string(), "text".to_string()];
    config
}
