// system-tests/tests/helpers/shop.rs
// ============================================================================
// Module: Shop Clients
// Description: Typed client interfaces for the stub shop application.
// Purpose: Give suites realistic resources to declare and call.
// Dependencies: restbind-core, restbind-rest, serde
// ============================================================================

//! ## Overview
//! Each submodule is one resource module. `greeting` and `orders` each hold
//! an application descriptor; `inventory` holds none, so it resolves through
//! the widened `shop` scope.

use serde::Deserialize;
use serde::Serialize;

/// Greeting payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

/// Order creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub item: String,
    pub quantity: u32,
}

/// Stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub item: String,
    pub quantity: u32,
}

pub mod greeting {
    use restbind_core::Resource;
    use restbind_rest::RestError;
    use restbind_rest::RestProxy;

    use super::Greeting;

    /// Client for the greeting application.
    pub struct GreetingClient(pub RestProxy);

    impl Resource<RestProxy> for GreetingClient {
        fn from_proxy(proxy: RestProxy) -> Self {
            Self(proxy)
        }
    }

    impl GreetingClient {
        pub fn hello(&self) -> Result<Greeting, RestError> {
            self.0.get_json("hello")
        }

        pub fn ping(&self) -> Result<String, RestError> {
            self.0.get_text("ping")
        }
    }
}

pub mod orders {
    use restbind_core::Resource;
    use restbind_rest::RestError;
    use restbind_rest::RestProxy;

    use super::NewOrder;
    use super::Order;

    /// Client for the order resource of the shop application.
    pub struct OrderClient(pub RestProxy);

    impl Resource<RestProxy> for OrderClient {
        fn from_proxy(proxy: RestProxy) -> Self {
            Self(proxy)
        }
    }

    impl OrderClient {
        pub fn place(&self, order: &NewOrder) -> Result<Order, RestError> {
            self.0.post_json("orders", order)
        }

        pub fn fetch(&self, id: u64) -> Result<Order, RestError> {
            self.0.get_json(&format!("orders/{id}"))
        }

        pub fn update(&self, id: u64, order: &NewOrder) -> Result<Order, RestError> {
            self.0.put_json(&format!("orders/{id}"), order)
        }

        pub fn cancel(&self, id: u64) -> Result<(), RestError> {
            self.0.delete(&format!("orders/{id}"))
        }
    }
}

pub mod inventory {
    use restbind_core::Resource;
    use restbind_rest::RestProxy;

    /// Client with no descriptor of its own.
    pub struct InventoryClient(pub RestProxy);

    impl Resource<RestProxy> for InventoryClient {
        fn from_proxy(proxy: RestProxy) -> Self {
            Self(proxy)
        }
    }
}
