// system-tests/tests/helpers/app_stub.rs
// ============================================================================
// Module: Application Stub
// Description: In-process HTTP stand-in for the application under test.
// Purpose: Give lifecycle suites a real endpoint without docker.
// Dependencies: tiny_http, serde_json
// ============================================================================

//! ## Overview
//! Serves the greeting application under `/greeting` and the shop
//! application under `/shop`, plus `/health`. Every request line is recorded
//! so suites can assert on what proxies actually sent.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;

use serde_json::json;
use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

use super::shop::NewOrder;
use super::shop::Order;

/// Running stub application.
pub struct AppStub {
    base_url: String,
    server: Arc<Server>,
    handle: Option<JoinHandle<()>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl AppStub {
    /// Binds an ephemeral port and starts serving.
    pub fn start() -> Result<Self, String> {
        let server = Server::http("127.0.0.1:0").map_err(|err| err.to_string())?;
        let base_url = format!("http://{}", server.server_addr());
        let server = Arc::new(server);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            thread::spawn(move || serve(&server, &requests))
        };
        Ok(Self {
            base_url,
            server,
            handle: Some(handle),
            requests,
        })
    }

    /// Returns `http://127.0.0.1:{port}`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request lines seen so far, e.g. `GET /greeting/hello`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

impl Drop for AppStub {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve(server: &Server, requests: &Mutex<Vec<String>>) {
    let mut orders: BTreeMap<u64, Order> = BTreeMap::new();
    for mut request in server.incoming_requests() {
        let line = format!("{} {}", request.method(), request.url());
        if let Ok(mut seen) = requests.lock() {
            seen.push(line);
        }
        let mut body = String::new();
        let _ = request.as_reader().read_to_string(&mut body);
        let path = request.url().to_string();
        let method = request.method().clone();
        let (status, content_type, payload) = route(&method, &path, &body, &mut orders);
        respond(request, status, content_type, payload);
    }
}

fn route(
    method: &Method,
    path: &str,
    body: &str,
    orders: &mut BTreeMap<u64, Order>,
) -> (u16, &'static str, String) {
    const JSON: &str = "application/json";
    const TEXT: &str = "text/plain";
    match (method, path) {
        (Method::Get, "/health") => (200, TEXT, "ok".to_string()),
        (Method::Get, "/greeting/hello") => (200, JSON, json!({"message": "hello"}).to_string()),
        (Method::Get, "/greeting/ping") => (200, TEXT, "pong".to_string()),
        (Method::Post, "/shop/orders") => match serde_json::from_str::<NewOrder>(body) {
            Ok(new_order) => {
                let id = orders.keys().next_back().map_or(1, |last| last + 1);
                let order = Order {
                    id,
                    item: new_order.item,
                    quantity: new_order.quantity,
                };
                let payload = serde_json::to_string(&order).unwrap_or_default();
                orders.insert(id, order);
                (201, JSON, payload)
            }
            Err(err) => (400, TEXT, err.to_string()),
        },
        (_, path) if path.starts_with("/shop/orders/") => {
            let Ok(id) = path["/shop/orders/".len()..].parse::<u64>() else {
                return (400, TEXT, "bad order id".to_string());
            };
            match method {
                Method::Get => orders.get(&id).map_or_else(
                    || (404, TEXT, "no such order".to_string()),
                    |order| (200, JSON, serde_json::to_string(order).unwrap_or_default()),
                ),
                Method::Put => match (orders.get_mut(&id), serde_json::from_str::<NewOrder>(body)) {
                    (Some(order), Ok(update)) => {
                        order.item = update.item;
                        order.quantity = update.quantity;
                        (200, JSON, serde_json::to_string(order).unwrap_or_default())
                    }
                    (None, _) => (404, TEXT, "no such order".to_string()),
                    (_, Err(err)) => (400, TEXT, err.to_string()),
                },
                Method::Delete => match orders.remove(&id) {
                    Some(_) => (204, TEXT, String::new()),
                    None => (404, TEXT, "no such order".to_string()),
                },
                _ => (405, TEXT, "method not allowed".to_string()),
            }
        }
        _ => (404, TEXT, "not found".to_string()),
    }
}

fn respond(request: Request, status: u16, content_type: &str, payload: String) {
    let mut response = Response::from_string(payload).with_status_code(status);
    if let Ok(header) = Header::from_bytes("Content-Type", content_type) {
        response = response.with_header(header);
    }
    let _ = request.respond(response);
}
