#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use futures::executor::LocalPool;
use serde_json::{json, Value};
use tiny_http::{Response, Server, StatusCode};

use propchain_wallet_adapters::{
    DeterministicWallet, Eip1193Adapter, LocalPoolSpawner, WalletAdapterConfig,
};
use propchain_wallet_core::WalletContainer;

pub const ACCOUNT_A: &str = "0x1000000000000000000000000000000000000001";
pub const ACCOUNT_B: &str = "0x2000000000000000000000000000000000000002";

pub type TestWallet = WalletContainer<Eip1193Adapter, LocalPoolSpawner>;

pub struct Page {
    pub pool: LocalPool,
    pub wallet: TestWallet,
}

impl Page {
    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }
}

pub fn page_with(adapter: Eip1193Adapter) -> Page {
    let pool = LocalPool::new();
    let wallet = WalletContainer::new(adapter, LocalPoolSpawner::new(pool.spawner()));
    Page { pool, wallet }
}

pub fn deterministic_page(wallet: DeterministicWallet) -> Page {
    page_with(Eip1193Adapter::deterministic(wallet))
}

pub fn proxy_config(base_url: &str) -> WalletAdapterConfig {
    WalletAdapterConfig {
        eip1193_proxy_url: Some(base_url.to_owned()),
        request_timeout_ms: 5_000,
        ..WalletAdapterConfig::default()
    }
}

/// JSON-RPC endpoint that answers each call with `respond(method, params)`,
/// returned as `(http_status, body)`. Records every method name it receives.
pub fn spawn_rpc_server<F>(respond: F) -> (String, Arc<Mutex<Vec<String>>>)
where
    F: Fn(&str, &Value) -> (u16, Value) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());
    let calls = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&calls);

    thread::spawn(move || {
        for mut req in server.incoming_requests() {
            let mut body = String::new();
            let _ = req.as_reader().read_to_string(&mut body);
            let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let method = request["method"].as_str().unwrap_or_default().to_owned();
            if let Ok(mut g) = seen.lock() {
                g.push(method.clone());
            }

            let (code, payload) = respond(&method, &request["params"]);
            let payload = if code == 200 && payload.get("error").is_none() {
                json!({ "jsonrpc": "2.0", "id": request["id"], "result": payload })
            } else {
                payload
            };
            let response =
                Response::from_string(payload.to_string()).with_status_code(StatusCode(code));
            let _ = req.respond(response);
        }
    });

    (addr, calls)
}
