mod common;

use serde_json::{json, Value};

use propchain_wallet_adapters::{Eip1193Adapter, RuntimeProfile, WalletAdapterConfig};
use propchain_wallet_core::{ProviderLocator, ProviderPort, RpcMethod};

use common::{proxy_config, spawn_rpc_server, ACCOUNT_A};

fn wallet_backend(method: &str, params: &Value) -> (u16, Value) {
    match method {
        "eth_requestAccounts" | "eth_accounts" => (200, json!([ACCOUNT_A])),
        "eth_getBalance" if params[1] == json!("latest") => (200, json!("0xDE0B6B3A7640000")),
        _ => (
            200,
            json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": -32601, "message": "method not found" } }),
        ),
    }
}

#[tokio::test]
async fn proxy_forwards_json_rpc_requests() {
    let (base_url, calls) = spawn_rpc_server(wallet_backend);
    let adapter = Eip1193Adapter::with_config(proxy_config(&base_url));
    assert_eq!(adapter.mode_label(), "proxy");

    let provider = adapter.locate().expect("proxy provider");
    let accounts = provider
        .request(RpcMethod::RequestAccounts)
        .await
        .expect("request accounts");
    assert_eq!(accounts, json!([ACCOUNT_A]));

    let balance = provider
        .request(RpcMethod::balance_of(ACCOUNT_A))
        .await
        .expect("get balance");
    assert_eq!(balance, json!("0xDE0B6B3A7640000"));

    let calls = calls.lock().expect("calls lock");
    assert_eq!(*calls, vec!["eth_requestAccounts", "eth_getBalance"]);
}

#[tokio::test]
async fn proxy_maps_rpc_error_to_code_and_message() {
    let (base_url, _calls) = spawn_rpc_server(|_, _| {
        (
            200,
            json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": 4001, "message": "User rejected the request." } }),
        )
    });
    let provider = Eip1193Adapter::with_config(proxy_config(&base_url))
        .locate()
        .expect("proxy provider");

    let err = provider
        .request(RpcMethod::RequestAccounts)
        .await
        .expect_err("rejected");
    assert!(err.is_user_rejected());
    assert_eq!(err.message.as_deref(), Some("User rejected the request."));
}

#[tokio::test]
async fn proxy_reports_http_failures_without_code() {
    let (base_url, _calls) = spawn_rpc_server(|_, _| (502, json!({ "detail": "bad gateway" })));
    let provider = Eip1193Adapter::with_config(proxy_config(&base_url))
        .locate()
        .expect("proxy provider");

    let err = provider
        .request(RpcMethod::Accounts)
        .await
        .expect_err("http failure");
    assert_eq!(err.code, None);
    assert!(err
        .message
        .as_deref()
        .is_some_and(|m| m.contains("502")));
}

#[test]
fn proxy_has_no_push_events() {
    let (base_url, _calls) = spawn_rpc_server(wallet_backend);
    let provider = Eip1193Adapter::with_config(proxy_config(&base_url))
        .locate()
        .expect("proxy provider");
    let subscription = provider
        .subscribe_accounts_changed(Box::new(|_: Vec<String>| {}))
        .expect("subscribe");
    subscription.unsubscribe();
}

#[test]
fn production_profile_without_runtime_reports_no_provider() {
    let adapter = Eip1193Adapter::with_config(WalletAdapterConfig {
        runtime_profile: RuntimeProfile::Production,
        ..WalletAdapterConfig::default()
    });
    assert!(!adapter.is_available());
    assert!(adapter
        .disabled_reason()
        .is_some_and(|r| r.contains("production")));
}

#[test]
fn production_container_reports_metamask_not_detected() {
    let adapter = Eip1193Adapter::with_config(WalletAdapterConfig {
        runtime_profile: RuntimeProfile::Production,
        ..WalletAdapterConfig::default()
    });
    let mut page = common::page_with(adapter);
    page.settle();
    assert!(!page.wallet.is_provider_available());

    let wallet = page.wallet.clone();
    page.pool.run_until(wallet.connect_metamask());
    assert_eq!(
        page.wallet.snapshot().error.as_deref(),
        Some("MetaMask not detected")
    );
}
