#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use serde_json::{json, Value};

use propchain_wallet_core::{
    AccountsListener, ProviderError, ProviderLocator, ProviderPort, RpcMethod, Spawner,
    Subscription, WalletContainer,
};

pub const ACCOUNT_A: &str = "0x1000000000000000000000000000000000000001";
pub const ACCOUNT_B: &str = "0x2000000000000000000000000000000000000002";
pub const ONE_ETH_HEX: &str = "0xDE0B6B3A7640000";
pub const TWO_ETH_HEX: &str = "0x1BC16D674EC80000";

#[derive(Clone, Default)]
pub struct FakeProvider {
    inner: Rc<RefCell<FakeState>>,
}

struct FakeState {
    calls: Vec<RpcMethod>,
    request_accounts: Result<Value, ProviderError>,
    authorized_accounts: Result<Value, ProviderError>,
    balances: HashMap<String, Result<Value, ProviderError>>,
    hold_requests: bool,
    pending: Vec<oneshot::Sender<()>>,
    listeners: Vec<(u64, AccountsListener)>,
    next_listener_id: u64,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            request_accounts: Ok(json!([ACCOUNT_A])),
            authorized_accounts: Ok(json!([])),
            balances: HashMap::new(),
            hold_requests: false,
            pending: Vec::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }
}

impl FakeProvider {
    pub fn with_request_accounts(self, result: Result<Value, ProviderError>) -> Self {
        self.inner.borrow_mut().request_accounts = result;
        self
    }

    pub fn with_authorized_accounts(self, result: Result<Value, ProviderError>) -> Self {
        self.inner.borrow_mut().authorized_accounts = result;
        self
    }

    pub fn with_balance(self, address: &str, result: Result<Value, ProviderError>) -> Self {
        self.set_balance(address, result);
        self
    }

    pub fn set_balance(&self, address: &str, result: Result<Value, ProviderError>) {
        self.inner
            .borrow_mut()
            .balances
            .insert(address.to_owned(), result);
    }

    /// Requests stay pending until [`FakeProvider::release_all`].
    pub fn hold_requests(&self, hold: bool) {
        self.inner.borrow_mut().hold_requests = hold;
    }

    pub fn release_all(&self) {
        let pending = std::mem::take(&mut self.inner.borrow_mut().pending);
        for gate in pending {
            let _ = gate.send(());
        }
    }

    pub fn calls(&self) -> Vec<RpcMethod> {
        self.inner.borrow().calls.clone()
    }

    pub fn balance_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RpcMethod::GetBalance { address, .. } => Some(address),
                _ => None,
            })
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn emit_accounts_changed(&self, accounts: &[&str]) {
        let accounts: Vec<String> = accounts.iter().map(|a| (*a).to_owned()).collect();
        let mut listeners = std::mem::take(&mut self.inner.borrow_mut().listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(accounts.clone());
        }
        let mut state = self.inner.borrow_mut();
        listeners.append(&mut state.listeners);
        state.listeners = listeners;
    }
}

impl ProviderPort for FakeProvider {
    async fn request(&self, method: RpcMethod) -> Result<Value, ProviderError> {
        let gate = {
            let mut state = self.inner.borrow_mut();
            state.calls.push(method.clone());
            if state.hold_requests {
                let (tx, rx) = oneshot::channel();
                state.pending.push(tx);
                Some(rx)
            } else {
                None
            }
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let state = self.inner.borrow();
        match &method {
            RpcMethod::RequestAccounts => state.request_accounts.clone(),
            RpcMethod::Accounts => state.authorized_accounts.clone(),
            RpcMethod::GetBalance { address, .. } => state
                .balances
                .get(address)
                .cloned()
                .unwrap_or_else(|| Ok(json!("0x0"))),
        }
    }

    fn subscribe_accounts_changed(
        &self,
        listener: AccountsListener,
    ) -> Result<Subscription, ProviderError> {
        let id = {
            let mut state = self.inner.borrow_mut();
            state.next_listener_id += 1;
            let id = state.next_listener_id;
            state.listeners.push((id, listener));
            id
        };
        let inner = Rc::clone(&self.inner);
        Ok(Subscription::new(move || {
            inner.borrow_mut().listeners.retain(|(x, _)| *x != id);
        }))
    }
}

/// Shared slot, so a test can uninstall the provider mid-session.
#[derive(Clone, Default)]
pub struct FakeLocator {
    provider: Rc<RefCell<Option<FakeProvider>>>,
}

impl FakeLocator {
    pub fn uninstall(&self) {
        self.provider.borrow_mut().take();
    }
}

impl ProviderLocator for FakeLocator {
    type Provider = FakeProvider;

    fn locate(&self) -> Option<FakeProvider> {
        self.provider.borrow().clone()
    }
}

pub struct PoolSpawner(LocalSpawner);

impl Spawner for PoolSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.0.spawn_local(task).expect("local pool accepts tasks");
    }
}

pub type TestWallet = WalletContainer<FakeLocator, PoolSpawner>;

pub struct Harness {
    pub pool: LocalPool,
    pub provider: FakeProvider,
    pub locator: FakeLocator,
    pub wallet: TestWallet,
}

impl Harness {
    /// Runs every spawned task until nothing can make progress.
    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    pub fn spawn(&self, task: impl std::future::Future<Output = ()> + 'static) {
        self.pool
            .spawner()
            .spawn_local(task)
            .expect("local pool accepts tasks");
    }
}

pub fn harness(provider: FakeProvider) -> Harness {
    build(Some(provider))
}

pub fn harness_without_provider() -> Harness {
    build(None)
}

fn build(provider: Option<FakeProvider>) -> Harness {
    let pool = LocalPool::new();
    let locator = FakeLocator {
        provider: Rc::new(RefCell::new(provider.clone())),
    };
    let wallet = WalletContainer::new(locator.clone(), PoolSpawner(pool.spawner()));
    Harness {
        pool,
        provider: provider.unwrap_or_default(),
        locator,
        wallet,
    }
}
