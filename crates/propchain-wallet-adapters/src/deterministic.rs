//! In-memory wallet used when no real provider runtime is configured.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use alloy::primitives::U256;
use serde_json::Value;

use propchain_wallet_core::{AccountsListener, ProviderError, RpcMethod, Subscription};

pub const DEFAULT_ACCOUNT: &str = "0x1000000000000000000000000000000000000001";
/// 1.5 native units.
pub const DEFAULT_BALANCE_WEI: u128 = 1_500_000_000_000_000_000;

#[derive(Clone)]
pub struct DeterministicWallet {
    state: Arc<Mutex<WalletState>>,
}

struct WalletState {
    accounts: Vec<String>,
    authorized: bool,
    reject_connections: bool,
    balances: HashMap<String, U256>,
    listeners: Vec<(u64, AccountsListener)>,
    next_listener_id: u64,
}

impl Default for DeterministicWallet {
    fn default() -> Self {
        Self::with_accounts(vec![(
            DEFAULT_ACCOUNT.to_owned(),
            U256::from(DEFAULT_BALANCE_WEI),
        )])
    }
}

impl fmt::Debug for DeterministicWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.lock();
        f.debug_struct("DeterministicWallet")
            .field("accounts", &g.accounts)
            .field("authorized", &g.authorized)
            .field("listeners", &g.listeners.len())
            .finish()
    }
}

impl DeterministicWallet {
    pub fn with_accounts(accounts: Vec<(String, U256)>) -> Self {
        let balances = accounts
            .iter()
            .map(|(a, wei)| (a.to_lowercase(), *wei))
            .collect();
        Self {
            state: Arc::new(Mutex::new(WalletState {
                accounts: accounts.into_iter().map(|(a, _)| a).collect(),
                authorized: false,
                reject_connections: false,
                balances,
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WalletState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulates the user declining every connection prompt.
    pub fn reject_connections(&self, reject: bool) {
        self.lock().reject_connections = reject;
    }

    /// Marks the page as already authorized, as if approved in an earlier visit.
    pub fn authorize(&self) {
        self.lock().authorized = true;
    }

    pub fn set_balance(&self, account: &str, wei: U256) {
        self.lock().balances.insert(account.to_lowercase(), wei);
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Replaces the account list and notifies `accountsChanged` listeners.
    pub fn debug_inject_accounts_changed(&self, accounts: Vec<String>) {
        let mut listeners = {
            let mut g = self.lock();
            g.authorized = !accounts.is_empty();
            g.accounts = accounts.clone();
            std::mem::take(&mut g.listeners)
        };
        for (_, listener) in listeners.iter_mut() {
            listener(accounts.clone());
        }
        let mut g = self.lock();
        listeners.append(&mut g.listeners);
        g.listeners = listeners;
    }

    pub fn request(&self, method: &RpcMethod) -> Result<Value, ProviderError> {
        let mut g = self.lock();
        match method {
            RpcMethod::RequestAccounts => {
                if g.reject_connections {
                    return Err(ProviderError::user_rejected());
                }
                g.authorized = true;
                Ok(serde_json::json!(g.accounts))
            }
            RpcMethod::Accounts => {
                if g.authorized {
                    Ok(serde_json::json!(g.accounts))
                } else {
                    Ok(serde_json::json!([]))
                }
            }
            RpcMethod::GetBalance { address, .. } => {
                let wei = g
                    .balances
                    .get(&address.to_lowercase())
                    .copied()
                    .unwrap_or(U256::ZERO);
                Ok(Value::String(format!("0x{wei:x}")))
            }
        }
    }

    pub fn subscribe(&self, listener: AccountsListener) -> Subscription {
        let id = {
            let mut g = self.lock();
            g.next_listener_id = g.next_listener_id.saturating_add(1);
            let id = g.next_listener_id;
            g.listeners.push((id, listener));
            id
        };
        let state = Arc::clone(&self.state);
        Subscription::new(move || {
            let mut g = state.lock().unwrap_or_else(PoisonError::into_inner);
            g.listeners.retain(|(x, _)| *x != id);
        })
    }
}
