use serde_json::Value;
use tracing::{info, warn};

use propchain_wallet_core::{
    AccountsListener, ProviderError, ProviderLocator, ProviderPort, RpcMethod, Subscription,
};

#[cfg(target_arch = "wasm32")]
use crate::browser::BrowserProvider;
use crate::deterministic::DeterministicWallet;
#[cfg(not(target_arch = "wasm32"))]
use crate::proxy::ProxyRuntime;
use crate::WalletAdapterConfig;

/// Locates the EIP-1193 provider for the current runtime.
#[derive(Debug, Clone)]
pub struct Eip1193Adapter {
    mode: ProviderMode,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Disabled(String),
    Deterministic(DeterministicWallet),
    #[cfg(not(target_arch = "wasm32"))]
    Proxy(ProxyRuntime),
    #[cfg(target_arch = "wasm32")]
    Browser,
}

/// A located provider, valid for one operation.
#[derive(Debug, Clone)]
pub enum Eip1193Provider {
    Deterministic(DeterministicWallet),
    #[cfg(not(target_arch = "wasm32"))]
    Proxy(ProxyRuntime),
    #[cfg(target_arch = "wasm32")]
    Browser(BrowserProvider),
}

impl Default for Eip1193Adapter {
    fn default() -> Self {
        Self::with_config(WalletAdapterConfig::from_env())
    }
}

impl Eip1193Adapter {
    pub fn with_config(config: WalletAdapterConfig) -> Self {
        // In the browser the page must reflect whether MetaMask is really
        // installed, so there is no in-memory fallback.
        #[cfg(target_arch = "wasm32")]
        let mode = {
            let _ = &config;
            ProviderMode::Browser
        };

        #[cfg(not(target_arch = "wasm32"))]
        let mode = if let Some(ref base_url) = config.eip1193_proxy_url {
            let timeout = std::time::Duration::from_millis(config.request_timeout_ms);
            match ProxyRuntime::new(base_url.clone(), timeout) {
                Ok(runtime) => ProviderMode::Proxy(runtime),
                Err(e) if config.strict_runtime_required() => ProviderMode::Disabled(format!(
                    "failed to initialize EIP-1193 proxy in production profile: {e}"
                )),
                Err(e) => {
                    warn!(error = %e, "EIP-1193 proxy unavailable, using deterministic wallet");
                    ProviderMode::Deterministic(DeterministicWallet::default())
                }
            }
        } else if config.strict_runtime_required() {
            ProviderMode::Disabled(
                "EIP-1193 proxy URL not configured in production runtime profile".to_owned(),
            )
        } else {
            ProviderMode::Deterministic(DeterministicWallet::default())
        };

        let adapter = Self { mode };
        info!(mode = adapter.mode_label(), "EIP-1193 adapter ready");
        adapter
    }

    pub fn deterministic(wallet: DeterministicWallet) -> Self {
        Self {
            mode: ProviderMode::Deterministic(wallet),
        }
    }

    pub fn mode_label(&self) -> &'static str {
        match self.mode {
            ProviderMode::Disabled(_) => "disabled",
            ProviderMode::Deterministic(_) => "deterministic",
            #[cfg(not(target_arch = "wasm32"))]
            ProviderMode::Proxy(_) => "proxy",
            #[cfg(target_arch = "wasm32")]
            ProviderMode::Browser => "browser",
        }
    }

    /// Why no provider is available, when the adapter is disabled.
    pub fn disabled_reason(&self) -> Option<&str> {
        match &self.mode {
            ProviderMode::Disabled(reason) => Some(reason),
            _ => None,
        }
    }

    /// Fires `accountsChanged` on the deterministic wallet. Returns false for
    /// every other mode.
    pub fn debug_inject_accounts_changed(&self, accounts: Vec<String>) -> bool {
        match &self.mode {
            ProviderMode::Deterministic(wallet) => {
                wallet.debug_inject_accounts_changed(accounts);
                true
            }
            _ => false,
        }
    }
}

impl ProviderLocator for Eip1193Adapter {
    type Provider = Eip1193Provider;

    fn locate(&self) -> Option<Self::Provider> {
        match &self.mode {
            ProviderMode::Disabled(_) => None,
            ProviderMode::Deterministic(wallet) => {
                Some(Eip1193Provider::Deterministic(wallet.clone()))
            }
            #[cfg(not(target_arch = "wasm32"))]
            ProviderMode::Proxy(runtime) => Some(Eip1193Provider::Proxy(runtime.clone())),
            #[cfg(target_arch = "wasm32")]
            ProviderMode::Browser => BrowserProvider::locate().map(Eip1193Provider::Browser),
        }
    }
}

impl ProviderPort for Eip1193Provider {
    async fn request(&self, method: RpcMethod) -> Result<Value, ProviderError> {
        match self {
            Eip1193Provider::Deterministic(wallet) => wallet.request(&method),
            #[cfg(not(target_arch = "wasm32"))]
            Eip1193Provider::Proxy(runtime) => runtime.request(&method).await,
            #[cfg(target_arch = "wasm32")]
            Eip1193Provider::Browser(browser) => browser.request(&method).await,
        }
    }

    fn subscribe_accounts_changed(
        &self,
        listener: AccountsListener,
    ) -> Result<Subscription, ProviderError> {
        match self {
            Eip1193Provider::Deterministic(wallet) => Ok(wallet.subscribe(listener)),
            // a plain JSON-RPC endpoint has no push channel
            #[cfg(not(target_arch = "wasm32"))]
            Eip1193Provider::Proxy(_) => {
                drop(listener);
                Ok(Subscription::inert())
            }
            #[cfg(target_arch = "wasm32")]
            Eip1193Provider::Browser(browser) => browser.subscribe(listener),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::config::RuntimeProfile;

    #[test]
    fn development_without_proxy_uses_deterministic_wallet() {
        let adapter = Eip1193Adapter::with_config(WalletAdapterConfig::default());
        assert_eq!(adapter.mode_label(), "deterministic");
        assert!(adapter.is_available());
    }

    #[test]
    fn production_without_proxy_is_disabled() {
        let adapter = Eip1193Adapter::with_config(WalletAdapterConfig {
            runtime_profile: RuntimeProfile::Production,
            ..WalletAdapterConfig::default()
        });
        assert_eq!(adapter.mode_label(), "disabled");
        assert!(adapter.locate().is_none());
        assert!(adapter.disabled_reason().is_some());
        assert!(!adapter.debug_inject_accounts_changed(vec![]));
    }
}
