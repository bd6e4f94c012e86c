pub mod config;
pub mod deterministic;
pub mod eip1193;
pub mod spawn;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod proxy;

pub use config::{RuntimeProfile, WalletAdapterConfig, METAMASK_INSTALL_URL};
pub use deterministic::DeterministicWallet;
pub use eip1193::{Eip1193Adapter, Eip1193Provider};
#[cfg(target_arch = "wasm32")]
pub use spawn::BrowserSpawner;
#[cfg(not(target_arch = "wasm32"))]
pub use spawn::LocalPoolSpawner;
