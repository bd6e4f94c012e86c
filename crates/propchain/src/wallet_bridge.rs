//! Bridge between the egui shell and the wallet workspace crates.
//! This must remain the only shell-facing boundary for wallet operations.

use eframe::egui;

use propchain_wallet_adapters::Eip1193Adapter;
#[cfg(target_arch = "wasm32")]
use propchain_wallet_adapters::BrowserSpawner;
#[cfg(not(target_arch = "wasm32"))]
use propchain_wallet_adapters::LocalPoolSpawner;
use propchain_wallet_core::{Spawner, WalletContainer, WalletSnapshot};

#[cfg(not(target_arch = "wasm32"))]
type HostSpawner = LocalPoolSpawner;
#[cfg(target_arch = "wasm32")]
type HostSpawner = BrowserSpawner;

type Wallet = WalletContainer<Eip1193Adapter, HostSpawner>;

pub struct WalletBridge {
    wallet: Wallet,
    spawner: HostSpawner,
    #[cfg(not(target_arch = "wasm32"))]
    pool: futures::executor::LocalPool,
}

impl WalletBridge {
    /// Every wallet state change schedules a repaint of `ctx`.
    pub fn new(ctx: &egui::Context) -> Self {
        let adapter = Eip1193Adapter::default();

        #[cfg(not(target_arch = "wasm32"))]
        let pool = futures::executor::LocalPool::new();
        #[cfg(not(target_arch = "wasm32"))]
        let spawner = LocalPoolSpawner::new(pool.spawner());
        #[cfg(target_arch = "wasm32")]
        let spawner = BrowserSpawner;

        let wallet = WalletContainer::new(adapter, spawner.clone());
        let repaint = ctx.clone();
        wallet.set_change_notifier(move || repaint.request_repaint());

        Self {
            wallet,
            spawner,
            #[cfg(not(target_arch = "wasm32"))]
            pool,
        }
    }

    /// Runs wallet tasks that became ready since the last frame.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn poll(&mut self) {
        self.pool.run_until_stalled();
    }

    #[cfg(target_arch = "wasm32")]
    pub fn poll(&mut self) {}

    pub fn snapshot(&self) -> WalletSnapshot {
        self.wallet.snapshot()
    }

    pub fn has_provider(&self) -> bool {
        self.wallet.is_provider_available()
    }

    pub fn open_modal(&self) {
        self.wallet.open_modal();
    }

    pub fn close_modal(&self) {
        self.wallet.close_modal();
    }

    pub fn connect(&self) {
        let wallet = self.wallet.clone();
        self.spawner
            .spawn_local(Box::pin(async move { wallet.connect_metamask().await }));
    }

    pub fn disconnect(&self) {
        self.wallet.disconnect();
    }
}

impl Drop for WalletBridge {
    fn drop(&mut self) {
        self.wallet.teardown();
    }
}
