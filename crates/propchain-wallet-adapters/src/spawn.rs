use futures::future::LocalBoxFuture;

use propchain_wallet_core::Spawner;

/// Spawns onto a `futures` [`LocalPool`](futures::executor::LocalPool) that
/// the host drives, e.g. once per egui frame.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone)]
pub struct LocalPoolSpawner {
    spawner: futures::executor::LocalSpawner,
}

#[cfg(not(target_arch = "wasm32"))]
impl LocalPoolSpawner {
    pub fn new(spawner: futures::executor::LocalSpawner) -> Self {
        Self { spawner }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Spawner for LocalPoolSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        use futures::task::LocalSpawnExt;

        if let Err(e) = self.spawner.spawn_local(task) {
            tracing::warn!(error = %e, "local pool shut down; dropping wallet task");
        }
    }
}

/// Spawns onto the browser microtask queue.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

#[cfg(target_arch = "wasm32")]
impl Spawner for BrowserSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
