//! The wallet connection state container.
//!
//! One container exists per page. It is the only component that talks to the
//! injected provider; presentation code reads [`WalletSnapshot`]s and invokes
//! the actions below.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::balance::balance_from_response;
use crate::domain::{first_account, RpcMethod, WalletSnapshot};
use crate::error::WalletError;
use crate::ports::{AccountsListener, ProviderLocator, ProviderPort, Spawner, Subscription};
use crate::state_machine::{address_transition, derive_status, AddressChange, ConnectionStatus};

type ChangeNotifier = Arc<dyn Fn()>;

pub struct WalletContainer<L, S>
where
    L: ProviderLocator + 'static,
    S: Spawner + 'static,
{
    inner: Arc<Inner<L, S>>,
}

struct Inner<L, S> {
    locator: L,
    spawner: S,
    shared: Mutex<Shared>,
    subscription: Mutex<Option<Subscription>>,
    notifier: Mutex<Option<ChangeNotifier>>,
}

#[derive(Debug, Default)]
struct Shared {
    snapshot: WalletSnapshot,
    /// Bumped by every balance fetch; only the newest one clears the loading flag.
    balance_ticket: u64,
    torn_down: bool,
}

impl<L, S> Clone for WalletContainer<L, S>
where
    L: ProviderLocator + 'static,
    S: Spawner + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L, S> WalletContainer<L, S>
where
    L: ProviderLocator + 'static,
    S: Spawner + 'static,
{
    /// Creates the container, subscribes to `accountsChanged` and schedules
    /// the silent `eth_accounts` probe.
    pub fn new(locator: L, spawner: S) -> Self {
        let container = Self {
            inner: Arc::new(Inner {
                locator,
                spawner,
                shared: Mutex::new(Shared::default()),
                subscription: Mutex::new(None),
                notifier: Mutex::new(None),
            }),
        };
        container.attach();
        container
    }

    fn attach(&self) {
        let Some(provider) = self.inner.locator.locate() else {
            debug!("no injected wallet provider; skipping account probe");
            return;
        };

        let weak = Arc::downgrade(&self.inner);
        let listener: AccountsListener = Box::new(move |accounts: Vec<String>| {
            if let Some(inner) = weak.upgrade() {
                WalletContainer { inner }.handle_accounts_changed(accounts);
            }
        });
        match provider.subscribe_accounts_changed(listener) {
            Ok(subscription) => *lock(&self.inner.subscription) = Some(subscription),
            Err(err) => warn!(error = %err, "failed to subscribe to accountsChanged"),
        }

        let this = self.clone();
        self.inner
            .spawner
            .spawn_local(Box::pin(async move { this.probe_authorized_accounts().await }));
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        self.shared().snapshot.clone()
    }

    pub fn status(&self) -> ConnectionStatus {
        derive_status(&self.shared().snapshot)
    }

    /// Whether a provider can currently be found. Drives the install prompt.
    pub fn is_provider_available(&self) -> bool {
        self.inner.locator.is_available()
    }

    /// Registers a callback run after every state change.
    pub fn set_change_notifier(&self, notifier: impl Fn() + 'static) {
        let notifier: ChangeNotifier = Arc::new(notifier);
        *lock(&self.inner.notifier) = Some(notifier);
    }

    pub fn open_modal(&self) {
        self.update(|s| s.snapshot.is_modal_open = true);
    }

    pub fn close_modal(&self) {
        self.update(|s| s.snapshot.is_modal_open = false);
    }

    pub async fn connect_metamask(&self) {
        self.update(|s| s.snapshot.error = None);
        let Some(provider) = self.inner.locator.locate() else {
            self.record_error(WalletError::ProviderNotDetected);
            return;
        };

        let _connecting = InFlight::connecting(self);
        info!("requesting wallet accounts");
        match provider.request(RpcMethod::RequestAccounts).await {
            Ok(value) => match first_account(&value) {
                Some(account) => {
                    info!(%account, "wallet connected");
                    self.set_address(Some(account));
                }
                None => warn!(response = %value, "eth_requestAccounts returned no usable account"),
            },
            Err(err) => {
                warn!(error = %err, "wallet connection failed");
                self.record_error(WalletError::from_connect_failure(err));
            }
        }
    }

    /// Forgets the account locally. Injected providers have no programmatic
    /// disconnect, so the provider is not contacted.
    pub fn disconnect(&self) {
        self.update(|s| {
            s.snapshot.address = None;
            s.snapshot.error = None;
            s.snapshot.balance = None;
        });
        info!("wallet disconnected");
    }

    pub async fn fetch_balance(&self) {
        let Some(address) = self.snapshot().address else {
            self.update(|s| s.snapshot.balance = None);
            return;
        };
        let Some(provider) = self.inner.locator.locate() else {
            self.record_error(WalletError::ProviderUnavailable);
            return;
        };
        let Some(_loading) = InFlight::balance(self) else {
            return;
        };

        let outcome = provider
            .request(RpcMethod::balance_of(address.as_str()))
            .await
            .map_err(WalletError::from_balance_failure)
            .and_then(|value| {
                debug!(%address, response = %value, "balance response");
                balance_from_response(&value).map_err(WalletError::from)
            });

        self.update(|s| {
            if s.snapshot.address.as_deref() != Some(address.as_str()) {
                debug!(%address, "discarding balance result for superseded address");
                return;
            }
            match outcome {
                Ok(balance) => {
                    debug!(%address, %balance, "balance fetched");
                    s.snapshot.balance = Some(balance);
                }
                Err(err) => {
                    warn!(%address, error = %err, "balance fetch failed");
                    s.snapshot.error = Some(err.to_string());
                }
            }
        });
    }

    /// Drops the event subscription. Results that arrive afterwards are ignored.
    pub fn teardown(&self) {
        let subscription = lock(&self.inner.subscription).take();
        self.shared().torn_down = true;
        drop(subscription);
        info!("wallet container torn down");
    }

    fn handle_accounts_changed(&self, accounts: Vec<String>) {
        debug!(count = accounts.len(), "accountsChanged");
        self.set_address(accounts.into_iter().next());
    }

    async fn probe_authorized_accounts(&self) {
        let Some(provider) = self.inner.locator.locate() else {
            return;
        };
        match provider.request(RpcMethod::Accounts).await {
            Ok(value) => {
                if let Some(account) = first_account(&value) {
                    info!(%account, "adopting already authorized account");
                    self.set_address(Some(account));
                }
            }
            Err(err) => debug!(error = %err, "authorized account probe failed; ignoring"),
        }
    }

    fn set_address(&self, next: Option<String>) {
        let change = self.update(|s| {
            let change = address_transition(s.snapshot.address.as_deref(), next.as_deref());
            s.snapshot.address = next;
            if s.snapshot.address.is_none() {
                s.snapshot.balance = None;
            }
            change
        });
        let Some(change) = change else {
            return;
        };
        debug!(reason = change.reason(), "address update");
        if let AddressChange::Changed(_) = change {
            self.schedule_balance_fetch();
        }
    }

    fn schedule_balance_fetch(&self) {
        let this = self.clone();
        self.inner
            .spawner
            .spawn_local(Box::pin(async move { this.fetch_balance().await }));
    }

    fn record_error(&self, err: WalletError) {
        self.update(|s| s.snapshot.error = Some(err.to_string()));
    }

    fn shared(&self) -> MutexGuard<'_, Shared> {
        lock(&self.inner.shared)
    }

    /// Applies `f` unless the container was torn down, then notifies.
    fn update<R>(&self, f: impl FnOnce(&mut Shared) -> R) -> Option<R> {
        let out = {
            let mut shared = self.shared();
            if shared.torn_down {
                return None;
            }
            f(&mut shared)
        };
        let notifier = lock(&self.inner.notifier).clone();
        if let Some(notify) = notifier {
            notify();
        }
        Some(out)
    }
}

/// Scoped ownership of an in-flight flag; the flag is released on drop,
/// including when the owning future is dropped mid-request.
struct InFlight<'a, L, S>
where
    L: ProviderLocator + 'static,
    S: Spawner + 'static,
{
    container: &'a WalletContainer<L, S>,
    kind: InFlightKind,
}

#[derive(Debug, Clone, Copy)]
enum InFlightKind {
    Connect,
    Balance { ticket: u64 },
}

impl<'a, L, S> InFlight<'a, L, S>
where
    L: ProviderLocator + 'static,
    S: Spawner + 'static,
{
    fn connecting(container: &'a WalletContainer<L, S>) -> Self {
        container.update(|s| s.snapshot.is_connecting = true);
        Self {
            container,
            kind: InFlightKind::Connect,
        }
    }

    fn balance(container: &'a WalletContainer<L, S>) -> Option<Self> {
        let ticket = container.update(|s| {
            s.balance_ticket = s.balance_ticket.wrapping_add(1);
            s.snapshot.is_loading_balance = true;
            s.balance_ticket
        })?;
        Some(Self {
            container,
            kind: InFlightKind::Balance { ticket },
        })
    }
}

impl<L, S> Drop for InFlight<'_, L, S>
where
    L: ProviderLocator + 'static,
    S: Spawner + 'static,
{
    fn drop(&mut self) {
        let kind = self.kind;
        self.container.update(|s| match kind {
            InFlightKind::Connect => s.snapshot.is_connecting = false,
            InFlightKind::Balance { ticket } => {
                if s.balance_ticket == ticket {
                    s.snapshot.is_loading_balance = false;
                }
            }
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
