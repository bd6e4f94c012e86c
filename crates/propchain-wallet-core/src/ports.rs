use std::fmt;

use futures::future::LocalBoxFuture;
use serde_json::Value;
use thiserror::Error;

use crate::domain::RpcMethod;

/// Failure of a single provider call, as reported by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provider error (code {code:?}): {}", message.as_deref().unwrap_or("<no message>"))]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: Option<String>,
}

impl ProviderError {
    /// EIP-1193 "User Rejected Request".
    pub const USER_REJECTED: i64 = 4001;

    pub fn new(code: Option<i64>, message: Option<String>) -> Self {
        Self { code, message }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: Some(message.into()),
        }
    }

    pub fn user_rejected() -> Self {
        Self {
            code: Some(Self::USER_REJECTED),
            message: Some("User rejected the request.".to_owned()),
        }
    }

    pub fn is_user_rejected(&self) -> bool {
        self.code == Some(Self::USER_REJECTED)
    }
}

pub type AccountsListener = Box<dyn FnMut(Vec<String>)>;

/// Registration of an `accountsChanged` listener. Dropping it unregisters.
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// For providers that never push events.
    pub fn inert() -> Self {
        Self { release: None }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[allow(async_fn_in_trait)]
pub trait ProviderPort {
    async fn request(&self, method: RpcMethod) -> Result<Value, ProviderError>;
    fn subscribe_accounts_changed(
        &self,
        listener: AccountsListener,
    ) -> Result<Subscription, ProviderError>;
}

/// Finds the injected provider. Must be cheap and side-effect free; callers
/// look it up again for every operation.
pub trait ProviderLocator {
    type Provider: ProviderPort + 'static;

    fn locate(&self) -> Option<Self::Provider>;

    fn is_available(&self) -> bool {
        self.locate().is_some()
    }
}

/// Runs `!Send` futures on the host's event loop.
pub trait Spawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}
