use thiserror::Error;

use crate::balance::BalanceError;
use crate::ports::ProviderError;

/// User-visible wallet failures. `Display` is exactly what ends up in
/// `WalletSnapshot::error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("MetaMask not detected")]
    ProviderNotDetected,
    #[error("Ethereum provider not available")]
    ProviderUnavailable,
    #[error("Connection request rejected")]
    UserRejected,
    #[error("{0}")]
    Provider(String),
    #[error("Failed to connect")]
    ConnectFailed,
    #[error("Failed to fetch balance")]
    BalanceFailed,
}

impl WalletError {
    pub fn from_connect_failure(err: ProviderError) -> Self {
        if err.is_user_rejected() {
            return WalletError::UserRejected;
        }
        match err.message {
            Some(message) => WalletError::Provider(message),
            None => WalletError::ConnectFailed,
        }
    }

    pub fn from_balance_failure(err: ProviderError) -> Self {
        match err.message {
            Some(message) => WalletError::Provider(message),
            None => WalletError::BalanceFailed,
        }
    }
}

impl From<BalanceError> for WalletError {
    fn from(err: BalanceError) -> Self {
        WalletError::Provider(err.to_string())
    }
}
