pub mod balance;
pub mod container;
pub mod domain;
pub mod error;
pub mod ports;
pub mod state_machine;

pub use balance::{balance_from_response, format_native_units, parse_quantity, BalanceError};
pub use container::WalletContainer;
pub use domain::{first_account, BlockTag, RpcMethod, WalletSnapshot};
pub use error::WalletError;
pub use ports::{
    AccountsListener, ProviderError, ProviderLocator, ProviderPort, Spawner, Subscription,
};
pub use state_machine::{
    address_transition, derive_status, AddressChange, BalanceState, ConnectionStatus,
};
