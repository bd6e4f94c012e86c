use crate::domain::WalletSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceState {
    Unknown,
    Loading,
    Loaded(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected {
        address: String,
        balance: BalanceState,
    },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }
}

pub fn derive_status(snapshot: &WalletSnapshot) -> ConnectionStatus {
    match &snapshot.address {
        Some(address) => {
            let balance = if snapshot.is_loading_balance {
                BalanceState::Loading
            } else if let Some(balance) = &snapshot.balance {
                BalanceState::Loaded(balance.clone())
            } else {
                BalanceState::Unknown
            };
            ConnectionStatus::Connected {
                address: address.clone(),
                balance,
            }
        }
        None if snapshot.is_connecting => ConnectionStatus::Connecting,
        None => ConnectionStatus::Disconnected,
    }
}

/// Effect of replacing the current address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressChange {
    Unchanged,
    /// New or different address; its balance must be fetched.
    Changed(String),
    /// Address went away; the balance must be dropped.
    Cleared,
}

impl AddressChange {
    pub fn reason(&self) -> &'static str {
        match self {
            AddressChange::Unchanged => "address unchanged",
            AddressChange::Changed(_) => "address adopted",
            AddressChange::Cleared => "address cleared",
        }
    }
}

pub fn address_transition(current: Option<&str>, next: Option<&str>) -> AddressChange {
    match (current, next) {
        (Some(a), Some(b)) if a == b => AddressChange::Unchanged,
        (_, Some(b)) => AddressChange::Changed(b.to_owned()),
        (Some(_), None) => AddressChange::Cleared,
        (None, None) => AddressChange::Unchanged,
    }
}
