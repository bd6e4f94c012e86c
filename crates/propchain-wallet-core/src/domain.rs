use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the page knows about the injected wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub address: Option<String>,
    pub is_connecting: bool,
    pub error: Option<String>,
    pub is_modal_open: bool,
    /// Native-currency units with exactly four fractional digits.
    pub balance: Option<String>,
    pub is_loading_balance: bool,
}

impl WalletSnapshot {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockTag {
    Latest,
}

impl BlockTag {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockTag::Latest => "latest",
        }
    }
}

/// The EIP-1193 requests the wallet container issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcMethod {
    /// Prompts the user to authorize the page.
    RequestAccounts,
    /// Accounts already authorized; never prompts.
    Accounts,
    GetBalance { address: String, block: BlockTag },
}

impl RpcMethod {
    pub fn balance_of(address: impl Into<String>) -> Self {
        RpcMethod::GetBalance {
            address: address.into(),
            block: BlockTag::Latest,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RpcMethod::RequestAccounts => "eth_requestAccounts",
            RpcMethod::Accounts => "eth_accounts",
            RpcMethod::GetBalance { .. } => "eth_getBalance",
        }
    }

    pub fn params(&self) -> Value {
        match self {
            RpcMethod::RequestAccounts | RpcMethod::Accounts => serde_json::json!([]),
            RpcMethod::GetBalance { address, block } => {
                serde_json::json!([address, block.as_str()])
            }
        }
    }

    /// `{ method, params }` as handed to `provider.request(...)`.
    pub fn to_request(&self) -> Value {
        serde_json::json!({
            "method": self.name(),
            "params": self.params(),
        })
    }
}

/// First account of an `eth_accounts`-shaped result, if it is a string.
///
/// Providers occasionally hand back `null` or objects here; those are not
/// treated as failures, they simply yield no account.
pub fn first_account(value: &Value) -> Option<String> {
    value
        .as_array()
        .and_then(|accounts| accounts.first())
        .and_then(|first| first.as_str())
        .map(str::to_owned)
}
