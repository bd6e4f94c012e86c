use std::str::FromStr;

use thiserror::Error;

pub const ENV_RUNTIME_PROFILE: &str = "PROPCHAIN_RUNTIME_PROFILE";
pub const ENV_EIP1193_PROXY_URL: &str = "PROPCHAIN_EIP1193_PROXY_URL";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "PROPCHAIN_REQUEST_TIMEOUT_MS";

pub const METAMASK_INSTALL_URL: &str = "https://metamask.io/download/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeProfile {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown runtime profile {0:?} (expected development or production)")]
    UnknownProfile(String),
    #[error("invalid {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl FromStr for RuntimeProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(RuntimeProfile::Development),
            "prod" | "production" => Ok(RuntimeProfile::Production),
            other => Err(ConfigError::UnknownProfile(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WalletAdapterConfig {
    pub runtime_profile: RuntimeProfile,
    /// JSON-RPC endpoint used as the provider on native builds.
    pub eip1193_proxy_url: Option<String>,
    pub request_timeout_ms: u64,
    pub install_url: String,
}

impl Default for WalletAdapterConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::Development,
            eip1193_proxy_url: None,
            request_timeout_ms: 15_000,
            install_url: METAMASK_INSTALL_URL.to_owned(),
        }
    }
}

impl WalletAdapterConfig {
    /// Defaults overridden by `PROPCHAIN_*` environment variables. Invalid
    /// values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_RUNTIME_PROFILE) {
            match raw.parse() {
                Ok(profile) => config.runtime_profile = profile,
                Err(e) => tracing::warn!(error = %e, "ignoring {ENV_RUNTIME_PROFILE}"),
            }
        }
        if let Some(url) = lookup(ENV_EIP1193_PROXY_URL).filter(|u| !u.trim().is_empty()) {
            config.eip1193_proxy_url = Some(url.trim().to_owned());
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_MS) {
            match parse_timeout(&raw) {
                Ok(ms) => config.request_timeout_ms = ms,
                Err(e) => tracing::warn!(error = %e, "ignoring {ENV_REQUEST_TIMEOUT_MS}"),
            }
        }
        config
    }

    /// Production builds must talk to a real provider; the deterministic
    /// wallet is never substituted there.
    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let ms: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
        key: ENV_REQUEST_TIMEOUT_MS,
        reason: format!("{e}"),
    })?;
    if ms == 0 {
        return Err(ConfigError::InvalidValue {
            key: ENV_REQUEST_TIMEOUT_MS,
            reason: "must be greater than zero".to_owned(),
        });
    }
    Ok(ms)
}
