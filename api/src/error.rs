use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid network '{0}'. Expected mainnet or testnet.")]
    InvalidNetwork(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("No wallet provider is available")]
    ProviderUnavailable,

    #[error("Connection rejected by the user")]
    UserRejected,

    #[error("Wallet did not respond within {0:?}")]
    ConnectTimeout(Duration),

    #[error("A connection attempt is already pending")]
    AlreadyConnecting,

    #[error("Connection attempt was aborted by a disconnect")]
    Aborted,

    #[error("Wallet provider error: {0}")]
    Provider(String),
}

impl ConnectError {
    /// Errors that point at a UI calling the coordinator out of turn.
    pub fn is_misuse(&self) -> bool {
        matches!(self, ConnectError::AlreadyConnecting)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No wallet connected")]
    NotConnected,
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Status(code) => *code == 429 || (500..600).contains(code),
            FetchError::Rpc { code, .. } => (-32099..=-32000).contains(code),
            FetchError::Decode(_) | FetchError::NotConnected => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write '{key}': {message}")]
    Write { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_retryable() {
        assert!(FetchError::Transport("reset".into()).is_retryable());
        assert!(FetchError::Status(429).is_retryable());
        assert!(FetchError::Status(503).is_retryable());
        assert!(!FetchError::Status(404).is_retryable());
        assert!(FetchError::Rpc { code: -32005, message: "node behind".into() }.is_retryable());
        assert!(!FetchError::Rpc { code: -32602, message: "invalid params".into() }.is_retryable());
        assert!(!FetchError::Decode("eof".into()).is_retryable());
        assert!(!FetchError::NotConnected.is_retryable());
    }

    #[test]
    fn test_connect_error_misuse() {
        assert!(ConnectError::AlreadyConnecting.is_misuse());
        assert!(!ConnectError::UserRejected.is_misuse());
        assert!(!ConnectError::ProviderUnavailable.is_misuse());
    }

    #[test]
    fn test_storage_error_messages() {
        assert_eq!(
            StorageError::Unavailable("localStorage is disabled".into()).to_string(),
            "Storage unavailable: localStorage is disabled"
        );
        assert_eq!(
            StorageError::Write { key: "network".into(), message: "quota".into() }.to_string(),
            "Failed to write 'network': quota"
        );
    }
}
