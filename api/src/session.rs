use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::consts::PUBKEY_LEN;
use crate::network::NetworkSelection;

/// Asset symbol to amount.
pub type Balances = BTreeMap<String, Decimal>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionPhase {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Read-only view of the wallet session.
///
/// `public_address` is present iff `connected`; `balances` is empty whenever
/// the session is disconnected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalletSession {
    connected: bool,
    public_address: Option<String>,
    balances: Balances,
}

impl WalletSession {
    pub(crate) fn connected(address: String) -> Self {
        Self {
            connected: true,
            public_address: Some(address),
            balances: Balances::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn public_address(&self) -> Option<&str> {
        self.public_address.as_deref()
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    pub fn balance(&self, symbol: &str) -> Option<Decimal> {
        self.balances.get(symbol).copied()
    }

    /// Address shortened to `abcd...wxyz` for display.
    pub fn short_address(&self) -> Option<String> {
        self.public_address.as_deref().map(short_address)
    }

    pub(crate) fn set_balances(&mut self, balances: Balances) {
        if self.connected {
            self.balances = balances;
        }
    }

    pub(crate) fn clear_balances(&mut self) {
        self.balances.clear();
    }
}

/// Everything a consumer needs to render: network, session and phase.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub network: NetworkSelection,
    pub session: WalletSession,
    pub phase: ConnectionPhase,
}

pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        address.to_string()
    }
}

/// A wallet address must be a base58 encoded 32-byte public key.
pub fn is_valid_address(address: &str) -> bool {
    bs58::decode(address)
        .into_vec()
        .map(|bytes| bytes.len() == PUBKEY_LEN)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "Car9HG6v2xL2DdVjhVm34MbwUYL12mgCVc1Y4w5uFHys";

    #[test]
    fn test_default_is_disconnected() {
        let session = WalletSession::default();
        assert!(!session.is_connected());
        assert_eq!(session.public_address(), None);
        assert!(session.balances().is_empty());
    }

    #[test]
    fn test_balances_ignored_while_disconnected() {
        let mut session = WalletSession::default();
        let mut balances = Balances::new();
        balances.insert("SOL".to_string(), Decimal::ONE);
        session.set_balances(balances);
        assert!(session.balances().is_empty());
    }

    #[test]
    fn test_short_address() {
        let session = WalletSession::connected(ADDRESS.to_string());
        assert_eq!(session.short_address().as_deref(), Some("Car9...FHys"));
        assert_eq!(short_address("abc"), "abc");
    }

    #[test]
    fn test_short_address_multibyte() {
        assert_eq!(short_address("ééééééééé"), "éééé...éééé");
        assert_eq!(short_address("日本語"), "日本語");
    }

    #[test]
    fn test_is_valid_address() {
        assert!(is_valid_address(ADDRESS));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("not-base58-0OIl"));
        assert!(!is_valid_address("3vzF"));
    }
}
