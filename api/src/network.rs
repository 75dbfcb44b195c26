use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::NetworkError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }

    /// Human readable label for menus.
    pub fn label(&self) -> &'static str {
        match self {
            Network::Mainnet => "Mainnet",
            Network::Testnet => "Testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            _ => Err(NetworkError::InvalidNetwork(s.to_string())),
        }
    }
}

/// The active network together with every constant derived from it.
///
/// Fields are private: a selection can only be built from a [`Network`], so the
/// endpoint, explorer and token address can never disagree with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkSelection {
    network: Network,
    endpoint: &'static str,
    explorer_url: &'static str,
    token_address: &'static str,
}

impl NetworkSelection {
    pub const fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self {
                network,
                endpoint: MAINNET_RPC_URL,
                explorer_url: MAINNET_EXPLORER_URL,
                token_address: MAINNET_TOKEN_ADDRESS,
            },
            Network::Testnet => Self {
                network,
                endpoint: TESTNET_RPC_URL,
                explorer_url: TESTNET_EXPLORER_URL,
                token_address: TESTNET_TOKEN_ADDRESS,
            },
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    pub fn explorer_url(&self) -> &'static str {
        self.explorer_url
    }

    pub fn token_address(&self) -> &'static str {
        self.token_address
    }

    pub fn is_mainnet(&self) -> bool {
        self.network == Network::Mainnet
    }

    pub fn explorer_address_url(&self, address: &str) -> String {
        self.explorer_link("address", address)
    }

    pub fn explorer_tx_url(&self, signature: &str) -> String {
        self.explorer_link("tx", signature)
    }

    // Path goes before the cluster query, if any.
    fn explorer_link(&self, kind: &str, id: &str) -> String {
        match self.explorer_url.split_once('?') {
            Some((base, query)) => format!("{}/{}/{}?{}", base, kind, id, query),
            None => format!("{}/{}/{}", self.explorer_url, kind, id),
        }
    }
}

impl Default for NetworkSelection {
    fn default() -> Self {
        Self::for_network(Network::default())
    }
}

impl From<Network> for NetworkSelection {
    fn from(network: Network) -> Self {
        Self::for_network(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_network() {
        assert_eq!("mainnet".parse::<Network>(), Ok(Network::Mainnet));
        assert_eq!(" Testnet ".parse::<Network>(), Ok(Network::Testnet));
        assert_eq!(
            "lunar".parse::<Network>(),
            Err(NetworkError::InvalidNetwork("lunar".to_string()))
        );
        assert!("".parse::<Network>().is_err());
    }

    #[test]
    fn test_default_is_testnet() {
        assert_eq!(Network::default(), Network::Testnet);
        assert_eq!(NetworkSelection::default().endpoint(), TESTNET_RPC_URL);
    }

    #[test]
    fn test_selection_table() {
        let mainnet = NetworkSelection::for_network(Network::Mainnet);
        assert_eq!(mainnet.endpoint(), "https://api.mainnet-beta.solana.com");
        assert_eq!(mainnet.explorer_url(), MAINNET_EXPLORER_URL);
        assert_eq!(mainnet.token_address(), MAINNET_TOKEN_ADDRESS);
        assert!(mainnet.is_mainnet());

        let testnet = NetworkSelection::for_network(Network::Testnet);
        assert_eq!(testnet.endpoint(), TESTNET_RPC_URL);
        assert_eq!(testnet.token_address(), TESTNET_TOKEN_ADDRESS);
        assert!(!testnet.is_mainnet());
    }

    #[test]
    fn test_derived_fields_are_distinct_per_network() {
        let [a, b] = Network::ALL.map(NetworkSelection::for_network);
        assert_ne!(a.endpoint(), b.endpoint());
        assert_ne!(a.explorer_url(), b.explorer_url());
        assert_ne!(a.token_address(), b.token_address());
    }

    #[test]
    fn test_token_addresses_are_pubkeys() {
        for network in Network::ALL {
            let selection = NetworkSelection::for_network(network);
            let bytes = bs58::decode(selection.token_address()).into_vec().unwrap();
            assert_eq!(bytes.len(), PUBKEY_LEN);
        }
    }

    #[test]
    fn test_explorer_links() {
        let mainnet = NetworkSelection::for_network(Network::Mainnet);
        assert_eq!(
            mainnet.explorer_tx_url("abc"),
            "https://explorer.solana.com/tx/abc"
        );

        let testnet = NetworkSelection::for_network(Network::Testnet);
        assert_eq!(
            testnet.explorer_address_url("xyz"),
            "https://explorer.solana.com/address/xyz?cluster=testnet"
        );
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Network::Mainnet).unwrap(), "\"mainnet\"");
        let parsed: Network = serde_json::from_str("\"testnet\"").unwrap();
        assert_eq!(parsed, Network::Testnet);
    }
}
