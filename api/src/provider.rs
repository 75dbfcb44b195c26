use std::rc::Rc;

use async_trait::async_trait;

use crate::error::ConnectError;

/// Capability offered by an external wallet (browser extension, mobile app, ...).
///
/// Adapters are registered per supported wallet; the coordinator never inspects
/// the environment itself, it asks each adapter to `probe`.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Stable identifier, persisted to reconnect the same wallet on reload.
    fn name(&self) -> &'static str;

    /// Whether the wallet is installed and reachable right now.
    fn probe(&self) -> bool;

    /// Requests access and returns the public address.
    async fn connect(&self) -> Result<String, ConnectError>;

    /// Best effort; never fails.
    fn disconnect(&self);
}

/// Events raised by the wallet itself rather than by the user through the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderEvent {
    /// The wallet was locked or revoked access.
    Disconnected,
    /// The active account changed; `None` means no account is exposed anymore.
    AccountChanged(Option<String>),
}

/// Ordered set of wallet adapters.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Rc<dyn WalletProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, provider: Rc<dyn WalletProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Adapters whose wallet is currently present.
    pub fn available(&self) -> Vec<Rc<dyn WalletProvider>> {
        self.providers.iter().filter(|p| p.probe()).cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn WalletProvider>> {
        self.providers.iter().find(|p| p.name() == name).cloned()
    }

    /// Picks `preferred` when it is present, otherwise the first present adapter.
    pub fn select(&self, preferred: Option<&str>) -> Option<Rc<dyn WalletProvider>> {
        if let Some(provider) = preferred.and_then(|name| self.get(name)) {
            if provider.probe() {
                return Some(provider);
            }
        }
        self.providers.iter().find(|p| p.probe()).cloned()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
