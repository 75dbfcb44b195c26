use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::future::LocalBoxFuture;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::consts::{CONNECT_TIMEOUT, NETWORK_KEY, WALLET_KEY};
use crate::error::{ConnectError, FetchError, NetworkError};
use crate::network::{Network, NetworkSelection};
use crate::provider::{ProviderEvent, ProviderRegistry, WalletProvider};
use crate::rpc::{BalanceSource, RpcBalanceSource};
use crate::session::{is_valid_address, Balances, ConnectionPhase, Snapshot, WalletSession};
use crate::storage::PreferenceStore;
use crate::time;

/// Runs a detached task on the host executor (`spawn_local`, dioxus `spawn`, ...).
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

type Listener = Rc<dyn Fn(&Snapshot)>;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Upper bound on a wallet connection attempt, in milliseconds.
    pub connect_timeout_ms: u64,

    /// Storage key for the selected network.
    pub network_key: String,

    /// Storage key for the last connected wallet.
    pub wallet_key: String,
}

impl CoordinatorConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: CONNECT_TIMEOUT.as_millis() as u64,
            network_key: NETWORK_KEY.to_string(),
            wallet_key: WALLET_KEY.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RefreshOutcome {
    /// Balances were written to the session.
    Applied(Balances),
    /// The (network, address) pair changed while the request was in flight,
    /// or a newer request for the same pair already landed.
    Stale,
}

struct State {
    network: NetworkSelection,
    session: WalletSession,
    phase: ConnectionPhase,
    provider: Option<Rc<dyn WalletProvider>>,
    // Bumped by every connect attempt and every reset.
    attempt: u64,
    next_request: u64,
    applied_request: u64,
}

struct Inner {
    state: RefCell<State>,
    listeners: RefCell<BTreeMap<u64, Listener>>,
    next_listener: Cell<u64>,
    store: Rc<dyn PreferenceStore>,
    registry: ProviderRegistry,
    balances: Rc<dyn BalanceSource>,
    spawner: Option<Spawner>,
    config: CoordinatorConfig,
}

/// Owner of the network selection and wallet session for one application instance.
///
/// Clones share the same state. All mutation goes through the methods below; every
/// mutation completes before listeners run, so no listener sees a torn update.
#[derive(Clone)]
pub struct Coordinator {
    inner: Rc<Inner>,
}

pub struct CoordinatorBuilder {
    store: Rc<dyn PreferenceStore>,
    registry: ProviderRegistry,
    balances: Option<Rc<dyn BalanceSource>>,
    spawner: Option<Spawner>,
    config: CoordinatorConfig,
}

impl CoordinatorBuilder {
    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn balance_source(mut self, balances: Rc<dyn BalanceSource>) -> Self {
        self.balances = Some(balances);
        self
    }

    pub fn spawner(mut self, spawner: impl Fn(LocalBoxFuture<'static, ()>) + 'static) -> Self {
        self.spawner = Some(Rc::new(spawner));
        self
    }

    pub fn config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads the persisted network once and returns the ready coordinator.
    pub fn build(self) -> Coordinator {
        let network = load_network(self.store.as_ref(), &self.config.network_key);
        debug!("Coordinator starting on {}", network);

        Coordinator {
            inner: Rc::new(Inner {
                state: RefCell::new(State {
                    network: NetworkSelection::for_network(network),
                    session: WalletSession::default(),
                    phase: ConnectionPhase::Disconnected,
                    provider: None,
                    attempt: 0,
                    next_request: 0,
                    applied_request: 0,
                }),
                listeners: RefCell::new(BTreeMap::new()),
                next_listener: Cell::new(0),
                store: self.store,
                registry: self.registry,
                balances: self
                    .balances
                    .unwrap_or_else(|| Rc::new(RpcBalanceSource::new()) as Rc<dyn BalanceSource>),
                spawner: self.spawner,
                config: self.config,
            }),
        }
    }
}

fn load_network(store: &dyn PreferenceStore, key: &str) -> Network {
    match store.get(key) {
        Some(value) => value.parse().unwrap_or_else(|e| {
            warn!("Ignoring persisted network: {}", e);
            Network::default()
        }),
        None => Network::default(),
    }
}

impl Coordinator {
    pub fn builder(store: Rc<dyn PreferenceStore>) -> CoordinatorBuilder {
        CoordinatorBuilder {
            store,
            registry: ProviderRegistry::new(),
            balances: None,
            spawner: None,
            config: CoordinatorConfig::default(),
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.inner.registry
    }

    pub fn current_network(&self) -> NetworkSelection {
        self.inner.state.borrow().network
    }

    pub fn is_mainnet(&self) -> bool {
        self.current_network().is_mainnet()
    }

    pub fn session(&self) -> WalletSession {
        self.inner.state.borrow().session.clone()
    }

    /// Name of the wallet backing the current session.
    pub fn active_provider(&self) -> Option<&'static str> {
        self.inner.state.borrow().provider.as_ref().map(|p| p.name())
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.inner.state.borrow().phase
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.inner.state.borrow();
        Snapshot {
            network: state.network,
            session: state.session.clone(),
            phase: state.phase,
        }
    }

    /// Name of the wallet used for the last successful connection, if it was
    /// never explicitly disconnected.
    pub fn remembered_provider(&self) -> Option<String> {
        self.inner.store.get(&self.inner.config.wallet_key)
    }

    /// Registers a listener called after every state change. The listener stays
    /// registered until the returned handle is dropped.
    pub fn subscribe(&self, listener: impl Fn(&Snapshot) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .insert(id, Rc::new(listener));
        Subscription {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Switches to `target`. Returns `false` without persisting or notifying when
    /// `target` is already active.
    pub fn switch_network(&self, target: Network) -> bool {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.network.network() == target {
                debug!("Already on {}", target);
                return false;
            }
            state.network = NetworkSelection::for_network(target);
            // Balances belong to the network they were fetched on.
            state.session.clear_balances();
        }

        self.persist(&self.inner.config.network_key, target.as_str());
        info!("Switched network to {}", target);
        self.notify();
        true
    }

    /// Parses `name` and switches to it.
    pub fn switch_network_named(&self, name: &str) -> Result<bool, NetworkError> {
        match name.parse::<Network>() {
            Ok(target) => Ok(self.switch_network(target)),
            Err(e) => {
                error!("switch_network rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Connects through the first available wallet, preferring the remembered one.
    pub async fn connect(&self) -> Result<WalletSession, ConnectError> {
        {
            let state = self.inner.state.borrow();
            match state.phase {
                ConnectionPhase::Connecting => {
                    error!("connect() called while a connection is pending");
                    return Err(ConnectError::AlreadyConnecting);
                }
                ConnectionPhase::Connected => return Ok(state.session.clone()),
                ConnectionPhase::Disconnected => {}
            }
        }

        let preferred = self.remembered_provider();
        let Some(provider) = self.inner.registry.select(preferred.as_deref()) else {
            warn!("No wallet provider available among {:?}", self.inner.registry.names());
            return Err(ConnectError::ProviderUnavailable);
        };

        let attempt = {
            let mut state = self.inner.state.borrow_mut();
            state.phase = ConnectionPhase::Connecting;
            state.attempt += 1;
            state.attempt
        };
        debug!("Connecting to {}", provider.name());
        self.notify();

        let timeout = self.inner.config.connect_timeout();
        let result = match time::timeout(timeout, provider.connect()).await {
            Ok(Ok(address)) if is_valid_address(&address) => Ok(address),
            Ok(Ok(address)) => Err(ConnectError::Provider(format!(
                "Invalid address '{}'",
                address
            ))),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ConnectError::ConnectTimeout(timeout)),
        };

        let superseded = {
            let state = self.inner.state.borrow();
            state.attempt != attempt || state.phase != ConnectionPhase::Connecting
        };
        if superseded {
            debug!("Connection attempt to {} was aborted", provider.name());
            if result.is_ok() {
                provider.disconnect();
            }
            return Err(ConnectError::Aborted);
        }

        match result {
            Ok(address) => {
                {
                    let mut state = self.inner.state.borrow_mut();
                    state.phase = ConnectionPhase::Connected;
                    state.session = WalletSession::connected(address.clone());
                    state.provider = Some(provider.clone());
                }
                self.persist(&self.inner.config.wallet_key, provider.name());
                info!("Connected {} via {}", address, provider.name());
                self.notify();

                self.schedule_refresh().await;
                Ok(self.session())
            }
            Err(e) => {
                self.inner.state.borrow_mut().phase = ConnectionPhase::Disconnected;
                if matches!(e, ConnectError::ConnectTimeout(_)) {
                    provider.disconnect();
                }
                warn!("Wallet connection failed: {}", e);
                self.notify();
                Err(e)
            }
        }
    }

    /// Ends the session. Safe to call in any state.
    pub fn disconnect(&self) {
        if self.reset() {
            info!("Wallet disconnected");
        }
    }

    /// Applies a change reported by the wallet itself.
    ///
    /// A new account starts with empty balances. The follow-up fetch is handed to
    /// the spawner; without one, the caller must call `refresh_balances`.
    pub fn handle_provider_event(&self, event: ProviderEvent) {
        match event {
            ProviderEvent::Disconnected | ProviderEvent::AccountChanged(None) => {
                if self.reset_from_provider() {
                    info!("Wallet ended the session");
                }
            }
            ProviderEvent::AccountChanged(Some(address)) => {
                if !is_valid_address(&address) {
                    warn!("Wallet reported invalid account '{}'", address);
                    self.reset_from_provider();
                    return;
                }
                {
                    let mut state = self.inner.state.borrow_mut();
                    if state.phase != ConnectionPhase::Connected
                        || state.session.public_address() == Some(address.as_str())
                    {
                        return;
                    }
                    state.session = WalletSession::connected(address.clone());
                }
                info!("Wallet account changed to {}", address);
                self.notify();
                if let Some(spawner) = &self.inner.spawner {
                    spawner(Box::pin(self.refresh_task()));
                }
            }
        }
    }

    /// Fetches balances for the current (network, address) pair.
    ///
    /// The pair is captured when this is called, not when the future is first
    /// polled. The result is only applied if the pair is still live on arrival.
    pub fn refresh_balances(
        &self,
    ) -> impl Future<Output = Result<RefreshOutcome, FetchError>> + 'static {
        let captured = {
            let mut state = self.inner.state.borrow_mut();
            match state.session.public_address().map(str::to_string) {
                Some(address) => {
                    state.next_request += 1;
                    Ok((state.network, address, state.next_request))
                }
                None => Err(FetchError::NotConnected),
            }
        };
        self.clone().finish_refresh(captured)
    }

    async fn finish_refresh(
        self,
        captured: Result<(NetworkSelection, String, u64), FetchError>,
    ) -> Result<RefreshOutcome, FetchError> {
        let (selection, address, request) = captured?;
        let fetched = self.inner.balances.fetch(&selection, &address).await;

        {
            let mut state = self.inner.state.borrow_mut();
            let live = state.network == selection
                && state.session.public_address() == Some(address.as_str());
            if !live || request < state.applied_request {
                debug!(
                    "Discarding stale balances for {} on {}",
                    address,
                    selection.network()
                );
                return Ok(RefreshOutcome::Stale);
            }

            let balances = fetched.clone()?;
            state.applied_request = request;
            state.session.set_balances(balances);
        }

        self.notify();
        fetched.map(RefreshOutcome::Applied)
    }

    fn refresh_task(&self) -> impl Future<Output = ()> + 'static {
        let refresh = self.refresh_balances();
        async move {
            if let Err(e) = refresh.await {
                warn!("Balance refresh failed: {}", e);
            }
        }
    }

    async fn schedule_refresh(&self) {
        match &self.inner.spawner {
            Some(spawner) => spawner(Box::pin(self.refresh_task())),
            None => self.refresh_task().await,
        }
    }

    fn reset(&self) -> bool {
        let provider = match self.clear_session() {
            Some(provider) => provider,
            None => return false,
        };
        if let Some(provider) = provider {
            provider.disconnect();
        }
        self.finish_reset();
        true
    }

    fn reset_from_provider(&self) -> bool {
        if self.clear_session().is_none() {
            return false;
        }
        self.finish_reset();
        true
    }

    // Returns `None` when already disconnected, otherwise the provider to release.
    fn clear_session(&self) -> Option<Option<Rc<dyn WalletProvider>>> {
        let mut state = self.inner.state.borrow_mut();
        if state.phase == ConnectionPhase::Disconnected {
            return None;
        }
        state.phase = ConnectionPhase::Disconnected;
        state.session = WalletSession::default();
        state.attempt += 1;
        Some(state.provider.take())
    }

    fn finish_reset(&self) {
        if let Err(e) = self.inner.store.remove(&self.inner.config.wallet_key) {
            warn!("Failed to forget wallet: {}", e);
        }
        self.notify();
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.inner.store.set(key, value) {
            warn!("Failed to persist {}: {}", key, e);
        }
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        let listeners: Vec<Listener> = self.inner.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("snapshot", &self.snapshot())
            .field("registry", &self.inner.registry)
            .finish()
    }
}

/// Listener registration. Dropping it unsubscribes.
pub struct Subscription {
    inner: Weak<Inner>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.listeners.borrow_mut().remove(&self.id);
        }
    }
}
