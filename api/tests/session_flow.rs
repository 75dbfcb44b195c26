use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use portal_api::prelude::*;
use rust_decimal::Decimal;

const ADDRESS: &str = "Car9HG6v2xL2DdVjhVm34MbwUYL12mgCVc1Y4w5uFHys";

struct Extension;

#[async_trait(?Send)]
impl WalletProvider for Extension {
    fn name(&self) -> &'static str {
        "phantom"
    }

    fn probe(&self) -> bool {
        true
    }

    async fn connect(&self) -> Result<String, ConnectError> {
        Ok(ADDRESS.to_string())
    }

    fn disconnect(&self) {}
}

/// Reports the token balance as 100 on mainnet and 5 on testnet.
#[derive(Default)]
struct Chain {
    held: RefCell<VecDeque<oneshot::Receiver<()>>>,
}

#[async_trait(?Send)]
impl BalanceSource for Chain {
    async fn fetch(
        &self,
        selection: &NetworkSelection,
        _address: &str,
    ) -> Result<Balances, FetchError> {
        let held = self.held.borrow_mut().pop_front();
        if let Some(release) = held {
            release.await.ok();
        }
        let amount = if selection.is_mainnet() { 100 } else { 5 };
        Ok(Balances::from([(TOKEN_SYMBOL.to_string(), Decimal::from(amount))]))
    }
}

fn coordinator(store: Rc<MemoryStore>, chain: Rc<Chain>) -> Coordinator {
    Coordinator::builder(store)
        .registry(ProviderRegistry::new().register(Rc::new(Extension)))
        .balance_source(chain)
        .build()
}

#[tokio::test]
async fn switching_away_drops_in_flight_mainnet_balances() {
    let store = Rc::new(MemoryStore::with(NETWORK_KEY, "mainnet"));
    let chain = Rc::new(Chain::default());
    let coordinator = coordinator(store.clone(), chain.clone());

    let selection = coordinator.current_network();
    assert_eq!(selection.network(), Network::Mainnet);
    assert_eq!(selection.endpoint(), "https://api.mainnet-beta.solana.com");

    coordinator.connect().await.unwrap();
    assert_eq!(
        coordinator.session().balance(TOKEN_SYMBOL),
        Some(Decimal::from(100))
    );

    let (release, held) = oneshot::channel();
    chain.held.borrow_mut().push_back(held);
    let in_flight = coordinator.refresh_balances();

    coordinator.switch_network(Network::Testnet);
    release.send(()).unwrap();

    assert_eq!(in_flight.await, Ok(RefreshOutcome::Stale));
    assert!(coordinator.session().balances().is_empty());

    coordinator.refresh_balances().await.unwrap();
    assert_eq!(
        coordinator.session().balance(TOKEN_SYMBOL),
        Some(Decimal::from(5))
    );
    assert_eq!(store.get(NETWORK_KEY).as_deref(), Some("testnet"));
}

#[tokio::test]
async fn preferences_survive_a_reload() {
    let store = Rc::new(MemoryStore::new());
    let chain = Rc::new(Chain::default());

    let first = coordinator(store.clone(), chain.clone());
    first.switch_network(Network::Mainnet);
    first.connect().await.unwrap();
    drop(first);

    let reloaded = coordinator(store.clone(), chain.clone());
    assert!(reloaded.is_mainnet());
    assert_eq!(reloaded.remembered_provider().as_deref(), Some("phantom"));
    // Session state itself is never restored without a new connect.
    assert!(!reloaded.session().is_connected());

    reloaded.connect().await.unwrap();
    reloaded.disconnect();
    assert_eq!(reloaded.remembered_provider(), None);
}

#[tokio::test]
async fn consumers_track_every_transition() {
    let store = Rc::new(MemoryStore::new());
    let coordinator = coordinator(store, Rc::new(Chain::default()));
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let subscription = coordinator.subscribe(move |snapshot| {
        sink.borrow_mut().push((
            snapshot.phase,
            snapshot.network.network(),
            snapshot.session.balances().len(),
        ));
    });

    coordinator.connect().await.unwrap();
    coordinator.switch_network(Network::Mainnet);
    coordinator.disconnect();
    drop(subscription);
    coordinator.switch_network(Network::Testnet);

    assert_eq!(
        *log.borrow(),
        vec![
            (ConnectionPhase::Connecting, Network::Testnet, 0),
            (ConnectionPhase::Connected, Network::Testnet, 0),
            (ConnectionPhase::Connected, Network::Testnet, 1),
            (ConnectionPhase::Connected, Network::Mainnet, 0),
            (ConnectionPhase::Disconnected, Network::Mainnet, 0),
        ]
    );
}
