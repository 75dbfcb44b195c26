use std::fmt;

use dioxus::prelude::*;
use portal_api::prelude::*;

use super::storage::preference_store;
use super::wallets;

#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    Connect(ConnectError),
    Fetch(FetchError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Connect(e) => write!(f, "{}", e),
            SessionError::Fetch(e) => write!(f, "{}", e),
        }
    }
}

/// Handle shared through context. Rendering reads `snapshot`; actions go
/// through the coordinator.
#[derive(Clone, Copy)]
pub struct Session {
    pub(crate) coordinator: Signal<Option<Coordinator>>,
    pub snapshot: Signal<Snapshot>,
    pub last_error: Signal<Option<SessionError>>,
}

impl Session {
    fn coordinator(&self) -> Option<Coordinator> {
        self.coordinator.peek().clone()
    }

    pub async fn connect(self) {
        let Some(coordinator) = self.coordinator() else {
            return;
        };
        let mut last_error = self.last_error;
        match coordinator.connect().await {
            Ok(_) => last_error.set(None),
            Err(ConnectError::Aborted) => {}
            Err(e) => {
                if e.is_misuse() {
                    tracing::error!("Wallet connect misuse: {}", e);
                } else {
                    tracing::warn!("Wallet connection failed: {}", e);
                }
                last_error.set(Some(SessionError::Connect(e)));
            }
        }
    }

    pub fn disconnect(&self) {
        if let Some(coordinator) = self.coordinator() {
            coordinator.disconnect();
        }
        let mut last_error = self.last_error;
        last_error.set(None);
    }

    /// Returns `true` when the network actually changed.
    pub fn switch_network(&self, name: &str) -> bool {
        let Some(coordinator) = self.coordinator() else {
            return false;
        };
        match coordinator.switch_network_named(name) {
            Ok(changed) => changed,
            Err(e) => {
                // Only reachable if a control offers a value outside the table.
                tracing::error!("{}", e);
                false
            }
        }
    }

    pub async fn refresh(self) {
        let Some(coordinator) = self.coordinator() else {
            return;
        };
        let mut last_error = self.last_error;
        match coordinator.refresh_balances().await {
            Ok(RefreshOutcome::Applied(_)) => last_error.set(None),
            Ok(RefreshOutcome::Stale) => {}
            Err(FetchError::NotConnected) => {}
            Err(e) => {
                tracing::error!("Failed to fetch balances: {}", e);
                last_error.set(Some(SessionError::Fetch(e)));
            }
        }
    }
}

pub fn use_session() -> Session {
    use_context::<Session>()
}

/// Builds the coordinator. Only called on the client, after the first render.
pub fn build_coordinator() -> Coordinator {
    let builder = Coordinator::builder(preference_store()).registry(wallets::registry());

    #[cfg(feature = "web")]
    let builder = builder.spawner(|task| wasm_bindgen_futures::spawn_local(task));

    let coordinator = builder.build();
    wallets::watch(&coordinator);
    coordinator
}
