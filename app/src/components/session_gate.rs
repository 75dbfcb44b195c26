use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use portal_api::prelude::*;

use crate::hooks::{build_coordinator, Session, SessionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GatePhase {
    /// First render, before the coordinator has read storage.
    Unknown,
    Known,
}

/// Owns the coordinator and renders `children` once the session is known.
///
/// The first render never touches storage or wallets, so it is identical on
/// the server and the client.
#[component]
pub fn SessionGate(children: Element) -> Element {
    let mut phase = use_signal(|| GatePhase::Unknown);
    let mut coordinator = use_signal(|| None::<Coordinator>);
    let mut snapshot = use_signal(Snapshot::default);
    let last_error = use_signal(|| None::<SessionError>);
    let session = use_context_provider(|| Session {
        coordinator,
        snapshot,
        last_error,
    });

    // Dropped with the gate, which unsubscribes.
    let subscription = use_hook(|| Rc::new(RefCell::new(None::<Subscription>)));

    use_effect(move || {
        if *phase.peek() == GatePhase::Known {
            return;
        }

        let built = build_coordinator();
        snapshot.set(built.snapshot());
        let listener = built.subscribe(move |update| {
            let mut snapshot = snapshot;
            snapshot.set(update.clone());
        });
        *subscription.borrow_mut() = Some(listener);

        let remembered = built.remembered_provider();
        coordinator.set(Some(built));
        phase.set(GatePhase::Known);

        if let Some(name) = remembered {
            tracing::debug!("Reconnecting remembered wallet {}", name);
            spawn(session.connect());
        }
    });

    match phase() {
        GatePhase::Unknown => rsx! {
            div { class: "min-h-screen flex items-center justify-center",
                style: "background-color: var(--surface-base);",
                span { class: "text-low animate-pulse", "Loading..." }
            }
        },
        GatePhase::Known => rsx! {
            {children}
        },
    }
}
