use dioxus::prelude::*;
use futures::StreamExt;
use portal_api::prelude::*;

use crate::hooks::{use_session, SessionError, WALLETS};

#[derive(Clone)]
enum WalletAction {
    Connect,
}

#[component]
pub fn WalletButton() -> Element {
    let session = use_session();

    // Use coroutine for lifecycle-safe async operations
    let wallet_coro = use_coroutine(move |mut rx: UnboundedReceiver<WalletAction>| {
        async move {
            while let Some(action) = rx.next().await {
                match action {
                    WalletAction::Connect => session.connect().await,
                }
            }
        }
    });

    let connect_wallet = move |_| {
        wallet_coro.send(WalletAction::Connect);
    };

    let disconnect_wallet = move |_| {
        session.disconnect();
    };

    let snapshot = session.snapshot.read();
    let last_error = session.last_error.read().clone();

    match snapshot.phase {
        ConnectionPhase::Connected => {
            let short = snapshot.session.short_address().unwrap_or_default();
            rsx! {
                div { class: "flex items-center space-x-2",
                    span { class: "text-sm text-gray-400 font-mono", "{short}" }
                    button {
                        class: "btn btn-secondary text-sm",
                        onclick: disconnect_wallet,
                        "Disconnect"
                    }
                }
            }
        }
        ConnectionPhase::Connecting => rsx! {
            button {
                class: "btn btn-primary opacity-60 cursor-wait",
                disabled: true,
                "Connecting..."
            }
        },
        ConnectionPhase::Disconnected => rsx! {
            div { class: "flex items-center space-x-2",
                if let Some(SessionError::Connect(error)) = last_error {
                    ConnectErrorHint { error }
                }
                button {
                    class: "btn btn-primary",
                    onclick: connect_wallet,
                    "Connect Wallet"
                }
            }
        },
    }
}

#[component]
fn ConnectErrorHint(error: ConnectError) -> Element {
    match error {
        ConnectError::ProviderUnavailable => rsx! {
            span { class: "text-sm text-low",
                "No wallet found. Install "
                for (i, wallet) in WALLETS.iter().enumerate() {
                    if i > 0 { " or " }
                    a {
                        key: "{wallet.label()}",
                        class: "text-gold hover:underline",
                        href: wallet.install_url(),
                        target: "_blank",
                        "{wallet.label()}"
                    }
                }
            }
        },
        other => rsx! {
            span { class: "text-sm text-red-400", "{other}" }
        },
    }
}
