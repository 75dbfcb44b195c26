use dioxus::prelude::*;

use crate::hooks::{use_session, SessionError};

/// Balances of the connected wallet on the active network, with a retry
/// affordance when the last fetch failed.
#[component]
pub fn BalancePanel() -> Element {
    let session = use_session();
    let snapshot = session.snapshot.read();
    let last_error = session.last_error.read().clone();

    if !snapshot.session.is_connected() {
        return rsx! {
            div { class: "card text-center text-low", "Connect a wallet to see balances." }
        };
    }

    let refresh = move |_| {
        spawn(session.refresh());
    };

    let network = snapshot.network.network().label();
    let balances: Vec<(String, String)> = snapshot
        .session
        .balances()
        .iter()
        .map(|(symbol, amount)| (symbol.clone(), amount.normalize().to_string()))
        .collect();

    rsx! {
        div { class: "card space-y-4",
            div { class: "flex justify-between items-center",
                h3 { class: "text-lg font-semibold text-gold", "Balances on {network}" }
                button { class: "btn btn-secondary text-sm", onclick: refresh, "Refresh" }
            }

            if let Some(SessionError::Fetch(error)) = last_error {
                div { class: "text-sm text-red-400 flex justify-between items-center",
                    span { "{error}" }
                    if error.is_retryable() {
                        button { class: "btn btn-secondary text-xs", onclick: refresh, "Retry" }
                    }
                }
            }

            if balances.is_empty() {
                p { class: "text-low animate-pulse", "Fetching balances..." }
            } else {
                table { class: "w-full text-left",
                    tbody {
                        for (symbol, amount) in balances {
                            tr { key: "{symbol}",
                                td { class: "py-1 text-mid", "{symbol}" }
                                td { class: "py-1 text-right font-mono", "{amount}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
