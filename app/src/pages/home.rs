use dioxus::prelude::*;
use crate::components::BalancePanel;
use crate::hooks::use_session;

#[component]
pub fn Home() -> Element {
    let session = use_session();
    let snapshot = session.snapshot.read();
    let network = snapshot.network;
    let token_link = network.explorer_address_url(network.token_address());

    rsx! {
        div { class: "max-w-4xl mx-auto py-12 space-y-8",
            h1 { class: "text-4xl font-bold text-center",
                span { class: "text-gold", "PORTAL" }
                span { class: "text-gray-100", " on {network.network().label()}" }
            }

            div { class: "card space-y-3",
                h3 { class: "text-lg font-semibold text-gold", "Network" }
                InfoRow { label: "Cluster", value: network.network().label().to_string() }
                InfoRow { label: "RPC endpoint", value: network.endpoint().to_string() }
                div { class: "flex justify-between text-sm",
                    span { class: "text-low", "Token" }
                    a {
                        class: "font-mono text-gold hover:underline",
                        href: "{token_link}",
                        target: "_blank",
                        "{network.token_address()}"
                    }
                }
                div { class: "flex justify-between text-sm",
                    span { class: "text-low", "Explorer" }
                    a {
                        class: "text-gold hover:underline",
                        href: network.explorer_url(),
                        target: "_blank",
                        "{network.explorer_url()}"
                    }
                }
            }

            if network.is_mainnet() {
                p { class: "text-sm text-center text-amber-400",
                    "You are on mainnet. Transactions use real funds."
                }
            }

            BalancePanel {}
        }
    }
}

#[component]
fn InfoRow(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "flex justify-between text-sm",
            span { class: "text-low", "{label}" }
            span { class: "font-mono text-mid", "{value}" }
        }
    }
}
