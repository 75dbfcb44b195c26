use dioxus::prelude::*;
use portal_api::prelude::*;

use crate::components::BalancePanel;
use crate::hooks::use_session;

#[component]
pub fn Wallet() -> Element {
    let session = use_session();
    let snapshot = session.snapshot.read();

    let address = match snapshot.session.public_address() {
        Some(address) => address.to_string(),
        None => {
            return rsx! {
                div { class: "max-w-xl mx-auto py-16 text-center text-low",
                    "Connect a wallet from the top bar to view your account."
                }
            };
        }
    };
    let explorer = snapshot.network.explorer_address_url(&address);
    let short = short_address(&address);

    rsx! {
        div { class: "max-w-4xl mx-auto py-12 space-y-6",
            div { class: "card flex justify-between items-center",
                div {
                    p { class: "text-low text-sm", "Account" }
                    p { class: "font-mono text-mid", title: "{address}", "{short}" }
                }
                a {
                    class: "btn btn-secondary text-sm",
                    href: "{explorer}",
                    target: "_blank",
                    "View on explorer"
                }
            }

            BalancePanel {}
        }
    }
}
