use dioxus::prelude::*;
use portal_api::prelude::*;

use crate::hooks::use_session;

#[component]
pub fn NetworkSwitch() -> Element {
    let session = use_session();
    let current = session.snapshot.read().network.network();

    let on_change = move |evt: Event<FormData>| {
        let changed = session.switch_network(&evt.value());
        // Balances were cleared with the switch; fetch them for the new network.
        if changed && session.snapshot.peek().session.is_connected() {
            spawn(session.refresh());
        }
    };

    rsx! {
        select {
            class: "bg-transparent border elevated-border rounded px-2 py-1 text-sm text-mid",
            value: "{current}",
            onchange: on_change,
            for network in Network::ALL {
                option {
                    key: "{network}",
                    value: "{network}",
                    selected: network == current,
                    "{network.label()}"
                }
            }
        }
    }
}
