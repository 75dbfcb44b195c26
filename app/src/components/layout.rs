use dioxus::prelude::*;
use crate::route::Route;
use crate::components::{NetworkSwitch, WalletButton};
use crate::hooks::use_session;

#[component]
pub fn Layout() -> Element {
    let session = use_session();
    let endpoint = session.snapshot.read().network.endpoint();

    rsx! {
        div { class: "min-h-screen",
            style: "background-color: var(--surface-base);",
            // Navigation
            nav { class: "border-b elevated-border backdrop-blur sticky top-0 z-50",
                style: "background-color: var(--surface-base);",
                div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8",
                    div { class: "flex justify-between h-16",
                        div { class: "flex items-center",
                            Link { to: Route::Home {}, class: "flex items-center space-x-2",
                                span { class: "text-2xl font-bold text-gold", "PORTAL" }
                            }
                        }

                        // Nav links
                        div { class: "hidden sm:flex sm:items-center sm:space-x-8",
                            NavLink { to: Route::Home {}, label: "Overview" }
                            NavLink { to: Route::Wallet {}, label: "Wallet" }
                        }

                        // Network and wallet controls
                        div { class: "flex items-center space-x-3",
                            NetworkSwitch {}
                            WalletButton {}
                        }
                    }
                }
            }

            // Main content
            main { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8",
                Outlet::<Route> {}
            }

            // Footer
            footer { class: "border-t elevated-border py-8 mt-auto",
                div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 text-center text-low",
                    p { "Portal on Solana" }
                    p { class: "text-sm mt-2",
                        "RPC: "
                        code { class: "text-gold", "{endpoint}" }
                    }
                }
            }
        }
    }
}

#[component]
fn NavLink(to: Route, label: &'static str) -> Element {
    rsx! {
        Link {
            to: to,
            class: "text-mid hover:text-gold px-3 py-2 text-sm font-medium transition-colors",
            "{label}"
        }
    }
}
