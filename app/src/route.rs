use dioxus::prelude::*;

use crate::pages::{Home, Wallet};
use crate::components::Layout;

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Home {},
    #[route("/wallet")]
    Wallet {},
}
