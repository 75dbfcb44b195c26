use std::rc::Rc;

use async_trait::async_trait;
use portal_api::prelude::*;

/// A wallet that injects itself into `window` under a global name.
#[derive(Clone, Copy, Debug)]
pub struct InjectedWallet {
    name: &'static str,
    global: &'static str,
    flag: &'static str,
    install_url: &'static str,
}

pub const PHANTOM: InjectedWallet = InjectedWallet {
    name: "phantom",
    global: "solana",
    flag: "isPhantom",
    install_url: "https://phantom.app/",
};

pub const SOLFLARE: InjectedWallet = InjectedWallet {
    name: "solflare",
    global: "solflare",
    flag: "isSolflare",
    install_url: "https://solflare.com/",
};

pub const WALLETS: [InjectedWallet; 2] = [PHANTOM, SOLFLARE];

impl InjectedWallet {
    pub fn label(&self) -> &'static str {
        match self.name {
            "phantom" => "Phantom",
            "solflare" => "Solflare",
            other => other,
        }
    }

    pub fn install_url(&self) -> &'static str {
        self.install_url
    }
}

pub fn registry() -> ProviderRegistry {
    WALLETS
        .into_iter()
        .fold(ProviderRegistry::new(), |registry, wallet| {
            registry.register(Rc::new(wallet))
        })
}

#[async_trait(?Send)]
impl WalletProvider for InjectedWallet {
    fn name(&self) -> &'static str {
        self.name
    }

    #[cfg(feature = "web")]
    fn probe(&self) -> bool {
        web::handle(self).is_some()
    }

    #[cfg(not(feature = "web"))]
    fn probe(&self) -> bool {
        false
    }

    #[cfg(feature = "web")]
    async fn connect(&self) -> Result<String, ConnectError> {
        web::connect(self).await
    }

    #[cfg(not(feature = "web"))]
    async fn connect(&self) -> Result<String, ConnectError> {
        Err(ConnectError::ProviderUnavailable)
    }

    fn disconnect(&self) {
        #[cfg(feature = "web")]
        {
            web::disconnect(self);
        }
    }
}

/// Forwards lock and account-switch events from the wallets to the coordinator.
pub fn watch(coordinator: &Coordinator) {
    #[cfg(feature = "web")]
    {
        for wallet in WALLETS {
            web::watch(&wallet, coordinator);
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = coordinator;
    }
}

#[cfg(feature = "web")]
mod web {
    use js_sys::{Function, Promise, Reflect};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use super::InjectedWallet;
    use portal_api::prelude::*;

    // EIP-1193 style code used by Solana wallets for a declined request.
    const USER_REJECTED_CODE: f64 = 4001.0;

    pub fn handle(wallet: &InjectedWallet) -> Option<JsValue> {
        let window = web_sys::window()?;
        let handle = Reflect::get(&window, &JsValue::from_str(wallet.global)).ok()?;
        if handle.is_undefined() || handle.is_null() {
            return None;
        }
        let flagged = Reflect::get(&handle, &JsValue::from_str(wallet.flag))
            .ok()?
            .as_bool()
            .unwrap_or(false);
        flagged.then_some(handle)
    }

    fn method(handle: &JsValue, name: &str) -> Option<Function> {
        Reflect::get(handle, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    fn rejection(err: JsValue) -> ConnectError {
        let code = Reflect::get(&err, &JsValue::from_str("code"))
            .ok()
            .and_then(|code| code.as_f64());
        match code {
            Some(code) if code == USER_REJECTED_CODE => ConnectError::UserRejected,
            _ => ConnectError::Provider(format!("{:?}", err)),
        }
    }

    fn key_to_string(key: &JsValue) -> Option<String> {
        if key.is_undefined() || key.is_null() {
            return None;
        }
        method(key, "toString")?.call0(key).ok()?.as_string()
    }

    pub async fn connect(wallet: &InjectedWallet) -> Result<String, ConnectError> {
        let handle = handle(wallet).ok_or(ConnectError::ProviderUnavailable)?;

        let connect_fn = method(&handle, "connect")
            .ok_or_else(|| ConnectError::Provider("No connect method".to_string()))?;

        let promise: Promise = connect_fn
            .call0(&handle)
            .map_err(rejection)?
            .dyn_into()
            .map_err(|_| ConnectError::Provider("connect did not return a promise".to_string()))?;

        JsFuture::from(promise).await.map_err(rejection)?;

        // Phantom also returns the key, Solflare only sets it on the object.
        let public_key = Reflect::get(&handle, &JsValue::from_str("publicKey"))
            .map_err(|_| ConnectError::Provider("No publicKey after connect".to_string()))?;

        key_to_string(&public_key)
            .ok_or_else(|| ConnectError::Provider("Public key not a string".to_string()))
    }

    pub fn disconnect(wallet: &InjectedWallet) {
        let Some(handle) = handle(wallet) else {
            return;
        };
        if let Some(disconnect_fn) = method(&handle, "disconnect") {
            if let Err(e) = disconnect_fn.call0(&handle) {
                tracing::warn!("{} disconnect failed: {:?}", wallet.name, e);
            }
        }
    }

    pub fn watch(wallet: &InjectedWallet, coordinator: &Coordinator) {
        let Some(handle) = handle(wallet) else {
            return;
        };
        let Some(on) = method(&handle, "on") else {
            return;
        };
        let name = wallet.name;

        let target = coordinator.clone();
        let on_disconnect = Closure::<dyn FnMut()>::new(move || {
            if target.active_provider() == Some(name) {
                target.handle_provider_event(ProviderEvent::Disconnected);
            }
        });

        let target = coordinator.clone();
        let on_account = Closure::<dyn FnMut(JsValue)>::new(move |key: JsValue| {
            if target.active_provider() == Some(name) {
                target.handle_provider_event(ProviderEvent::AccountChanged(key_to_string(&key)));
            }
        });

        for (event, listener) in [
            ("disconnect", on_disconnect.as_ref()),
            ("accountChanged", on_account.as_ref()),
        ] {
            if let Err(e) = on.call2(&handle, &JsValue::from_str(event), listener.unchecked_ref()) {
                tracing::warn!("{} {} listener not registered: {:?}", wallet.name, event, e);
            }
        }

        // Listeners live as long as the page.
        on_disconnect.forget();
        on_account.forget();
    }
}
