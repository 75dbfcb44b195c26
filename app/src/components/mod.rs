mod layout;
mod balance_panel;
mod network_switch;
mod session_gate;
mod wallet_button;

pub use layout::Layout;
pub use balance_panel::BalancePanel;
pub use network_switch::NetworkSwitch;
pub use session_gate::SessionGate;
pub use wallet_button::WalletButton;
