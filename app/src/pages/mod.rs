mod home;
mod wallet;

pub use home::Home;
pub use wallet::Wallet;
