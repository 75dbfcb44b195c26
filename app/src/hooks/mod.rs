mod storage;
mod use_session;
mod wallets;

pub use use_session::{build_coordinator, use_session, Session, SessionError};
pub use wallets::WALLETS;
