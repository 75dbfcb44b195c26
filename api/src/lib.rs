pub mod consts;
pub mod coordinator;
pub mod error;
pub mod network;
pub mod provider;
pub mod rpc;
pub mod session;
pub mod storage;
pub mod time;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::coordinator::*;
    pub use crate::error::*;
    pub use crate::network::*;
    pub use crate::provider::*;
    pub use crate::rpc::*;
    pub use crate::session::*;
    pub use crate::storage::*;
}
