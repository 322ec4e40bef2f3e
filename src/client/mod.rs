mod connect;
mod kv_client;
mod session;

pub(crate) use connect::connect;
pub use connect::RpcError;
pub use kv_client::KvClient;
pub use kv_client::RemotePutError;
pub use session::ClientSession;
pub use session::GetOutcome;
pub use session::PutOutcome;
pub use session::SessionError;
