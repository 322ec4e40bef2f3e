mod directory_server;
mod kv_server;
mod shutdown;

pub use directory_server::DirectoryRpcServer;
pub use kv_server::KvRpcServer;
pub use shutdown::shutdown_signal;
pub use shutdown::RpcServerShutdownHandle;
pub use shutdown::RpcServerShutdownSignal;
