use crate::client::RpcError;
use crate::instance::{Instance, InstanceId};

/// Directory maps a service name to the instances currently registered for it.
#[async_trait::async_trait]
pub trait Directory: Send + Sync {
    /// Add `instance` to `service`, replacing any instance registered with the same ID.
    async fn register(&self, service: &str, instance: Instance) -> Result<(), DirectoryError>;

    /// Remove instance `id` from `service`. Removing an unknown instance is not an error.
    async fn deregister(&self, service: &str, id: &InstanceId) -> Result<(), DirectoryError>;

    /// Return the instances of `service` ordered by ID, then address. The order is stable across
    /// calls with the same membership, which keeps round robin reproducible between sessions.
    async fn lookup(&self, service: &str) -> Result<Vec<Instance>, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("invalid directory request: {0}")]
    InvalidArgument(&'static str),
    #[error("directory unreachable: {0}")]
    Transport(#[from] RpcError),
}
