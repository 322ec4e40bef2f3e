use crate::client::RpcError;
use crate::directory::{Directory, DirectoryClient, DirectoryError, InMemoryDirectory};
use crate::instance::{Instance, InstanceId};
use crate::node::options::NodeOptionsValidated;
use crate::node::NodeOptions;
use crate::server::{self, DirectoryRpcServer, KvRpcServer, RpcServerShutdownHandle};
use crate::store::{GrpcPeerTransport, ReplicatedStore, RoleRefreshHandle, StoreConfig};
use std::convert::TryFrom;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

pub struct KvNodeConfig {
    pub logger: slog::Logger,
    pub instance_id: String,
    pub listen_addr: SocketAddr,
    /// What we register in the directory. Peers and clients dial this.
    pub public_addr: String,
    pub directory_addr: String,
    pub service: String,
    pub weight: i64,
    pub forced_primary_id: Option<String>,
    pub options: NodeOptions,
}

pub struct DirectoryNodeConfig {
    pub logger: slog::Logger,
    pub listen_addr: SocketAddr,
    pub options: NodeOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum NodeStartError {
    #[error("Illegal node options: {0}")]
    IllegalOptions(String),
    #[error("failed to connect to directory: {0}")]
    DirectoryConnect(RpcError),
    #[error("failed to register with directory: {0}")]
    Register(DirectoryError),
}

/// KvNode is a running KV server: store, gRPC server, directory registration and role refresh.
pub struct KvNode {
    logger: slog::Logger,
    service: String,
    store: Arc<ReplicatedStore>,
    directory: DirectoryClient,
    role_refresh: RoleRefreshHandle,
    server: RunningServer,
}

/// DirectoryNode is a running directory gRPC server.
pub struct DirectoryNode {
    directory: Arc<InMemoryDirectory>,
    server: RunningServer,
}

struct RunningServer {
    logger: slog::Logger,
    shutdown_handle: RpcServerShutdownHandle,
    join_handle: JoinHandle<()>,
    grace_period: Duration,
}

pub async fn start_kv_node(config: KvNodeConfig) -> Result<KvNode, NodeStartError> {
    let options = NodeOptionsValidated::try_from(config.options)
        .map_err(|e| NodeStartError::IllegalOptions(e.to_string()))?;

    let my_instance_id = InstanceId::new(config.instance_id);
    let logger = config
        .logger
        .new(slog::o!("InstanceId" => my_instance_id.to_string()));

    let directory = DirectoryClient::connect(logger.clone(), &config.directory_addr)
        .await
        .map_err(NodeStartError::DirectoryConnect)?;

    let store = Arc::new(ReplicatedStore::new(StoreConfig {
        logger: logger.clone(),
        my_instance_id: my_instance_id.clone(),
        service: config.service.clone(),
        forced_primary_id: config.forced_primary_id.map(InstanceId::new),
        directory: Arc::new(directory.clone()),
        peers: Arc::new(GrpcPeerTransport::new(logger.clone())),
    }));

    let (shutdown_handle, shutdown_signal) = server::shutdown_signal();
    let kv_server = KvRpcServer::new(logger.clone(), store.clone());
    let join_handle = tokio::spawn(kv_server.run(config.listen_addr, shutdown_signal));
    let server = RunningServer {
        logger: logger.clone(),
        shutdown_handle,
        join_handle,
        grace_period: options.shutdown_grace_period,
    };

    // On failure `server` is dropped, which drops the shutdown handle and stops the server.
    let instance = registration(&my_instance_id, config.public_addr, config.weight);
    slog::info!(logger, "Registering {:?} as {:?}", instance, config.service);
    directory
        .register(&config.service, instance)
        .await
        .map_err(NodeStartError::Register)?;

    let role_refresh = RoleRefreshHandle::spawn_refresh_task(logger.clone(), &store, options.role_refresh_interval);

    Ok(KvNode {
        logger,
        service: config.service,
        store,
        directory,
        role_refresh,
        server,
    })
}

pub fn start_directory(config: DirectoryNodeConfig) -> Result<DirectoryNode, NodeStartError> {
    let options = NodeOptionsValidated::try_from(config.options)
        .map_err(|e| NodeStartError::IllegalOptions(e.to_string()))?;

    let directory = Arc::new(InMemoryDirectory::new());
    let (shutdown_handle, shutdown_signal) = server::shutdown_signal();
    let directory_server = DirectoryRpcServer::new(config.logger.clone(), directory.clone());
    let join_handle = tokio::spawn(directory_server.run(config.listen_addr, shutdown_signal));

    Ok(DirectoryNode {
        directory,
        server: RunningServer {
            logger: config.logger,
            shutdown_handle,
            join_handle,
            grace_period: options.shutdown_grace_period,
        },
    })
}

/// What a KV node registers as. Peers and clients only ever see this.
fn registration(my_instance_id: &InstanceId, public_addr: String, weight: i64) -> Instance {
    Instance {
        id: my_instance_id.clone(),
        addr: public_addr,
        weight,
        meta: Default::default(),
    }
    .with_meta("kind", "kv")
}

impl KvNode {
    pub fn store(&self) -> &Arc<ReplicatedStore> {
        &self.store
    }

    pub fn instance_id(&self) -> &InstanceId {
        self.store.instance_id()
    }

    /// Leave the directory, stop refreshing our role, then stop the server.
    pub async fn shutdown(self) {
        if let Err(e) = self.directory.deregister(&self.service, self.store.instance_id()).await {
            slog::warn!(self.logger, "Failed to deregister: {}", e);
        }
        drop(self.role_refresh);

        self.server.shutdown().await;
    }
}

impl DirectoryNode {
    pub fn directory(&self) -> &Arc<InMemoryDirectory> {
        &self.directory
    }

    pub async fn shutdown(self) {
        self.server.shutdown().await;
    }
}

impl RunningServer {
    /// Stop accepting requests and wait up to the grace period for in-flight ones.
    async fn shutdown(self) {
        self.shutdown_handle.shutdown();

        let mut join_handle = self.join_handle;
        match tokio::time::timeout(self.grace_period, &mut join_handle).await {
            Ok(_) => slog::info!(self.logger, "Server stopped"),
            Err(_) => {
                slog::warn!(
                    self.logger,
                    "Server didn't stop within {:?}, aborting",
                    self.grace_period
                );
                join_handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_carries_identity_and_kind() {
        let instance = registration(&InstanceId::new("kv7"), "10.0.0.7:9301".to_string(), 3);

        assert_eq!(InstanceId::new("kv7"), instance.id);
        assert_eq!("10.0.0.7:9301", instance.addr);
        assert_eq!(3, instance.weight);
        assert_eq!(Some(&"kv".to_string()), instance.meta.get("kind"));
        assert_eq!(1, instance.meta.len());
    }
}
