use crate::client::RpcError;
use crate::directory::{Directory, InMemoryDirectory};
use crate::instance::{Instance, InstanceId};
use crate::store::peer_client::PeerTransport;
use crate::store::store::{ReplicatedStore, StoreConfig};
use crate::store::store_api::{ApplyInput, FetchSnapshotError, ReplicateError, Snapshot, SnapshotError};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Weak};
use tokio::sync::Notify;
use tonic::Status;

/// InProcessPeers routes peer calls straight to other stores in the same process. Addresses can
/// be marked unreachable to simulate a dead backup, and applies can be held to simulate a slow one.
#[derive(Default)]
pub(crate) struct InProcessPeers {
    stores: RwLock<HashMap<String, Weak<ReplicatedStore>>>,
    unreachable: RwLock<HashSet<String>>,
    apply_gate: Mutex<Option<Arc<Notify>>>,
}

impl InProcessPeers {
    fn add(&self, addr: &str, store: &Arc<ReplicatedStore>) {
        self.stores.write().insert(addr.to_string(), Arc::downgrade(store));
    }

    pub(crate) fn set_unreachable(&self, addr: &str, unreachable: bool) {
        let mut set = self.unreachable.write();
        if unreachable {
            set.insert(addr.to_string());
        } else {
            set.remove(addr);
        }
    }

    /// Until `release_applies()`, every apply waits before reaching its peer.
    pub(crate) fn hold_applies(&self) {
        *self.apply_gate.lock() = Some(Arc::new(Notify::new()));
    }

    /// Let one held (or the next) apply through, and stop holding new ones.
    pub(crate) fn release_applies(&self) {
        if let Some(gate) = self.apply_gate.lock().take() {
            gate.notify_one();
        }
    }

    fn route(&self, addr: &str) -> Result<Arc<ReplicatedStore>, RpcError> {
        if self.unreachable.read().contains(addr) {
            return Err(RpcError::Call(Status::unavailable(format!("{} is unreachable", addr))));
        }

        self.stores
            .read()
            .get(addr)
            .and_then(Weak::upgrade)
            .ok_or_else(|| RpcError::Call(Status::unavailable(format!("nothing listening on {}", addr))))
    }
}

#[async_trait::async_trait]
impl PeerTransport for InProcessPeers {
    async fn apply(&self, peer: &Instance, input: ApplyInput) -> Result<(), ReplicateError> {
        let gate = self.apply_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let store = self.route(&peer.addr)?;
        store.apply(input).map(|_| ()).map_err(ReplicateError::Rejected)
    }

    async fn fetch_snapshot(&self, primary_addr: &str) -> Result<Snapshot, FetchSnapshotError> {
        let store = self.route(primary_addr)?;
        store.snapshot().map_err(|e| match e {
            SnapshotError::NotPrimary(info) => FetchSnapshotError::NotPrimary(info),
        })
    }
}

pub(crate) struct TestCluster {
    pub(crate) directory: Arc<InMemoryDirectory>,
    pub(crate) peers: Arc<InProcessPeers>,
    pub(crate) stores: HashMap<String, Arc<ReplicatedStore>>,
}

impl TestCluster {
    pub(crate) fn new() -> Self {
        TestCluster {
            directory: Arc::new(InMemoryDirectory::new()),
            peers: Arc::new(InProcessPeers::default()),
            stores: HashMap::new(),
        }
    }

    /// Create and register `kv1`..`kvN`.
    pub(crate) async fn with_members(num_members: usize) -> Self {
        let mut cluster = Self::new();
        for i in 1..=num_members {
            cluster.join(&format!("kv{}", i), None).await;
        }
        cluster
    }

    pub(crate) fn addr(id: &str) -> String {
        format!("{}:9301", id)
    }

    pub(crate) async fn join(&mut self, id: &str, forced_primary_id: Option<&str>) -> Arc<ReplicatedStore> {
        let store = Arc::new(ReplicatedStore::new(StoreConfig {
            logger: slog::Logger::root(slog::Discard, slog::o!()),
            my_instance_id: InstanceId::new(id),
            service: "kv".to_string(),
            forced_primary_id: forced_primary_id.map(InstanceId::new),
            directory: self.directory.clone(),
            peers: self.peers.clone(),
        }));

        let addr = Self::addr(id);
        self.peers.add(&addr, &store);
        self.directory
            .register("kv", Instance::new(id, addr, 1))
            .await
            .expect("in-memory register can't fail");
        self.stores.insert(id.to_string(), store.clone());

        store
    }

    pub(crate) fn store(&self, id: &str) -> &Arc<ReplicatedStore> {
        self.stores.get(id).expect("unknown store")
    }

    /// Refresh roles in ID order, so the primary knows it's primary before backups pull from it.
    pub(crate) async fn refresh_all(&self) {
        let mut ids: Vec<_> = self.stores.keys().cloned().collect();
        ids.sort();
        for id in ids {
            self.store(&id).refresh_role().await.expect("refresh failed");
        }
    }
}
