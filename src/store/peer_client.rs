use crate::client::KvClient;
use crate::instance::Instance;
use crate::store::store_api::{ApplyInput, FetchSnapshotError, ReplicateError, Snapshot};

/// PeerTransport is how a store reaches the other instances of its service.
///
/// Calls carry no timeout. A peer that never answers blocks the caller.
#[async_trait::async_trait]
pub trait PeerTransport: Send + Sync {
    /// Primary -> backup. Ok only if the peer acknowledged the write.
    async fn apply(&self, peer: &Instance, input: ApplyInput) -> Result<(), ReplicateError>;

    /// Backup -> primary.
    async fn fetch_snapshot(&self, primary_addr: &str) -> Result<Snapshot, FetchSnapshotError>;
}

/// GrpcPeerTransport dials the peer for every call and drops the connection afterwards.
pub struct GrpcPeerTransport {
    logger: slog::Logger,
}

impl GrpcPeerTransport {
    pub fn new(logger: slog::Logger) -> Self {
        GrpcPeerTransport { logger }
    }
}

#[async_trait::async_trait]
impl PeerTransport for GrpcPeerTransport {
    async fn apply(&self, peer: &Instance, input: ApplyInput) -> Result<(), ReplicateError> {
        let logger = self.logger.new(slog::o!("Peer" => peer.id.to_string()));
        let client = KvClient::connect(logger, &peer.addr).await?;
        client.apply(input).await
    }

    async fn fetch_snapshot(&self, primary_addr: &str) -> Result<Snapshot, FetchSnapshotError> {
        let logger = self.logger.new(slog::o!("Peer" => primary_addr.to_string()));
        let client = KvClient::connect(logger, primary_addr).await?;
        client.snapshot().await
    }
}
