use crate::client::RpcError;
use crate::directory::DirectoryError;
use crate::instance::InstanceId;
use crate::store::local_state::Seq;
use std::collections::HashMap;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GetOutput {
    /// None if the key is absent. An absent key is a normal reply, not an error.
    pub value: Option<String>,
    pub responder_id: InstanceId,
}

impl GetOutput {
    pub fn found(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PutInput {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PutOutput {
    pub responder_id: InstanceId,
}

#[derive(Debug, thiserror::Error)]
pub enum PutError {
    #[error("missing key")]
    EmptyKey,

    // Not a hard failure. The caller may retry once at `redirect_to`.
    #[error("I'm not primary")]
    NotPrimary(RedirectInfo),

    // Nothing was written.
    #[error("sequence numbers exhausted")]
    SequenceExhausted,

    // The write was already applied locally. We don't roll it back.
    #[error("failed to look up peers to replicate to: {0}")]
    DirectoryUnavailable(DirectoryError),

    // The write was already applied locally. We don't roll it back, so this node is now ahead of
    // `peer_id` until the next successful apply or snapshot.
    #[error("replicate to {peer_id}: {source}")]
    Replication { peer_id: InstanceId, source: ReplicateError },
}

/// RedirectInfo is what a non-primary knows about who the primary is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedirectInfo {
    pub responder_id: InstanceId,
    /// Best effort. None until the responder has resolved a primary.
    pub redirect_to: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplyInput {
    pub seq: Seq,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Eq, PartialEq)]
pub enum ApplyOutput {
    Applied,
    // Duplicate delivery. Nothing changed.
    AlreadyApplied,
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum ApplyError {
    // Only a snapshot re-sync recovers from this. We never buffer out-of-order writes.
    #[error("out of order apply: have={last_applied:?} got={received:?}")]
    OutOfOrder { last_applied: Seq, received: Seq },
}

/// Snapshot is the full key/value state of a primary at sequence `seq`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub seq: Seq,
    pub state: HashMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("not primary")]
    NotPrimary(RedirectInfo),
}

/// ReplicateError is how a single Apply to a peer can fail, as seen by the primary.
#[derive(Debug, thiserror::Error)]
pub enum ReplicateError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("peer rejected apply: {0}")]
    Rejected(ApplyError),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchSnapshotError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("snapshot source is not primary")]
    NotPrimary(RedirectInfo),
}

#[derive(Debug, thiserror::Error)]
pub enum RefreshRoleError {
    #[error("directory lookup failed: {0}")]
    Lookup(#[from] DirectoryError),
    #[error("bootstrap from primary at {primary_addr} failed: {source}")]
    Bootstrap {
        primary_addr: String,
        source: FetchSnapshotError,
    },
}
