mod local_state;
mod peer_client;
mod role;
mod role_refresh;
mod store;
mod store_api;
#[cfg(test)]
mod test_utils;

pub use local_state::Seq;
pub use peer_client::GrpcPeerTransport;
pub use peer_client::PeerTransport;
pub use role::Role;
pub use role::RoleState;
pub use role_refresh::RoleRefreshHandle;
pub use store::ReplicatedStore;
pub use store::StoreConfig;
pub use store_api::ApplyError;
pub use store_api::ApplyInput;
pub use store_api::ApplyOutput;
pub use store_api::FetchSnapshotError;
pub use store_api::GetOutput;
pub use store_api::PutError;
pub use store_api::PutInput;
pub use store_api::PutOutput;
pub use store_api::RedirectInfo;
pub use store_api::RefreshRoleError;
pub use store_api::ReplicateError;
pub use store_api::Snapshot;
pub use store_api::SnapshotError;
