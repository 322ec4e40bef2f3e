mod client;
mod directory;
mod instance;
mod node;
mod picker;
mod server;
mod store;
mod grpc {
    include!("../generated/replikv.rs");
}

pub use client::ClientSession;
pub use client::GetOutcome;
pub use client::KvClient;
pub use client::PutOutcome;
pub use client::RemotePutError;
pub use client::RpcError;
pub use client::SessionError;
pub use directory::Directory;
pub use directory::DirectoryClient;
pub use directory::DirectoryError;
pub use directory::InMemoryDirectory;
pub use instance::Instance;
pub use instance::InstanceId;
pub use node::start_directory;
pub use node::start_kv_node;
pub use node::DirectoryNode;
pub use node::DirectoryNodeConfig;
pub use node::KvNode;
pub use node::KvNodeConfig;
pub use node::NodeOptions;
pub use node::NodeStartError;
pub use picker::create_picker;
pub use picker::PickError;
pub use picker::Picker;
pub use picker::PickerAlgorithm;
pub use picker::UnknownAlgorithmError;
pub use store::ApplyError;
pub use store::ApplyInput;
pub use store::ApplyOutput;
pub use store::FetchSnapshotError;
pub use store::GetOutput;
pub use store::GrpcPeerTransport;
pub use store::PeerTransport;
pub use store::PutError;
pub use store::PutInput;
pub use store::PutOutput;
pub use store::RedirectInfo;
pub use store::RefreshRoleError;
pub use store::ReplicateError;
pub use store::ReplicatedStore;
pub use store::Role;
pub use store::RoleRefreshHandle;
pub use store::RoleState;
pub use store::Seq;
pub use store::Snapshot;
pub use store::SnapshotError;
pub use store::StoreConfig;
