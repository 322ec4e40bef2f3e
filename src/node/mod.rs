mod options;
mod wiring;

pub use options::NodeOptions;
pub use wiring::start_directory;
pub use wiring::start_kv_node;
pub use wiring::DirectoryNode;
pub use wiring::DirectoryNodeConfig;
pub use wiring::KvNode;
pub use wiring::KvNodeConfig;
pub use wiring::NodeStartError;
