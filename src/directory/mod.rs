mod client;
mod directory_api;
mod in_memory;

pub use client::DirectoryClient;
pub use directory_api::Directory;
pub use directory_api::DirectoryError;
pub use in_memory::InMemoryDirectory;

// So the RPC servers can share wire conversions with the client.
pub(crate) use client::{instance_from_proto, instance_to_proto};
