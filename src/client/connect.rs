use tonic::codegen::http::uri;
use tonic::transport::{Channel, Endpoint};
use tonic::Status;

/// RpcError is any failure to reach a remote instance or to understand its reply. Nothing in this
/// crate retries on it.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("invalid address {addr:?}: {source}")]
    InvalidAddress { addr: String, source: uri::InvalidUri },
    #[error("failed to connect to {addr:?}: {source}")]
    Connect {
        addr: String,
        source: tonic::transport::Error,
    },
    #[error("call failed: {0}")]
    Call(#[from] Status),
    #[error("malformed reply: {0}")]
    MalformedReply(&'static str),
}

/// Dial `addr` ("host:port") over plaintext HTTP/2.
pub(crate) async fn connect(addr: &str) -> Result<Channel, RpcError> {
    let url = format!("http://{}", addr);
    let endpoint = Endpoint::from_shared(url).map_err(|source| RpcError::InvalidAddress {
        addr: addr.to_string(),
        source,
    })?;

    endpoint.connect().await.map_err(|source| RpcError::Connect {
        addr: addr.to_string(),
        source,
    })
}
