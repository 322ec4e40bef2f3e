use crate::directory::{instance_from_proto, instance_to_proto, Directory, DirectoryError, InMemoryDirectory};
use crate::grpc::grpc_directory_server::{GrpcDirectory, GrpcDirectoryServer};
use crate::grpc::{
    ProtoDeregisterReq, ProtoDeregisterResult, ProtoLookupReq, ProtoLookupResult, ProtoRegisterReq,
    ProtoRegisterResult,
};
use crate::instance::InstanceId;
use crate::server::RpcServerShutdownSignal;
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// DirectoryRpcServer serves an in-memory directory over gRPC. Registrations live only as long as
/// the process.
pub struct DirectoryRpcServer {
    logger: slog::Logger,
    directory: Arc<InMemoryDirectory>,
}

impl DirectoryRpcServer {
    pub fn new(logger: slog::Logger, directory: Arc<InMemoryDirectory>) -> Self {
        DirectoryRpcServer { logger, directory }
    }

    pub async fn run(self, socket_addr: SocketAddr, shutdown_signal: RpcServerShutdownSignal) {
        let logger = self.logger.clone();
        slog::info!(logger, "Listening on '{:?}'", socket_addr);

        let result = Server::builder()
            .add_service(GrpcDirectoryServer::new(self))
            .serve_with_shutdown(socket_addr, shutdown_signal)
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
    }

    async fn handle_register(&self, rpc_request: ProtoRegisterReq) -> Result<ProtoRegisterResult, Status> {
        let instance = rpc_request
            .instance
            .map(instance_from_proto)
            .ok_or_else(|| Status::invalid_argument("missing instance"))?;

        self.directory
            .register(&rpc_request.service, instance)
            .await
            .map_err(Self::convert_error)?;

        Ok(ProtoRegisterResult { ok: true })
    }

    async fn handle_deregister(&self, rpc_request: ProtoDeregisterReq) -> Result<ProtoDeregisterResult, Status> {
        self.directory
            .deregister(&rpc_request.service, &InstanceId::new(rpc_request.id))
            .await
            .map_err(Self::convert_error)?;

        Ok(ProtoDeregisterResult { ok: true })
    }

    async fn handle_lookup(&self, rpc_request: ProtoLookupReq) -> Result<ProtoLookupResult, Status> {
        let instances = self
            .directory
            .lookup(&rpc_request.service)
            .await
            .map_err(Self::convert_error)?;

        Ok(ProtoLookupResult {
            instances: instances.into_iter().map(instance_to_proto).collect(),
        })
    }

    fn convert_error(error: DirectoryError) -> Status {
        match error {
            DirectoryError::InvalidArgument(message) => Status::invalid_argument(message),
            DirectoryError::Transport(e) => Status::internal(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl GrpcDirectory for DirectoryRpcServer {
    async fn register(
        &self,
        rpc_request_wrapped: Request<ProtoRegisterReq>,
    ) -> Result<Response<ProtoRegisterResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_register(rpc_request).await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn deregister(
        &self,
        rpc_request_wrapped: Request<ProtoDeregisterReq>,
    ) -> Result<Response<ProtoDeregisterResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_deregister(rpc_request).await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn lookup(&self, rpc_request_wrapped: Request<ProtoLookupReq>) -> Result<Response<ProtoLookupResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_lookup(rpc_request).await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grpc::ProtoInstance;
    use tonic::Code;

    fn server() -> DirectoryRpcServer {
        DirectoryRpcServer::new(
            slog::Logger::root(slog::Discard, slog::o!()),
            Arc::new(InMemoryDirectory::new()),
        )
    }

    fn register_req(service: &str, id: &str, addr: &str) -> ProtoRegisterReq {
        ProtoRegisterReq {
            service: service.to_string(),
            instance: Some(ProtoInstance {
                id: id.to_string(),
                addr: addr.to_string(),
                weight: 1,
                meta: Default::default(),
            }),
        }
    }

    #[tokio::test]
    async fn register_then_lookup() {
        let server = server();
        server.handle_register(register_req("kv", "kv2", "h:2")).await.unwrap();
        server.handle_register(register_req("kv", "kv1", "h:1")).await.unwrap();

        let result = server
            .handle_lookup(ProtoLookupReq {
                service: "kv".to_string(),
            })
            .await
            .unwrap();

        let ids: Vec<_> = result.instances.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(vec!["kv1", "kv2"], ids);
    }

    #[tokio::test]
    async fn bad_arguments_are_invalid_argument() {
        let server = server();

        let missing_instance = server
            .handle_register(ProtoRegisterReq {
                service: "kv".to_string(),
                instance: None,
            })
            .await;
        let empty_addr = server.handle_register(register_req("kv", "kv1", "")).await;
        let empty_service = server
            .handle_lookup(ProtoLookupReq {
                service: "".to_string(),
            })
            .await;

        assert_eq!(Code::InvalidArgument, missing_instance.unwrap_err().code());
        assert_eq!(Code::InvalidArgument, empty_addr.unwrap_err().code());
        assert_eq!(Code::InvalidArgument, empty_service.unwrap_err().code());
    }

    #[tokio::test]
    async fn deregister_removes_instance() {
        let server = server();
        server.handle_register(register_req("kv", "kv1", "h:1")).await.unwrap();

        server
            .handle_deregister(ProtoDeregisterReq {
                service: "kv".to_string(),
                id: "kv1".to_string(),
            })
            .await
            .unwrap();

        let result = server
            .handle_lookup(ProtoLookupReq {
                service: "kv".to_string(),
            })
            .await
            .unwrap();
        assert!(result.instances.is_empty());
    }
}
