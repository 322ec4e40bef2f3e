use crate::grpc::grpc_kv_server::{GrpcKv, GrpcKvServer};
use crate::grpc::{
    proto_apply_error, proto_apply_result, proto_put_error, proto_put_result, proto_snapshot_error,
    proto_snapshot_result, ProtoApplyError, ProtoApplyReq, ProtoApplyResult, ProtoApplySuccess, ProtoGetReq,
    ProtoGetResult, ProtoNotPrimary, ProtoOutOfOrder, ProtoPutError, ProtoPutReq, ProtoPutResult, ProtoPutSuccess,
    ProtoServerFault, ProtoSnapshotError, ProtoSnapshotReq, ProtoSnapshotResult, ProtoSnapshotSuccess,
};
use crate::server::RpcServerShutdownSignal;
use crate::store::{
    ApplyError, ApplyInput, ApplyOutput, GetOutput, PutError, PutInput, PutOutput, RedirectInfo, ReplicatedStore, Seq,
    Snapshot, SnapshotError,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// KvRpcServer is the type that implements the KV gRPC interface on top of a local store.
pub struct KvRpcServer {
    logger: slog::Logger,
    store: Arc<ReplicatedStore>,
}

impl KvRpcServer {
    pub fn new(logger: slog::Logger, store: Arc<ReplicatedStore>) -> Self {
        KvRpcServer { logger, store }
    }

    pub async fn run(self, socket_addr: SocketAddr, shutdown_signal: RpcServerShutdownSignal) {
        let logger = self.logger.clone();
        slog::info!(logger, "Listening on '{:?}'", socket_addr);

        let result = Server::builder()
            .add_service(GrpcKvServer::new(self))
            .serve_with_shutdown(socket_addr, shutdown_signal)
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
    }

    // ------- Get --------

    fn handle_get(&self, rpc_request: ProtoGetReq) -> Result<ProtoGetResult, Status> {
        let app_output = self.store.get(&rpc_request.key);
        Ok(Self::convert_get_output(app_output))
    }

    fn convert_get_output(app_output: GetOutput) -> ProtoGetResult {
        let found = app_output.found();
        ProtoGetResult {
            found,
            value: app_output.value.unwrap_or_default(),
            responder_id: app_output.responder_id.into_inner(),
        }
    }

    // ------- Put --------

    async fn handle_put(&self, rpc_request: ProtoPutReq) -> Result<ProtoPutResult, Status> {
        let app_input = Self::convert_put_input(rpc_request)?;
        let app_result = self.store.put(app_input).await;
        Self::convert_put_result(app_result)
    }

    fn convert_put_input(rpc_request: ProtoPutReq) -> Result<PutInput, Status> {
        if rpc_request.key.is_empty() {
            return Err(Status::invalid_argument("missing key"));
        }

        Ok(PutInput {
            key: rpc_request.key,
            value: rpc_request.value,
        })
    }

    fn convert_put_result(app_result: Result<PutOutput, PutError>) -> Result<ProtoPutResult, Status> {
        let result = match app_result {
            Ok(ok) => proto_put_result::Result::Ok(ProtoPutSuccess {
                responder_id: ok.responder_id.into_inner(),
            }),
            Err(PutError::EmptyKey) => return Err(Status::invalid_argument("missing key")),
            Err(PutError::NotPrimary(info)) => proto_put_result::Result::Err(ProtoPutError {
                err: Some(proto_put_error::Err::NotPrimary(Self::convert_redirect_info(info))),
            }),
            Err(e @ PutError::SequenceExhausted)
            | Err(e @ PutError::DirectoryUnavailable(_))
            | Err(e @ PutError::Replication { .. }) => {
                proto_put_result::Result::Err(ProtoPutError {
                    err: Some(proto_put_error::Err::ServerFault(ProtoServerFault {
                        message: e.to_string(),
                    })),
                })
            }
        };

        Ok(ProtoPutResult { result: Some(result) })
    }

    fn convert_redirect_info(info: RedirectInfo) -> ProtoNotPrimary {
        ProtoNotPrimary {
            responder_id: info.responder_id.into_inner(),
            redirect_to: info.redirect_to.unwrap_or_default(),
        }
    }

    // ------- Apply --------

    fn handle_apply(&self, rpc_request: ProtoApplyReq) -> Result<ProtoApplyResult, Status> {
        let app_input = Self::convert_apply_input(rpc_request);
        let app_result = self.store.apply(app_input);
        Ok(Self::convert_apply_result(app_result))
    }

    fn convert_apply_input(rpc_request: ProtoApplyReq) -> ApplyInput {
        ApplyInput {
            seq: Seq::new(rpc_request.seq),
            key: rpc_request.key,
            value: rpc_request.value,
        }
    }

    fn convert_apply_result(app_result: Result<ApplyOutput, ApplyError>) -> ProtoApplyResult {
        match app_result {
            // Duplicates are acknowledged like fresh writes.
            Ok(ApplyOutput::Applied) | Ok(ApplyOutput::AlreadyApplied) => ProtoApplyResult {
                result: Some(proto_apply_result::Result::Ok(ProtoApplySuccess {
                    // Empty
                })),
            },
            Err(ApplyError::OutOfOrder { last_applied, received }) => ProtoApplyResult {
                result: Some(proto_apply_result::Result::Err(ProtoApplyError {
                    err: Some(proto_apply_error::Err::OutOfOrder(ProtoOutOfOrder {
                        last_applied: last_applied.as_u64(),
                        received_seq: received.as_u64(),
                    })),
                })),
            },
        }
    }

    // ------- Snapshot --------

    fn handle_snapshot(&self, _rpc_request: ProtoSnapshotReq) -> Result<ProtoSnapshotResult, Status> {
        let app_result = self.store.snapshot();
        Ok(Self::convert_snapshot_result(app_result))
    }

    fn convert_snapshot_result(app_result: Result<Snapshot, SnapshotError>) -> ProtoSnapshotResult {
        match app_result {
            Ok(snapshot) => ProtoSnapshotResult {
                result: Some(proto_snapshot_result::Result::Ok(ProtoSnapshotSuccess {
                    seq: snapshot.seq.as_u64(),
                    state: snapshot.state,
                })),
            },
            Err(SnapshotError::NotPrimary(info)) => ProtoSnapshotResult {
                result: Some(proto_snapshot_result::Result::Err(ProtoSnapshotError {
                    err: Some(proto_snapshot_error::Err::NotPrimary(Self::convert_redirect_info(info))),
                })),
            },
        }
    }
}

#[async_trait::async_trait]
impl GrpcKv for KvRpcServer {
    async fn get(&self, rpc_request_wrapped: Request<ProtoGetReq>) -> Result<Response<ProtoGetResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_get(rpc_request);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn put(&self, rpc_request_wrapped: Request<ProtoPutReq>) -> Result<Response<ProtoPutResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_put(rpc_request).await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn apply(&self, rpc_request_wrapped: Request<ProtoApplyReq>) -> Result<Response<ProtoApplyResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_apply(rpc_request);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn snapshot(
        &self,
        rpc_request_wrapped: Request<ProtoSnapshotReq>,
    ) -> Result<Response<ProtoSnapshotResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_snapshot(rpc_request);
        slog::debug!(self.logger, "ServerWire - Snapshot reply ok={}", rpc_result.is_ok());

        rpc_result.map(Response::new)
    }
}
