use crate::client::{connect, RpcError};
use crate::grpc::grpc_kv_client::GrpcKvClient;
use crate::grpc::{
    proto_apply_error, proto_apply_result, proto_put_error, proto_put_result, proto_snapshot_error,
    proto_snapshot_result, ProtoApplyReq, ProtoGetReq, ProtoNotPrimary, ProtoPutReq, ProtoSnapshotReq,
};
use crate::instance::InstanceId;
use crate::store::{
    ApplyError, ApplyInput, FetchSnapshotError, GetOutput, PutInput, PutOutput, RedirectInfo, ReplicateError, Seq,
    Snapshot,
};
use tonic::transport::Channel;

/// KvClient is a connection to one remote KV instance.
pub struct KvClient {
    logger: slog::Logger,
    inner: GrpcKvClient<Channel>,
}

/// RemotePutError is how a put sent to a remote instance can fail.
#[derive(Debug, thiserror::Error)]
pub enum RemotePutError {
    #[error("{} is not primary", .0.responder_id)]
    NotPrimary(RedirectInfo),
    #[error("server fault: {0}")]
    ServerFault(String),
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl KvClient {
    pub async fn connect(logger: slog::Logger, addr: &str) -> Result<Self, RpcError> {
        let channel = connect(addr).await?;

        Ok(KvClient {
            logger,
            inner: GrpcKvClient::new(channel),
        })
    }

    pub async fn get(&self, key: &str) -> Result<GetOutput, RpcError> {
        let rpc_request = ProtoGetReq { key: key.to_string() };

        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);
        let rpc_reply = self.inner.clone().get(rpc_request).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        let rpc_result = rpc_reply?.into_inner();
        Ok(GetOutput {
            value: if rpc_result.found { Some(rpc_result.value) } else { None },
            responder_id: InstanceId::new(rpc_result.responder_id),
        })
    }

    pub async fn put(&self, input: PutInput) -> Result<PutOutput, RemotePutError> {
        let rpc_request = ProtoPutReq {
            key: input.key,
            value: input.value,
        };

        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);
        let rpc_reply = self.inner.clone().put(rpc_request).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        let result = rpc_reply
            .map_err(RpcError::from)?
            .into_inner()
            .result
            .ok_or(RpcError::MalformedReply("Put replied without a result"))?;

        match result {
            proto_put_result::Result::Ok(ok) => Ok(PutOutput {
                responder_id: InstanceId::new(ok.responder_id),
            }),
            proto_put_result::Result::Err(err) => {
                match err.err.ok_or(RpcError::MalformedReply("Put replied with an empty error"))? {
                    proto_put_error::Err::NotPrimary(not_primary) => {
                        Err(RemotePutError::NotPrimary(convert_not_primary(not_primary)))
                    }
                    proto_put_error::Err::ServerFault(fault) => Err(RemotePutError::ServerFault(fault.message)),
                }
            }
        }
    }

    /// Returns Ok only if the remote instance acknowledged the write.
    pub async fn apply(&self, input: ApplyInput) -> Result<(), ReplicateError> {
        let rpc_request = ProtoApplyReq {
            seq: input.seq.as_u64(),
            key: input.key,
            value: input.value,
        };

        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);
        let rpc_reply = self.inner.clone().apply(rpc_request).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        let result = rpc_reply
            .map_err(RpcError::from)?
            .into_inner()
            .result
            .ok_or(RpcError::MalformedReply("Apply replied without a result"))?;

        match result {
            proto_apply_result::Result::Ok(_) => Ok(()),
            proto_apply_result::Result::Err(err) => {
                match err.err.ok_or(RpcError::MalformedReply("Apply replied with an empty error"))? {
                    proto_apply_error::Err::OutOfOrder(out_of_order) => {
                        Err(ReplicateError::Rejected(ApplyError::OutOfOrder {
                            last_applied: Seq::new(out_of_order.last_applied),
                            received: Seq::new(out_of_order.received_seq),
                        }))
                    }
                }
            }
        }
    }

    pub async fn snapshot(&self) -> Result<Snapshot, FetchSnapshotError> {
        let rpc_request = ProtoSnapshotReq {};

        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);
        let rpc_reply = self.inner.clone().snapshot(rpc_request).await;
        // Don't log the whole state.
        slog::debug!(self.logger, "ClientWire - Snapshot reply ok={}", rpc_reply.is_ok());

        let result = rpc_reply
            .map_err(RpcError::from)?
            .into_inner()
            .result
            .ok_or(RpcError::MalformedReply("Snapshot replied without a result"))?;

        match result {
            proto_snapshot_result::Result::Ok(ok) => Ok(Snapshot {
                seq: Seq::new(ok.seq),
                state: ok.state,
            }),
            proto_snapshot_result::Result::Err(err) => {
                match err.err.ok_or(RpcError::MalformedReply("Snapshot replied with an empty error"))? {
                    proto_snapshot_error::Err::NotPrimary(not_primary) => {
                        Err(FetchSnapshotError::NotPrimary(convert_not_primary(not_primary)))
                    }
                }
            }
        }
    }
}

fn convert_not_primary(not_primary: ProtoNotPrimary) -> RedirectInfo {
    RedirectInfo {
        responder_id: InstanceId::new(not_primary.responder_id),
        redirect_to: if not_primary.redirect_to.is_empty() {
            None
        } else {
            Some(not_primary.redirect_to)
        },
    }
}
