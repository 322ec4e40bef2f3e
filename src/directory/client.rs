use crate::client::{connect, RpcError};
use crate::directory::{Directory, DirectoryError};
use crate::grpc::grpc_directory_client::GrpcDirectoryClient;
use crate::grpc::{ProtoDeregisterReq, ProtoInstance, ProtoLookupReq, ProtoRegisterReq};
use crate::instance::{Instance, InstanceId};
use tonic::transport::Channel;
use tonic::{Code, Status};

/// DirectoryClient talks to a remote directory over gRPC. It holds one channel for its lifetime;
/// the channel is cheap to clone per call.
#[derive(Clone)]
pub struct DirectoryClient {
    logger: slog::Logger,
    inner: GrpcDirectoryClient<Channel>,
}

impl DirectoryClient {
    pub async fn connect(logger: slog::Logger, addr: &str) -> Result<Self, RpcError> {
        let channel = connect(addr).await?;
        slog::debug!(logger, "Connected to directory at {}", addr);

        Ok(DirectoryClient {
            logger,
            inner: GrpcDirectoryClient::new(channel),
        })
    }

    fn convert_status(status: Status) -> DirectoryError {
        if status.code() == Code::InvalidArgument {
            DirectoryError::InvalidArgument("rejected by directory")
        } else {
            DirectoryError::Transport(RpcError::Call(status))
        }
    }
}

#[async_trait::async_trait]
impl Directory for DirectoryClient {
    async fn register(&self, service: &str, instance: Instance) -> Result<(), DirectoryError> {
        let rpc_request = ProtoRegisterReq {
            service: service.to_string(),
            instance: Some(instance_to_proto(instance)),
        };

        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);
        let rpc_reply = self.inner.clone().register(rpc_request).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        let rpc_result = rpc_reply.map_err(Self::convert_status)?.into_inner();
        if !rpc_result.ok {
            return Err(DirectoryError::Transport(RpcError::MalformedReply(
                "Register replied without ok",
            )));
        }

        Ok(())
    }

    async fn deregister(&self, service: &str, id: &InstanceId) -> Result<(), DirectoryError> {
        let rpc_request = ProtoDeregisterReq {
            service: service.to_string(),
            id: id.as_str().to_string(),
        };

        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);
        let rpc_reply = self.inner.clone().deregister(rpc_request).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        let rpc_result = rpc_reply.map_err(Self::convert_status)?.into_inner();
        if !rpc_result.ok {
            return Err(DirectoryError::Transport(RpcError::MalformedReply(
                "Deregister replied without ok",
            )));
        }

        Ok(())
    }

    async fn lookup(&self, service: &str) -> Result<Vec<Instance>, DirectoryError> {
        let rpc_request = ProtoLookupReq {
            service: service.to_string(),
        };

        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);
        let rpc_reply = self.inner.clone().lookup(rpc_request).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        let rpc_result = rpc_reply.map_err(Self::convert_status)?.into_inner();
        Ok(rpc_result.instances.into_iter().map(instance_from_proto).collect())
    }
}

// ------- Conversions --------

pub(crate) fn instance_to_proto(instance: Instance) -> ProtoInstance {
    ProtoInstance {
        id: instance.id.into_inner(),
        addr: instance.addr,
        weight: instance.weight,
        meta: instance.meta,
    }
}

pub(crate) fn instance_from_proto(proto: ProtoInstance) -> Instance {
    Instance {
        id: InstanceId::new(proto.id),
        addr: proto.addr,
        weight: proto.weight,
        meta: proto.meta,
    }
}
