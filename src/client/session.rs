use crate::client::kv_client::{KvClient, RemotePutError};
use crate::client::RpcError;
use crate::directory::{Directory, DirectoryError};
use crate::instance::{Instance, InstanceId};
use crate::picker::{self, PickError, Picker, PickerAlgorithm};
use crate::store::{PutInput, RedirectInfo};

/// ClientSession resolves a service once and spreads requests over it with a picker.
///
/// The instance list is never refreshed. Instances that join after `start()` are never picked,
/// and instances that leave keep getting picked (and fail).
pub struct ClientSession {
    logger: slog::Logger,
    service: String,
    instances: Vec<Instance>,
    picker: Box<dyn Picker>,
}

#[derive(Debug)]
pub struct GetOutcome {
    pub picked: Instance,
    pub responder_id: InstanceId,
    pub value: Option<String>,
}

#[derive(Debug)]
pub struct PutOutcome {
    pub picked: Instance,
    pub responder_id: InstanceId,
    /// Set if the picked instance wasn't primary and we retried at this address.
    pub redirected_to: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("directory lookup failed: {0}")]
    Lookup(#[from] DirectoryError),
    #[error("no instances registered for service {0:?}")]
    NoInstances(String),
    #[error(transparent)]
    Pick(#[from] PickError),
    #[error("request to {addr} failed: {source}")]
    Rpc { addr: String, source: RpcError },
    #[error("put failed: {0}")]
    Put(RemotePutError),
}

impl ClientSession {
    pub async fn start(
        logger: slog::Logger,
        directory: &dyn Directory,
        service: &str,
        algorithm: PickerAlgorithm,
    ) -> Result<Self, SessionError> {
        let instances = directory.lookup(service).await?;
        if instances.is_empty() {
            return Err(SessionError::NoInstances(service.to_string()));
        }

        let picker = picker::create_picker(algorithm, &instances);
        slog::info!(
            logger,
            "Session over {} instance(s) of {:?} using {}",
            instances.len(),
            service,
            picker.name()
        );

        Ok(ClientSession {
            logger,
            service: service.to_string(),
            instances,
            picker,
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// The instance list resolved at `start()`.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn picker_name(&self) -> &'static str {
        self.picker.name()
    }

    pub async fn get(&self, key: &str) -> Result<GetOutcome, SessionError> {
        let picked = self.picker.pick()?;
        let client = self.connect(&picked.addr).await?;
        let output = client.get(key).await.map_err(|source| SessionError::Rpc {
            addr: picked.addr.clone(),
            source,
        })?;

        Ok(GetOutcome {
            picked,
            responder_id: output.responder_id,
            value: output.value,
        })
    }

    /// Send a put to the picked instance. If it isn't primary and names one, retry there exactly
    /// once. The retry's result is final.
    pub async fn put(&self, input: PutInput) -> Result<PutOutcome, SessionError> {
        let picked = self.picker.pick()?;
        let client = self.connect(&picked.addr).await?;

        let redirect_addr = match client.put(input.clone()).await {
            Ok(output) => {
                return Ok(PutOutcome {
                    picked,
                    responder_id: output.responder_id,
                    redirected_to: None,
                })
            }
            Err(RemotePutError::NotPrimary(RedirectInfo {
                redirect_to: Some(addr), ..
            })) => addr,
            Err(e) => return Err(SessionError::Put(e)),
        };
        slog::debug!(self.logger, "{:?} isn't primary, retrying at {}", picked.id, redirect_addr);

        let primary = self.connect(&redirect_addr).await?;
        let output = primary.put(input).await.map_err(SessionError::Put)?;

        Ok(PutOutcome {
            picked,
            responder_id: output.responder_id,
            redirected_to: Some(redirect_addr),
        })
    }

    async fn connect(&self, addr: &str) -> Result<KvClient, SessionError> {
        let logger = self.logger.new(slog::o!("Remote" => addr.to_string()));
        KvClient::connect(logger, addr)
            .await
            .map_err(|source| SessionError::Rpc {
                addr: addr.to_string(),
                source,
            })
    }
}
