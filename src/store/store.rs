use crate::directory::Directory;
use crate::instance::{Instance, InstanceId};
use crate::store::local_state::{Seq, StoreState};
use crate::store::peer_client::PeerTransport;
use crate::store::role::{self, Role, RoleState};
use crate::store::store_api::{
    ApplyError, ApplyInput, ApplyOutput, GetOutput, PutError, PutInput, PutOutput, RedirectInfo, RefreshRoleError,
    Snapshot, SnapshotError,
};
use parking_lot::RwLock;
use std::sync::Arc;

pub struct StoreConfig {
    pub logger: slog::Logger,
    pub my_instance_id: InstanceId,
    /// Service name we (and our peers) are registered under.
    pub service: String,
    /// If this instance is registered, it is primary regardless of ID order.
    pub forced_primary_id: Option<InstanceId>,
    pub directory: Arc<dyn Directory>,
    pub peers: Arc<dyn PeerTransport>,
}

/// ReplicatedStore is a key/value map replicated from one primary to every other instance of the
/// same service.
///
/// There are two independently locked regions: the data (`state`) and the role (`role`). Neither
/// lock is ever held across a network call, so reads are not blocked by in-flight replication.
pub struct ReplicatedStore {
    logger: slog::Logger,
    my_instance_id: InstanceId,
    service: String,
    forced_primary_id: Option<InstanceId>,
    directory: Arc<dyn Directory>,
    peers: Arc<dyn PeerTransport>,
    state: RwLock<StoreState>,
    role: RwLock<RoleState>,
}

impl ReplicatedStore {
    pub fn new(config: StoreConfig) -> Self {
        ReplicatedStore {
            logger: config.logger,
            my_instance_id: config.my_instance_id,
            service: config.service,
            forced_primary_id: config.forced_primary_id,
            directory: config.directory,
            peers: config.peers,
            state: RwLock::new(StoreState::new()),
            role: RwLock::new(RoleState::unknown()),
        }
    }

    pub fn instance_id(&self) -> &InstanceId {
        &self.my_instance_id
    }

    pub fn role_state(&self) -> RoleState {
        self.role.read().clone()
    }

    /// Returns `(seq, last_applied)`.
    pub fn sequence_state(&self) -> (Seq, Seq) {
        let state = self.state.read();
        (state.seq(), state.last_applied())
    }

    /// Reads are served in every role, including before we know our role.
    pub fn get(&self, key: &str) -> GetOutput {
        GetOutput {
            value: self.state.read().get(key),
            responder_id: self.my_instance_id.clone(),
        }
    }

    pub async fn put(&self, input: PutInput) -> Result<PutOutput, PutError> {
        if input.key.is_empty() {
            return Err(PutError::EmptyKey);
        }

        {
            let role = self.role.read();
            if role.role != Role::Primary {
                return Err(PutError::NotPrimary(self.redirect_info(&role)));
            }
        }

        // Apply locally first. From here on, a failure leaves us ahead of some backup.
        let seq = self
            .state
            .write()
            .accept_local_write(input.key.clone(), input.value.clone())
            .ok_or(PutError::SequenceExhausted)?;

        let peers: Vec<Instance> = self
            .directory
            .lookup(&self.service)
            .await
            .map_err(PutError::DirectoryUnavailable)?
            .into_iter()
            .filter(|instance| instance.id != self.my_instance_id)
            .collect();

        let mut first_failure = None;
        for peer in peers {
            let apply_input = ApplyInput {
                seq,
                key: input.key.clone(),
                value: input.value.clone(),
            };

            if let Err(e) = self.peers.apply(&peer, apply_input).await {
                slog::warn!(
                    self.logger,
                    "Failed to replicate seq {:?} to {:?}@{}: {}",
                    seq,
                    peer.id,
                    peer.addr,
                    e
                );
                if first_failure.is_none() {
                    first_failure = Some(PutError::Replication {
                        peer_id: peer.id,
                        source: e,
                    });
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(PutOutput {
                responder_id: self.my_instance_id.clone(),
            }),
        }
    }

    /// Replicated write from the primary. See `StoreState::apply_replicated()` for ordering rules.
    pub fn apply(&self, input: ApplyInput) -> Result<ApplyOutput, ApplyError> {
        let result = self.state.write().apply_replicated(input);
        if let Err(e) = &result {
            slog::warn!(self.logger, "Rejected replicated write: {}", e);
        }

        result
    }

    /// Full state transfer. Only the primary serves it.
    pub fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
        {
            let role = self.role.read();
            if role.role != Role::Primary {
                return Err(SnapshotError::NotPrimary(self.redirect_info(&role)));
            }
        }

        Ok(self.state.read().snapshot())
    }

    /// Returns true if we replaced our state with `snapshot`. A snapshot that isn't strictly newer
    /// than our `seq` is ignored, so a stale or competing primary can't move us backwards.
    pub fn adopt_snapshot(&self, snapshot: Snapshot) -> bool {
        let snapshot_seq = snapshot.seq;
        let adopted = self.state.write().adopt_snapshot_if_newer(snapshot);
        if adopted {
            slog::info!(self.logger, "Adopted snapshot at seq {:?}", snapshot_seq);
        }

        adopted
    }

    /// One round of role evaluation: look up the service, pick the primary, and publish our new
    /// role. As a backup, pull a snapshot from the primary to catch up.
    ///
    /// If the directory has nobody registered, our role is left as it was.
    pub async fn refresh_role(&self) -> Result<RoleState, RefreshRoleError> {
        let instances = self.directory.lookup(&self.service).await?;

        let new_state =
            match role::evaluate_role(&self.my_instance_id, &instances, self.forced_primary_id.as_ref()) {
                Some(new_state) => new_state,
                None => return Ok(self.role_state()),
            };

        let previous_state = std::mem::replace(&mut *self.role.write(), new_state.clone());
        if new_state.is_transition_from(&previous_state) {
            slog::info!(self.logger, "Role => {:?} (was {:?})", new_state, previous_state);
        }

        if new_state.role == Role::Backup {
            if let Some(primary_addr) = new_state.primary_addr() {
                self.bootstrap_from(primary_addr).await?;
            }
        }

        Ok(new_state)
    }

    async fn bootstrap_from(&self, primary_addr: &str) -> Result<(), RefreshRoleError> {
        let snapshot = self
            .peers
            .fetch_snapshot(primary_addr)
            .await
            .map_err(|source| RefreshRoleError::Bootstrap {
                primary_addr: primary_addr.to_string(),
                source,
            })?;

        self.adopt_snapshot(snapshot);
        Ok(())
    }

    fn redirect_info(&self, role: &RoleState) -> RedirectInfo {
        RedirectInfo {
            responder_id: self.my_instance_id.clone(),
            redirect_to: role.primary_addr().map(str::to_string),
        }
    }
}
