use crate::instance::{Instance, InstanceId};
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// We haven't seen a directory lookup yet.
    Unknown,
    Primary,
    Backup,
}

/// RoleState is our role together with who we believe is primary. They are always read and
/// written as one value, so nobody sees a role without its matching primary.
#[derive(Clone, Eq, PartialEq)]
pub struct RoleState {
    pub role: Role,
    pub primary: Option<Instance>,
}

impl RoleState {
    pub(crate) fn unknown() -> Self {
        RoleState {
            role: Role::Unknown,
            primary: None,
        }
    }

    /// The primary's address, if we know one and it isn't empty.
    pub fn primary_addr(&self) -> Option<&str> {
        match &self.primary {
            Some(primary) if !primary.addr.is_empty() => Some(primary.addr.as_str()),
            _ => None,
        }
    }

    fn same_primary(&self, other: &RoleState) -> bool {
        let id = |state: &RoleState| state.primary.as_ref().map(|p| p.id.clone());
        id(self) == id(other)
    }

    pub(super) fn is_transition_from(&self, previous: &RoleState) -> bool {
        self.role != previous.role || !self.same_primary(previous)
    }
}

impl fmt::Debug for RoleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.primary {
            Some(primary) => write!(f, "{:?}(primary={:?}@{})", self.role, primary.id, primary.addr),
            None => write!(f, "{:?}(primary=None)", self.role),
        }
    }
}

/// The forced primary wins if it is currently registered. Otherwise the lowest ID wins.
///
/// Each node runs this against its own directory view. Two nodes with different stale views can
/// both conclude they are primary; nothing here prevents that.
pub(super) fn pick_primary<'a>(instances: &'a [Instance], forced_primary_id: Option<&InstanceId>) -> Option<&'a Instance> {
    if let Some(forced_id) = forced_primary_id {
        if let Some(forced) = instances.iter().find(|inst| &inst.id == forced_id) {
            return Some(forced);
        }
    }

    instances.iter().min_by(|a, b| a.id.cmp(&b.id))
}

/// Returns None if there is nobody to pick, in which case the caller keeps its current role.
pub(super) fn evaluate_role(
    my_id: &InstanceId,
    instances: &[Instance],
    forced_primary_id: Option<&InstanceId>,
) -> Option<RoleState> {
    let primary = pick_primary(instances, forced_primary_id)?;
    let role = if &primary.id == my_id {
        Role::Primary
    } else {
        Role::Backup
    };

    Some(RoleState {
        role,
        primary: Some(primary.clone()),
    })
}
