use crate::store::store_api::{ApplyError, ApplyInput, ApplyOutput, Snapshot};
use std::collections::HashMap;
use std::fmt;

/// Seq orders writes. 0 means "nothing written yet".
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Seq(u64);

impl Seq {
    pub fn new(seq: u64) -> Self {
        Seq(seq)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// None once the sequence space is used up.
    pub(crate) fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Seq)
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// StoreState is the key/value data and its position in the write order.
///
/// `seq` is the highest sequence we've assigned or learned about. `last_applied` is the highest
/// sequence actually reflected in `data`. `last_applied <= seq` always holds. Callers serialize
/// access (it lives behind the store's data lock).
pub(super) struct StoreState {
    data: HashMap<String, String>,
    seq: Seq,
    last_applied: Seq,
}

impl StoreState {
    pub(super) fn new() -> Self {
        StoreState {
            data: HashMap::new(),
            seq: Seq::new(0),
            last_applied: Seq::new(0),
        }
    }

    pub(super) fn get(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    pub(super) fn seq(&self) -> Seq {
        self.seq
    }

    pub(super) fn last_applied(&self) -> Seq {
        self.last_applied
    }

    /// Primary path. Assign the next sequence and apply in one step. Returns the assigned sequence,
    /// or None (and changes nothing) if `seq` is already `u64::MAX`.
    pub(super) fn accept_local_write(&mut self, key: String, value: String) -> Option<Seq> {
        let seq = self.seq.next()?;
        self.data.insert(key, value);
        self.seq = seq;
        self.last_applied = seq;

        Some(seq)
    }

    /// Backup path. Duplicates are a successful no-op. Anything but the direct successor of
    /// `last_applied` is rejected, unless we've applied nothing yet.
    pub(super) fn apply_replicated(&mut self, input: ApplyInput) -> Result<ApplyOutput, ApplyError> {
        if input.seq <= self.last_applied {
            return Ok(ApplyOutput::AlreadyApplied);
        }

        if !self.last_applied.is_zero() && self.last_applied.next() != Some(input.seq) {
            return Err(ApplyError::OutOfOrder {
                last_applied: self.last_applied,
                received: input.seq,
            });
        }

        self.data.insert(input.key, input.value);
        self.last_applied = input.seq;
        if input.seq > self.seq {
            self.seq = input.seq;
        }

        Ok(ApplyOutput::Applied)
    }

    pub(super) fn snapshot(&self) -> Snapshot {
        Snapshot {
            seq: self.seq,
            state: self.data.clone(),
        }
    }

    /// Replace everything with `snapshot` iff it is strictly newer than what we have.
    ///
    /// CAS: Return true if we adopted the snapshot.
    pub(super) fn adopt_snapshot_if_newer(&mut self, snapshot: Snapshot) -> bool {
        if snapshot.seq <= self.seq {
            return false;
        }

        self.data = snapshot.state;
        self.seq = snapshot.seq;
        self.last_applied = snapshot.seq;
        true
    }
}
