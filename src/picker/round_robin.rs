use crate::instance::Instance;
use crate::picker::{PickError, Picker};
use std::sync::atomic::{AtomicU64, Ordering};

/// RoundRobinPicker walks the list in order. The only state is a counter, which is incremented
/// exactly once per pick, so concurrent callers never lose or repeat a turn.
pub struct RoundRobinPicker {
    instances: Vec<Instance>,
    counter: AtomicU64,
}

impl RoundRobinPicker {
    pub fn new(instances: &[Instance]) -> Self {
        RoundRobinPicker {
            instances: instances.to_vec(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Picker for RoundRobinPicker {
    fn pick(&self) -> Result<Instance, PickError> {
        if self.instances.is_empty() {
            return Err(PickError::NoInstances);
        }

        let turn = self.counter.fetch_add(1, Ordering::Relaxed);
        let i = (turn % self.instances.len() as u64) as usize;
        Ok(self.instances[i].clone())
    }

    fn name(&self) -> &'static str {
        "round_robin"
    }
}
