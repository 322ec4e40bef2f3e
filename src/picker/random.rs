use crate::instance::Instance;
use crate::picker::{PickError, Picker};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// RandomPicker picks uniformly at random. Each picker owns its own generator, seeded from OS
/// entropy, so two sessions don't share a sequence.
pub struct RandomPicker {
    instances: Vec<Instance>,
    rng: Mutex<StdRng>,
}

impl RandomPicker {
    pub fn new(instances: &[Instance]) -> Self {
        Self::with_rng(instances, StdRng::from_entropy())
    }

    fn with_rng(instances: &[Instance], rng: StdRng) -> Self {
        RandomPicker {
            instances: instances.to_vec(),
            rng: Mutex::new(rng),
        }
    }
}

impl Picker for RandomPicker {
    fn pick(&self) -> Result<Instance, PickError> {
        if self.instances.is_empty() {
            return Err(PickError::NoInstances);
        }

        let i = self.rng.lock().gen_range(0..self.instances.len());
        Ok(self.instances[i].clone())
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
