use crate::instance::Instance;
use crate::picker::{PickError, Picker};
use parking_lot::Mutex;

/// SmoothWeightedPicker is the nginx-style smooth weighted round robin. Every pick raises each
/// instance's running score by its weight, picks the highest score (first one wins ties), then
/// lowers the winner by the total weight. Over `total_weight` picks each instance is chosen
/// exactly `weight` times, interleaved rather than in bursts.
///
/// Scores are kept in i128: weights come off the wire as any positive i64, and neither their sum
/// nor a running score may overflow.
pub struct SmoothWeightedPicker {
    instances: Vec<Instance>,
    weights: Vec<i128>,
    total_weight: i128,
    current: Mutex<Vec<i128>>,
}

impl SmoothWeightedPicker {
    pub fn new(instances: &[Instance]) -> Self {
        let weights: Vec<i128> = instances.iter().map(|inst| i128::from(inst.effective_weight())).collect();
        let total_weight = weights.iter().sum();

        SmoothWeightedPicker {
            instances: instances.to_vec(),
            current: Mutex::new(vec![0; weights.len()]),
            weights,
            total_weight,
        }
    }
}

impl Picker for SmoothWeightedPicker {
    fn pick(&self) -> Result<Instance, PickError> {
        if self.instances.is_empty() {
            return Err(PickError::NoInstances);
        }

        let mut current = self.current.lock();

        let mut best = 0;
        for i in 0..current.len() {
            current[i] += self.weights[i];
            // Strictly greater, so the lowest index keeps a tie.
            if current[i] > current[best] {
                best = i;
            }
        }
        current[best] -= self.total_weight;

        Ok(self.instances[best].clone())
    }

    fn name(&self) -> &'static str {
        "smooth_weighted_rr"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::test_utils::{ids, instances};

    fn longest_run(ids: &[&str], id: &str) -> usize {
        let mut longest = 0;
        let mut run = 0;
        for picked in ids {
            if *picked == id {
                run += 1;
                longest = longest.max(run);
            } else {
                run = 0;
            }
        }
        longest
    }

    #[test]
    fn weights_5_1_1_interleave_smoothly() {
        let picker = SmoothWeightedPicker::new(&instances(&[5, 1, 1]));

        let picked: Vec<_> = (0..7).map(|_| picker.pick().unwrap()).collect();

        assert_eq!(vec!["kv1", "kv1", "kv2", "kv1", "kv3", "kv1", "kv1"], ids(&picked));
    }

    #[test]
    fn every_window_of_total_weight_is_proportional() {
        let picker = SmoothWeightedPicker::new(&instances(&[5, 1, 1]));

        let picked: Vec<_> = (0..28).map(|_| picker.pick().unwrap()).collect();
        let picked = ids(&picked);

        for window in picked.windows(7) {
            assert_eq!(5, window.iter().filter(|id| **id == "kv1").count(), "{:?}", window);
            assert_eq!(1, window.iter().filter(|id| **id == "kv2").count(), "{:?}", window);
            assert_eq!(1, window.iter().filter(|id| **id == "kv3").count(), "{:?}", window);
        }

        // Within one cycle the light instances split the heavy one's turns. A plain weighted
        // round robin would emit kv1 five times in a row.
        assert_eq!(2, longest_run(&picked[..7], "kv1"));
    }

    #[test]
    fn non_positive_weights_are_normalized_to_one() {
        let picker = SmoothWeightedPicker::new(&instances(&[0, -3, 1]));

        let picked: Vec<_> = (0..6).map(|_| picker.pick().unwrap()).collect();

        assert_eq!(vec!["kv1", "kv2", "kv3", "kv1", "kv2", "kv3"], ids(&picked));
    }

    #[test]
    fn extreme_weights_do_not_overflow() {
        let picker = SmoothWeightedPicker::new(&instances(&[i64::MAX, 1, i64::MAX]));

        let picked: Vec<_> = (0..6).map(|_| picker.pick().unwrap()).collect();

        assert_eq!(vec!["kv1", "kv3", "kv1", "kv3", "kv1", "kv3"], ids(&picked));
    }

    #[test]
    fn heaviest_instance_takes_early_picks() {
        let picker = SmoothWeightedPicker::new(&instances(&[i64::MAX, 1]));

        let picked: Vec<_> = (0..100).map(|_| picker.pick().unwrap()).collect();

        assert!(ids(&picked).iter().all(|id| *id == "kv1"));
    }

    #[test]
    fn equal_weights_degrade_to_round_robin() {
        let picker = SmoothWeightedPicker::new(&instances(&[2, 2]));

        let picked: Vec<_> = (0..4).map(|_| picker.pick().unwrap()).collect();

        assert_eq!(vec!["kv1", "kv2", "kv1", "kv2"], ids(&picked));
    }
}
