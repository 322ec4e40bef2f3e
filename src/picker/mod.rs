//! Client-side load balancing. A picker is built once per session over a fixed instance list.
mod random;
mod round_robin;
mod smooth_weighted;

pub use random::RandomPicker;
pub use round_robin::RoundRobinPicker;
pub use smooth_weighted::SmoothWeightedPicker;

use crate::instance::Instance;
use std::str::FromStr;

/// Picker chooses one instance per request from the instance list it was created with. It never
/// re-resolves instances; callers build a new picker for a new session.
pub trait Picker: Send + Sync {
    fn pick(&self) -> Result<Instance, PickError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum PickError {
    #[error("no instances to pick from")]
    NoInstances,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PickerAlgorithm {
    Random,
    RoundRobin,
    SmoothWeightedRoundRobin,
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
#[error("unknown load balancing algorithm {0:?}, expected one of: random, rr, wrr")]
pub struct UnknownAlgorithmError(String);

impl FromStr for PickerAlgorithm {
    type Err = UnknownAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(PickerAlgorithm::Random),
            "rr" | "round_robin" => Ok(PickerAlgorithm::RoundRobin),
            "wrr" | "smooth_weighted_rr" => Ok(PickerAlgorithm::SmoothWeightedRoundRobin),
            other => Err(UnknownAlgorithmError(other.to_string())),
        }
    }
}

pub fn create_picker(algorithm: PickerAlgorithm, instances: &[Instance]) -> Box<dyn Picker> {
    match algorithm {
        PickerAlgorithm::Random => Box::new(RandomPicker::new(instances)),
        PickerAlgorithm::RoundRobin => Box::new(RoundRobinPicker::new(instances)),
        PickerAlgorithm::SmoothWeightedRoundRobin => Box::new(SmoothWeightedPicker::new(instances)),
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::instance::Instance;

    pub(crate) fn instances(weights: &[i64]) -> Vec<Instance> {
        weights
            .iter()
            .enumerate()
            .map(|(i, w)| Instance::new(format!("kv{}", i + 1), format!("127.0.0.1:{}", 9301 + i), *w))
            .collect()
    }

    pub(crate) fn ids(picked: &[Instance]) -> Vec<&str> {
        picked.iter().map(|inst| inst.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::instances;
    use super::*;

    #[test]
    fn parse_algorithm_names() {
        assert_eq!(Ok(PickerAlgorithm::Random), "random".parse());
        assert_eq!(Ok(PickerAlgorithm::RoundRobin), "rr".parse());
        assert_eq!(Ok(PickerAlgorithm::SmoothWeightedRoundRobin), "wrr".parse());
        assert!("least_conn".parse::<PickerAlgorithm>().is_err());
    }

    #[test]
    fn created_pickers_report_their_names() {
        let list = instances(&[1, 2]);
        assert_eq!("random", create_picker(PickerAlgorithm::Random, &list).name());
        assert_eq!("round_robin", create_picker(PickerAlgorithm::RoundRobin, &list).name());
        assert_eq!(
            "smooth_weighted_rr",
            create_picker(PickerAlgorithm::SmoothWeightedRoundRobin, &list).name()
        );
    }

    #[test]
    fn every_picker_rejects_empty_list() {
        for algorithm in [
            PickerAlgorithm::Random,
            PickerAlgorithm::RoundRobin,
            PickerAlgorithm::SmoothWeightedRoundRobin,
        ]
        .iter()
        {
            let picker = create_picker(*algorithm, &[]);
            assert_eq!(Err(PickError::NoInstances), picker.pick());
        }
    }
}
