use std::convert::TryFrom;
use tokio::time::Duration;

/// NodeOptions are the library-level tunables of a running node. Unset fields take defaults.
#[derive(Clone, Debug, Default)]
pub struct NodeOptions {
    pub role_refresh_interval: Option<Duration>,
    pub shutdown_grace_period: Option<Duration>,
}

pub(super) struct NodeOptionsValidated {
    pub role_refresh_interval: Duration,
    pub shutdown_grace_period: Duration,
}

impl NodeOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.role_refresh_interval == Duration::from_secs(0) {
            return Err("Role refresh interval must be greater than zero");
        }
        if self.shutdown_grace_period == Duration::from_secs(0) {
            return Err("Shutdown grace period must be greater than zero");
        }

        Ok(())
    }
}

impl TryFrom<NodeOptions> for NodeOptionsValidated {
    type Error = &'static str;

    fn try_from(options: NodeOptions) -> Result<Self, Self::Error> {
        let values = NodeOptionsValidated {
            role_refresh_interval: options.role_refresh_interval.unwrap_or(Duration::from_secs(2)),
            shutdown_grace_period: options.shutdown_grace_period.unwrap_or(Duration::from_secs(3)),
        };

        values.validate()?;
        Ok(values)
    }
}
