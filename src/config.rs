//! Scheduler configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration:
//!
//! ```toml
//! policy = "edd"   # fifo | edd | spt | random (default: random)
//! seed = 42        # random source seed (default: 0)
//! ```

use serde::{Deserialize, Serialize};

use crate::dispatching::Policy;
use crate::error::Result;

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Dispatch policy name.
    pub policy: String,
    /// Seed of the scheduler's random source.
    pub seed: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default().name().to_string(),
            seed: 0,
        }
    }
}

impl SchedulerConfig {
    /// Parses a TOML document and checks the policy name.
    ///
    /// # Errors
    /// - [`ScheduleError::Config`](crate::ScheduleError::Config) on malformed TOML
    /// - [`ScheduleError::PolicyMisconfiguration`](crate::ScheduleError::PolicyMisconfiguration)
    ///   on an unknown policy name
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.policy()?;
        Ok(config)
    }

    /// The configured policy.
    pub fn policy(&self) -> Result<Policy> {
        self.policy.parse()
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy.name().to_string();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
