use crate::environment::Environment;
use rand::Rng;
use std::time::Duration;

pub const DEFAULT_MAX_PARTICIPANTS_PER_CAMPAIGN: usize = 50;
pub const DEFAULT_MIN_DELAY_SECONDS: u64 = 20;
pub const DEFAULT_MAX_DELAY_SECONDS: u64 = 60;
pub const DEFAULT_FAILURE_RECOVERY_DELAY_SECONDS: u64 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct DispatchSettings {
    pub max_participants_per_campaign: usize,
    pub min_delay_seconds: u64,
    pub max_delay_seconds: u64,
    pub failure_recovery_delay_seconds: u64,
    pub message_variation: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            max_participants_per_campaign: DEFAULT_MAX_PARTICIPANTS_PER_CAMPAIGN,
            min_delay_seconds: DEFAULT_MIN_DELAY_SECONDS,
            max_delay_seconds: DEFAULT_MAX_DELAY_SECONDS,
            failure_recovery_delay_seconds: DEFAULT_FAILURE_RECOVERY_DELAY_SECONDS,
            message_variation: false,
        }
    }
}

impl DispatchSettings {
    pub fn from_env() -> Self {
        Self::default()
            .with_max_participants_per_campaign(Environment::usize("MAX_PARTICIPANTS_PER_CAMPAIGN", DEFAULT_MAX_PARTICIPANTS_PER_CAMPAIGN))
            .with_delay_range_in_seconds(
                Environment::u64("MIN_DELAY_SECONDS", DEFAULT_MIN_DELAY_SECONDS),
                Environment::u64("MAX_DELAY_SECONDS", DEFAULT_MAX_DELAY_SECONDS),
            )
            .with_failure_recovery_delay_in_seconds(Environment::u64("FAILURE_RECOVERY_DELAY_SECONDS", DEFAULT_FAILURE_RECOVERY_DELAY_SECONDS))
            .with_message_variation(Environment::boolean("MESSAGE_VARIATION", false))
    }

    pub fn with_max_participants_per_campaign(
        self,
        max_participants_per_campaign: usize,
    ) -> Self {
        Self {
            max_participants_per_campaign,
            ..self
        }
    }

    /// Bounds are inclusive and swapped when given in the wrong order.
    pub fn with_delay_range_in_seconds(
        self,
        min_delay_seconds: u64,
        max_delay_seconds: u64,
    ) -> Self {
        Self {
            min_delay_seconds: min_delay_seconds.min(max_delay_seconds),
            max_delay_seconds: min_delay_seconds.max(max_delay_seconds),
            ..self
        }
    }

    pub fn with_failure_recovery_delay_in_seconds(
        self,
        failure_recovery_delay_seconds: u64,
    ) -> Self {
        Self {
            failure_recovery_delay_seconds,
            ..self
        }
    }

    pub fn with_message_variation(
        self,
        message_variation: bool,
    ) -> Self {
        Self { message_variation, ..self }
    }

    pub fn success_delay(&self) -> Duration {
        let min_millis = self.min_delay_seconds.saturating_mul(1000);
        let max_millis = self.max_delay_seconds.saturating_mul(1000);

        Duration::from_millis(rand::thread_rng().gen_range(min_millis..=max_millis))
    }

    pub fn failure_delay(&self) -> Duration {
        Duration::from_secs(self.failure_recovery_delay_seconds)
    }
}
