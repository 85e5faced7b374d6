// Process configuration.
//
// Every key is read from `TIME_PAYROLL_<KEY>` (upper case) after an optional `.env`
// file has been loaded. Missing keys fall back to the defaults below.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::payroll::core::calculation::{
    DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_OVERTIME_THRESHOLD_HOURS, PayrollPolicy,
};
use crate::shared::application::command_handler::DEFAULT_MAX_RETRIES;
use crate::shared::core::errors::DomainError;

pub const ENV_PREFIX: &str = "TIME_PAYROLL_";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_overtime_threshold_hours")]
    pub overtime_threshold_hours: Decimal,
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
    #[serde(default = "default_idle_timeout_seconds")]
    pub idle_timeout_seconds: u64,
    #[serde(default = "default_notification_topic")]
    pub notification_topic: String,
    #[serde(default = "default_max_append_retries")]
    pub max_append_retries: u32,
    #[serde(default = "default_relay_interval_ms")]
    pub relay_interval_ms: u64,
    /// JSON seed with wage configurations, deduction templates and projects.
    #[serde(default)]
    pub reference_data_path: Option<PathBuf>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_overtime_threshold_hours() -> Decimal {
    DEFAULT_OVERTIME_THRESHOLD_HOURS
}

fn default_overtime_multiplier() -> Decimal {
    DEFAULT_OVERTIME_MULTIPLIER
}

fn default_idle_timeout_seconds() -> u64 {
    300
}

fn default_notification_topic() -> String {
    "time-entries.v1".to_string()
}

fn default_max_append_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_relay_interval_ms() -> u64 {
    250
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            overtime_threshold_hours: default_overtime_threshold_hours(),
            overtime_multiplier: default_overtime_multiplier(),
            idle_timeout_seconds: default_idle_timeout_seconds(),
            notification_topic: default_notification_topic(),
            max_append_retries: default_max_append_retries(),
            relay_interval_ms: default_relay_interval_ms(),
            reference_data_path: None,
        }
    }
}

/// What clients need to drive the timer and idle detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingPolicy {
    pub idle_timeout_seconds: u64,
    pub overtime_threshold_hours: Decimal,
    pub overtime_multiplier: Decimal,
}

impl Settings {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX).from_env::<Settings>()
    }

    pub fn payroll_policy(&self) -> Result<PayrollPolicy, DomainError> {
        PayrollPolicy::new(self.overtime_threshold_hours, self.overtime_multiplier)
    }

    pub fn tracking_policy(&self) -> TrackingPolicy {
        TrackingPolicy {
            idle_timeout_seconds: self.idle_timeout_seconds,
            overtime_threshold_hours: self.overtime_threshold_hours,
            overtime_multiplier: self.overtime_multiplier,
        }
    }
}
