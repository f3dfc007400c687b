//! Engine configuration with TOML file support.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shuffle_budget::plan::{
    DEFAULT_COMMIT_UNIT_COST, DEFAULT_REVEAL_UNIT_COST, DEFAULT_UNIT_CAPACITY,
};
use shuffle_budget::BudgetPlan;
use thiserror::Error;

use crate::logging::LogFormat;
use crate::retry::RetryPolicy;
use crate::service::ShuffleSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration for a shuffle deployment.
///
/// Can be loaded from a TOML file via [`ShuffleConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so an
/// empty file is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShuffleConfig {
    /// Minimum number of rounds between commit and the target round.
    #[serde(default = "default_safety_round_gap")]
    pub safety_round_gap: u64,

    /// Identifier of the randomness beacon deployment, reported to callers.
    #[serde(default)]
    pub randomness_beacon_id: u64,

    /// Identifier of the budget top-up deployment, reported to callers.
    #[serde(default)]
    pub opup_id: u64,

    /// Directory holding the commitment database.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub budget: BudgetConfig,

    #[serde(default)]
    pub drand: DrandConfig,

    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(default = "default_commit_unit_cost")]
    pub commit_unit_cost: u64,

    #[serde(default = "default_reveal_unit_cost")]
    pub reveal_unit_cost: u64,

    #[serde(default = "default_unit_capacity")]
    pub unit_capacity: u64,

    /// Size of a finite permit pool. Unset means unmetered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_permits: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrandConfig {
    #[serde(default = "default_drand_url")]
    pub url: String,

    #[serde(default = "default_chain_hash")]
    pub chain_hash: String,

    /// UNIX timestamp of round 1.
    #[serde(default = "default_genesis_time")]
    pub genesis_time: u64,

    /// Seconds between rounds.
    #[serde(default = "default_period")]
    pub period: u64,

    /// Verify BLS signatures of fetched rounds (quicknet key only).
    #[serde(default = "default_true")]
    pub verify_signatures: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_retry_interval")]
    pub interval_secs: u64,

    #[serde(default = "default_retry_attempts")]
    pub max_attempts: u32,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_safety_round_gap() -> u64 {
    1
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./shuffle_data")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_commit_unit_cost() -> u64 {
    DEFAULT_COMMIT_UNIT_COST
}

fn default_reveal_unit_cost() -> u64 {
    DEFAULT_REVEAL_UNIT_COST
}

fn default_unit_capacity() -> u64 {
    DEFAULT_UNIT_CAPACITY
}

fn default_drand_url() -> String {
    shuffle_beacon::drand::DRAND_MAINNET_URL.to_string()
}

fn default_chain_hash() -> String {
    shuffle_beacon::drand::QUICKNET_CHAIN_HASH.to_string()
}

fn default_genesis_time() -> u64 {
    shuffle_beacon::drand::QUICKNET_GENESIS_TIME
}

fn default_period() -> u64 {
    shuffle_beacon::drand::QUICKNET_PERIOD
}

fn default_true() -> bool {
    true
}

fn default_retry_interval() -> u64 {
    10
}

fn default_retry_attempts() -> u32 {
    30
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ShuffleConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.budget.unit_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "budget.unit_capacity",
                reason: "must be positive".into(),
            });
        }
        if self.drand.period == 0 {
            return Err(ConfigError::Invalid {
                field: "drand.period",
                reason: "must be positive".into(),
            });
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "retry.max_attempts",
                reason: "must be at least 1".into(),
            });
        }
        self.log_format()?;
        Ok(())
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        self.log_format
            .parse()
            .map_err(|reason| ConfigError::Invalid {
                field: "log_format",
                reason,
            })
    }

    pub fn settings(&self) -> ShuffleSettings {
        ShuffleSettings {
            safety_round_gap: self.safety_round_gap,
            randomness_beacon_id: self.randomness_beacon_id,
            opup_id: self.opup_id,
            budget: self.budget.plan(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_secs(self.retry.interval_secs),
            max_attempts: self.retry.max_attempts,
        }
    }
}

impl BudgetConfig {
    pub fn plan(&self) -> BudgetPlan {
        BudgetPlan::new(
            self.commit_unit_cost,
            self.reveal_unit_cost,
            self.unit_capacity,
        )
    }
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            safety_round_gap: default_safety_round_gap(),
            randomness_beacon_id: 0,
            opup_id: 0,
            data_dir: default_data_dir(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            budget: BudgetConfig::default(),
            drand: DrandConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            commit_unit_cost: default_commit_unit_cost(),
            reveal_unit_cost: default_reveal_unit_cost(),
            unit_capacity: default_unit_capacity(),
            pool_permits: None,
        }
    }
}

impl Default for DrandConfig {
    fn default() -> Self {
        Self {
            url: default_drand_url(),
            chain_hash: default_chain_hash(),
            genesis_time: default_genesis_time(),
            period: default_period(),
            verify_signatures: default_true(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_retry_interval(),
            max_attempts: default_retry_attempts(),
        }
    }
}
