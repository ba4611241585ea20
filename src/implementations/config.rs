use log::{ debug, info };
use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const ENV_MIN_DURATION: &str = "SESSION_RULES_MIN_DURATION";
pub const ENV_MAX_DURATION: &str = "SESSION_RULES_MAX_DURATION";
pub const ENV_PROXIMITY_MINUTES: &str = "SESSION_RULES_PROXIMITY_MINUTES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Tunables for the scheduling rules
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Shortest session allowed, in minutes
    pub min_duration_minutes: u32,

    /// Longest session allowed, in minutes
    pub max_duration_minutes: u32,

    /// Duration assumed when a proposal or weekly slot does not carry one
    pub default_duration_minutes: u32,

    /// Sessions closer than this to a neighbour are accepted with a warning
    pub proximity_warning_minutes: u32,

    /// Weeks counted against a package's monthly allowance
    pub weeks_per_month: u32,

    /// Accept proposals that start before "now"
    pub allow_past: bool,

    /// Rules skipped during evaluation, by name
    pub disabled_rules: Vec<String>,
}

impl RulesConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: RulesConfig = serde_yaml::from_str(&contents)?;
        debug!("Loaded rules config from {}", path.display());
        Ok(config)
    }

    /// Build the effective configuration: file (or defaults), then environment, then checks
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override durations from environment variables when they are set
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = read_env_minutes(ENV_MIN_DURATION)? {
            info!("Using {}={} from environment", ENV_MIN_DURATION, v);
            self.min_duration_minutes = v;
        }
        if let Some(v) = read_env_minutes(ENV_MAX_DURATION)? {
            info!("Using {}={} from environment", ENV_MAX_DURATION, v);
            self.max_duration_minutes = v;
        }
        if let Some(v) = read_env_minutes(ENV_PROXIMITY_MINUTES)? {
            info!("Using {}={} from environment", ENV_PROXIMITY_MINUTES, v);
            self.proximity_warning_minutes = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_duration_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_duration_minutes".to_string(),
                value: "0".to_string(),
            });
        }
        if self.min_duration_minutes > self.max_duration_minutes {
            return Err(ConfigError::InvalidValue {
                key: "min_duration_minutes".to_string(),
                value: format!(
                    "{} (greater than max_duration_minutes {})",
                    self.min_duration_minutes,
                    self.max_duration_minutes
                ),
            });
        }
        if self.weeks_per_month == 0 {
            return Err(ConfigError::InvalidValue {
                key: "weeks_per_month".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_rule_disabled(&self, name: &str) -> bool {
        self.disabled_rules.iter().any(|r| r == name)
    }
}

fn read_env_minutes(key: &str) -> Result<Option<u32>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => {
            let parsed = raw.trim().parse::<u32>();
            parsed
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue { key: key.to_string(), value: raw })
        }
        Err(_) => Ok(None),
    }
}

/// Default configuration
impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            min_duration_minutes: 15,
            max_duration_minutes: 180,
            default_duration_minutes: 60,
            proximity_warning_minutes: 10,
            weeks_per_month: 4,
            allow_past: false,
            disabled_rules: Vec::new(),
        }
    }
}
