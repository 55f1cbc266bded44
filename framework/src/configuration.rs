use addrole_models::target::{ParseStrategyError, TargetStrategy};
use std::{
    env,
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
    time::Duration,
};

/// Largest message Discord accepts, in characters
pub const MESSAGE_LIMIT: usize = 2000;

const DEFAULT_PREFIX: &str = "!";
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Configuration {
    pub default_prefix: String,
    pub strategy: TargetStrategy,
    pub call_timeout: Duration,
    pub message_limit: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    Strategy(ParseStrategyError),
    Timeout(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ConfigError::Strategy(err) => write!(f, "ADDROLE_TARGETS: {}", err),
            ConfigError::Timeout(raw) => write!(
                f,
                "ADDROLE_CALL_TIMEOUT: expected a number of seconds, found `{}`",
                raw
            ),
        }
    }
}

impl StdError for ConfigError {}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            default_prefix: DEFAULT_PREFIX.into(),
            strategy: TargetStrategy::default(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            message_limit: MESSAGE_LIMIT,
        }
    }
}

impl Configuration {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration out of `ADDROLE_PREFIX`, `ADDROLE_TARGETS` and
    /// `ADDROLE_CALL_TIMEOUT`, falling back to the defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(prefix) = lookup("ADDROLE_PREFIX").filter(|p| !p.trim().is_empty()) {
            config = config.default_prefix(prefix.trim());
        }
        if let Some(strategy) = lookup("ADDROLE_TARGETS") {
            config = config.strategy(strategy.parse().map_err(ConfigError::Strategy)?);
        }
        if let Some(secs) = lookup("ADDROLE_CALL_TIMEOUT") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Timeout(secs))?;
            config = config.call_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    #[must_use]
    pub fn default_prefix(mut self, prefix: &str) -> Self {
        self.default_prefix = prefix.to_string();
        self
    }

    #[must_use]
    pub fn strategy(mut self, strategy: TargetStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }
}
