use crate::engine::DEFAULT_CHANNEL_CAPACITY;
use crate::EngineError;

/// URL prefix of browser-internal pages. These pages are never zoomed by the engine.
const DEFAULT_PRIVILEGED_SCHEME: &str = "chrome:";

/// Log verbosity that can be switched at runtime
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Main engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// URL prefixes of tabs that are exempt from forced zoom
    pub privileged_schemes: Vec<String>,
    /// Capacity of the command channel into the event loop
    pub channel_capacity: usize,
    /// Log level applied when the engine starts. `None` leaves the logger as-is.
    pub log_level: Option<LogLevel>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            privileged_schemes: vec![DEFAULT_PRIVILEGED_SCHEME.to_string()],
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            log_level: None,
        }
    }
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Returns true when the url starts with one of the privileged prefixes.
    pub fn is_privileged(&self, url: &str) -> bool {
        self.privileged_schemes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.channel_capacity == 0 {
            return Err(EngineError::InvalidConfig("channel_capacity must be > 0".into()));
        }
        if self.privileged_schemes.iter().any(|p| p.is_empty()) {
            return Err(EngineError::InvalidConfig("privileged scheme prefix cannot be empty".into()));
        }
        Ok(())
    }
}

/// Builder for [`EngineConfig`]. Unset values keep their defaults.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    privileged_schemes: Option<Vec<String>>,
    extra_schemes: Vec<String>,
    channel_capacity: Option<usize>,
    log_level: Option<LogLevel>,
}

impl EngineConfigBuilder {
    /// Replaces the list of privileged URL prefixes
    pub fn privileged_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.privileged_schemes = Some(schemes.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a privileged URL prefix on top of the configured ones
    pub fn privileged_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.extra_schemes.push(scheme.into());
        self
    }

    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = Some(capacity);
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn build(self) -> Result<EngineConfig, EngineError> {
        let defaults = EngineConfig::default();

        let mut privileged_schemes = self.privileged_schemes.unwrap_or(defaults.privileged_schemes);
        privileged_schemes.extend(self.extra_schemes);

        let config = EngineConfig {
            privileged_schemes,
            channel_capacity: self.channel_capacity.unwrap_or(defaults.channel_capacity),
            log_level: self.log_level.or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }
}
