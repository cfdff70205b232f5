use svgbind_extract::logging::LoggingConfig;
use svgbind_extract::ExtractConfig;

/// Startup configuration for an [`SvgHost`](crate::SvgHost).
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    pub extract: ExtractConfig,
    /// Installs an `env_logger` backend when set. Leave `None` when the
    /// embedding application brings its own `log` implementation.
    pub logging: Option<LoggingConfig>,
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extract(mut self, extract: ExtractConfig) -> Self {
        self.extract = extract;
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }
}
