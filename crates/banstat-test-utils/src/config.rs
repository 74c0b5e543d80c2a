//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values
//! without repeating boilerplate across crate boundaries.

use banstat_config::AppConfig;

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .listen_port(8080)
///     .fail2ban_binary("/bin/true")
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn listen_addr(mut self, addr: &str) -> Self {
        self.config.server.listen_addr = addr.to_string();
        self
    }

    pub fn listen_port(mut self, port: u16) -> Self {
        self.config.server.listen_port = port;
        self
    }

    pub fn fail2ban_binary(mut self, binary: &str) -> Self {
        self.config.fail2ban.binary = binary.to_string();
        self
    }

    pub fn fail2ban_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fail2ban.timeout_secs = secs;
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
