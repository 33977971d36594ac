/// Runtime configuration for the dispatch core.
///
/// Built once at startup and handed to the listener by value; there is no
/// mutable global configuration.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Deployment environment name, drives log level selection
    pub environment: String,
    /// Message kind this core recognizes; other kinds pass through untouched
    pub recognized_kind: String,
    /// Directory for structured log files
    pub log_dir: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            recognized_kind: crate::messaging::CI_CHANGE_STATE_KIND.to_string(),
            log_dir: "log".to_string(),
        }
    }
}

impl DispatchConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(environment) = std::env::var("OPSMON_ENV") {
            config.environment = environment;
        }

        if let Ok(recognized_kind) = std::env::var("OPSMON_RECOGNIZED_KIND") {
            config.recognized_kind = recognized_kind;
        }

        if let Ok(log_dir) = std::env::var("OPSMON_LOG_DIR") {
            config.log_dir = log_dir;
        }

        config
    }
}
