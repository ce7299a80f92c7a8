use once_cell::sync::Lazy;
use std::env;

/// Process-wide configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string for the record store. Defaults to a local SQLite file.
    pub database_url: String,
    /// Shared HS256 secret used to verify inbound tokens and sign service tokens.
    pub jwt_secret: String,
    /// Base URL of the external token-issuing service.
    pub token_provider_url: String,
    /// Base URL of the matcher service. Empty disables outbound notifications.
    pub matcher_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATABASE_IP") {
            self.database_url = v;
        }
        if let Ok(v) = env::var("OAUTH_SIGN_KEY") {
            self.jwt_secret = v;
        }
        if let Ok(v) = env::var("OAUTH_TOKEN_PROVIDER") {
            self.token_provider_url = v;
        }
        if let Ok(v) = env::var("CARD_MATCHER_IP") {
            self.matcher_url = v;
        }
        self
    }

    fn defaults() -> Self {
        Self {
            database_url: "sqlite://./card_trader.db".to_string(),
            jwt_secret: String::new(),
            token_provider_url: String::new(),
            matcher_url: String::new(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
