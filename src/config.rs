use config::{Config as ConfigLib, ConfigError, Environment};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC key used to verify inbound bearer tokens.
    pub secret: SecretString,
    /// Expected `iss` claim. When unset, issuer validation is skipped.
    pub issuer: Option<String>,
    /// Clock skew tolerance in seconds applied to `exp` validation.
    pub leeway: u64,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // Build the config
        let config = ConfigLib::builder()
            // Set default values
            .set_default("server.host", "localhost")?
            .set_default("server.port", 8000)?
            .set_default("auth.secret", "insecure-dev-secret")?
            .set_default("auth.leeway", 30)?
            // Override config values via environment variables
            // The environment variables should be prefixed with 'APP_' and use '__' as a separator
            // Example: APP_AUTH__ISSUER=https://issuer.example.com
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}
