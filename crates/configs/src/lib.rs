//! # configs
//!
//! Layered settings: compiled defaults, then `config/default.toml`, then
//! `config/{COMMUNE_ENV}.toml`, then `COMMUNE__SECTION__KEY` environment
//! variables. A `.env` file is loaded first when present.

use std::net::SocketAddr;

use config::{Config, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub membership: MembershipSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("server address: {e}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: SecretString,
    pub token_ttl_secs: i64,
    /// Adds `Secure` to the session cookie; enable behind TLS.
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MembershipSettings {
    /// Reject joins that declare eligibility "no".
    pub reject_ineligible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

pub const ENV_PREFIX: &str = "COMMUNE";
const DEV_JWT_SECRET: &str = "change-me-in-production";

impl Settings {
    /// Loads `.env`, then all layers, then validates.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        let env_name =
            std::env::var(format!("{ENV_PREFIX}_ENV")).unwrap_or_else(|_| "development".into());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{env_name}")).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Compiled defaults only; used by `load` and by tests.
    pub fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite://commune.db")?
            .set_default("database.max_connections", 5)?
            .set_default("auth.jwt_secret", DEV_JWT_SECRET)?
            .set_default("auth.token_ttl_secs", 7 * 24 * 60 * 60)?
            .set_default("auth.cookie_secure", false)?
            .set_default("membership.reject_ineligible", true)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.expose_secret().trim().is_empty() {
            return Err(ConfigError::Invalid("auth.jwt_secret must not be empty".into()));
        }
        if self.auth.token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid("auth.token_ttl_secs must be positive".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        self.server.bind_addr()?;
        Ok(())
    }

    /// True while the compiled development secret is still in use.
    pub fn uses_default_secret(&self) -> bool {
        self.auth.jwt_secret.expose_secret() == DEV_JWT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_defaults() -> Settings {
        Settings::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let settings = from_defaults();
        settings.validate().unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.auth.token_ttl_secs, 604_800);
        assert!(settings.membership.reject_ineligible);
        assert_eq!(settings.log.format, LogFormat::Pretty);
        assert!(settings.uses_default_secret());
    }

    #[test]
    fn overrides_win_over_defaults() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .set_override("server.port", 9090)
            .unwrap()
            .set_override("log.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.log.format, LogFormat::Json);
    }

    #[test]
    fn empty_secret_is_rejected() {
        let mut settings = from_defaults();
        settings.auth.jwt_secret = SecretString::from("  ");
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let mut settings = from_defaults();
        settings.database.max_connections = 0;
        assert!(settings.validate().is_err());
    }
}
