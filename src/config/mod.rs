use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// One year.
pub const MAX_TOKEN_EXPIRY_HOURS: u64 = 24 * 365;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Configuration value for {0} must not be empty")]
    Empty(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    /// Admin account created by `serve` when missing.
    pub bootstrap_admin: Option<AdminSeed>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Empty means any origin is allowed.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub token_expiry_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSeed {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl DatabaseConfig {
    /// `memory://` selects the in-process store.
    pub fn is_memory(&self) -> bool {
        self.url.starts_with("memory:")
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// The signing secret and database URL are required; there are no
    /// built-in fallbacks for either.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let jwt_secret = lookup("JWT_SECRET")
            .or_else(|| lookup("SECRET_KEY"))
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Empty("JWT_SECRET"));
        }

        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("MONGO_URI"))
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        if database_url.trim().is_empty() {
            return Err(ConfigError::Empty("DATABASE_URL"));
        }
        if url::Url::parse(&database_url).is_err() {
            return Err(ConfigError::Invalid {
                key: "DATABASE_URL",
                value: database_url,
            });
        }

        let mut config = match environment {
            Environment::Production => Self::production(jwt_secret, database_url),
            Environment::Staging => Self::staging(jwt_secret, database_url),
            Environment::Development => Self::development(jwt_secret, database_url),
        };
        config.apply_overrides(&lookup)?;

        if let Some(email) = lookup("BOOTSTRAP_ADMIN_EMAIL").filter(|e| !e.trim().is_empty()) {
            let password = lookup("ADMIN_PASSWORD").ok_or(ConfigError::Missing("ADMIN_PASSWORD"))?;
            config.bootstrap_admin = Some(AdminSeed {
                email: email.trim().to_string(),
                password,
            });
        }
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PORT") {
            self.server.port = parse_value("PORT", v)?;
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.server.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_value("DATABASE_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_value("DATABASE_CONNECTION_TIMEOUT", v)?;
        }
        if let Some(v) = lookup("TOKEN_EXPIRY_HOURS") {
            let hours: u64 = parse_value("TOKEN_EXPIRY_HOURS", v.clone())?;
            if !(1..=MAX_TOKEN_EXPIRY_HOURS).contains(&hours) {
                return Err(ConfigError::Invalid { key: "TOKEN_EXPIRY_HOURS", value: v });
            }
            self.security.token_expiry_hours = hours;
        }
        Ok(())
    }

    fn development(jwt_secret: String, database_url: String) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 5000,
                cors_origins: vec![],
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret,
                token_expiry_hours: 24,
            },
            bootstrap_admin: None,
        }
    }

    fn staging(jwt_secret: String, database_url: String) -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 5000,
                cors_origins: vec![],
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                jwt_secret,
                token_expiry_hours: 24,
            },
            bootstrap_admin: None,
        }
    }

    fn production(jwt_secret: String, database_url: String) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 5000,
                cors_origins: vec![],
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret,
                token_expiry_hours: 24,
            },
            bootstrap_admin: None,
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_secret_fails_closed() {
        let result = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "memory://")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_blank_secret_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "   "),
            ("DATABASE_URL", "memory://"),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::Empty("JWT_SECRET"));
    }

    #[test]
    fn test_missing_database_url_fails() {
        let result = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_legacy_names_are_accepted() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SECRET_KEY", "legacy"),
            ("MONGO_URI", "postgres://localhost/restaurants"),
        ]))
        .unwrap();
        assert_eq!(config.security.jwt_secret, "legacy");
        assert_eq!(config.database.url, "postgres://localhost/restaurants");
        assert!(!config.database.is_memory());
    }

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "memory://"),
        ]))
        .unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.security.token_expiry_hours, 24);
        assert!(config.database.is_memory());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "memory://"),
            ("PORT", "8080"),
            ("SECURITY_CORS_ORIGINS", "https://a.example, https://b.example"),
        ]))
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.server.cors_origins.len(), 2);
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "memory://"),
            ("PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));
    }

    #[test]
    fn test_token_expiry_is_bounded() {
        for hours in ["0", "8761", "3000000000"] {
            let result = AppConfig::from_lookup(lookup_from(&[
                ("JWT_SECRET", "s3cret"),
                ("DATABASE_URL", "memory://"),
                ("TOKEN_EXPIRY_HOURS", hours),
            ]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { key: "TOKEN_EXPIRY_HOURS", .. })),
                "{hours}"
            );
        }

        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "memory://"),
            ("TOKEN_EXPIRY_HOURS", "8760"),
        ]))
        .unwrap();
        assert_eq!(config.security.token_expiry_hours, MAX_TOKEN_EXPIRY_HOURS);
    }

    #[test]
    fn test_bootstrap_admin_needs_password() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "memory://"),
            ("BOOTSTRAP_ADMIN_EMAIL", "chef@example.com"),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("ADMIN_PASSWORD"));

        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "memory://"),
            ("BOOTSTRAP_ADMIN_EMAIL", " chef@example.com "),
            ("ADMIN_PASSWORD", "longenough"),
        ]))
        .unwrap();
        let seed = config.bootstrap_admin.unwrap();
        assert_eq!(seed.email, "chef@example.com");
        assert_eq!(seed.password, "longenough");
    }
}
