//! Environment configuration
//!
//! Required values are validated up front so a misconfigured process
//! fails at startup instead of on first database call.

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

/// Environment variable holding the MongoDB connection string.
pub const MONGO_URI_VAR: &str = "MONGO_URI";
/// Environment variable holding the token signing secret.
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const CORS_ORIGIN_VAR: &str = "CORS_ORIGIN";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Placeholder secret that must never reach a running deployment.
const PLACEHOLDER_SECRET: &str = "devsecret";

/// Configuration error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not set (export it or add it to .env)")]
    Missing { key: &'static str },

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Signing secret. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtSecret(String);

impl JwtSecret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(***)")
    }
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub jwt_secret: JwtSecret,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongo_uri = required(&lookup, MONGO_URI_VAR)?;
        if !(mongo_uri.starts_with("mongodb://") || mongo_uri.starts_with("mongodb+srv://")) {
            return Err(ConfigError::Invalid {
                key: MONGO_URI_VAR,
                reason: "expected a mongodb:// or mongodb+srv:// connection string".into(),
            });
        }

        let jwt_secret = required(&lookup, JWT_SECRET_VAR)?;
        if jwt_secret == PLACEHOLDER_SECRET {
            return Err(ConfigError::Invalid {
                key: JWT_SECRET_VAR,
                reason: format!("'{}' is a placeholder, set a real secret", PLACEHOLDER_SECRET),
            });
        }

        let bind_addr = optional(&lookup, BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: BIND_ADDR_VAR,
                reason: e.to_string(),
            })?;

        let cors_origin =
            optional(&lookup, CORS_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Self {
            mongo_uri,
            jwt_secret: JwtSecret(jwt_secret),
            bind_addr,
            cors_origin,
        })
    }
}

fn optional<F>(lookup: &F, key: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing { key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_required_values_with_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("MONGO_URI", "mongodb://localhost:27017"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.mongo_uri, "mongodb://localhost:27017");
        assert_eq!(config.jwt_secret.expose(), "s3cret");
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.cors_origin, "http://localhost:3000");
    }

    #[test]
    fn missing_mongo_uri_fails_fast() {
        let err = Config::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing { key: "MONGO_URI" });
        assert!(err.to_string().contains("MONGO_URI is not set"));
    }

    #[test]
    fn blank_mongo_uri_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("MONGO_URI", "   "), ("JWT_SECRET", "s3cret")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing { key: "MONGO_URI" });
    }

    #[test]
    fn non_mongo_uri_is_invalid() {
        let err = Config::from_lookup(lookup(&[
            ("MONGO_URI", "postgres://localhost/db"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "MONGO_URI", .. }));
    }

    #[test]
    fn missing_secret_has_no_default() {
        let err = Config::from_lookup(lookup(&[("MONGO_URI", "mongodb://localhost")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing { key: "JWT_SECRET" });
    }

    #[test]
    fn placeholder_secret_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("MONGO_URI", "mongodb://localhost"),
            ("JWT_SECRET", "devsecret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_SECRET", .. }));
    }

    #[test]
    fn overrides_bind_and_origin() {
        let config = Config::from_lookup(lookup(&[
            ("MONGO_URI", "mongodb+srv://cluster.example.net"),
            ("JWT_SECRET", "s3cret"),
            ("BIND_ADDR", "0.0.0.0:9000"),
            ("CORS_ORIGIN", "https://app.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.cors_origin, "https://app.example.com");
    }

    #[test]
    fn bad_bind_addr_is_invalid() {
        let err = Config::from_lookup(lookup(&[
            ("MONGO_URI", "mongodb://localhost"),
            ("JWT_SECRET", "s3cret"),
            ("BIND_ADDR", "not-an-addr"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BIND_ADDR", .. }));
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = JwtSecret("hunter2".into());
        assert_eq!(format!("{:?}", secret), "JwtSecret(***)");
    }
}
