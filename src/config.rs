// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! All settings come from environment variables and are read once at
//! startup into [`AppConfig`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Root of the JSON-file store | unset (in-memory store) |
//! | `JWT_SECRET` | HMAC signing secret, at least 32 bytes | random per process |
//! | `JWT_EXPIRATION_SECS` | Token validity window in seconds | `86400` |
//! | `SEED_ADMIN_EMAIL` | Admin account created at startup if absent | unset |
//! | `SEED_ADMIN_PASSWORD` | Password for the seeded admin | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Unset means the process keeps everything in memory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Shared by every instance that must accept each other's tokens.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const JWT_EXPIRATION_ENV: &str = "JWT_EXPIRATION_SECS";

pub const SEED_ADMIN_EMAIL_ENV: &str = "SEED_ADMIN_EMAIL";
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";

pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_JWT_EXPIRATION_SECS: i64 = 86_400;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// HS256 wants at least as many key bytes as the digest.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("JWT_SECRET must be at least 32 bytes")]
    SecretTooShort,

    #[error("SEED_ADMIN_EMAIL and SEED_ADMIN_PASSWORD must be set together")]
    IncompleteSeedAdmin,

    #[error("Failed to generate signing secret: {0}")]
    Entropy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Credentials for the admin account created at startup.
#[derive(Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: Option<PathBuf>,
    pub jwt_secret: Vec<u8>,
    /// True when no secret was configured and one was generated.
    pub jwt_secret_generated: bool,
    pub token_validity: chrono::Duration,
    pub seed_admin: Option<SeedAdmin>,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("data_dir", &self.data_dir)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_secret_generated", &self.jwt_secret_generated)
            .field("token_validity", &self.token_validity)
            .field("seed_admin", &self.seed_admin)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let (jwt_secret, jwt_secret_generated) = match get(JWT_SECRET_ENV) {
            Some(secret) if secret.len() < MIN_SECRET_LEN => return Err(ConfigError::SecretTooShort),
            Some(secret) => (secret.into_bytes(), false),
            None => (random_secret()?, true),
        };

        let validity_secs = match get(JWT_EXPIRATION_ENV) {
            Some(raw) => raw.trim().parse::<i64>().map_err(|e| ConfigError::Invalid {
                name: JWT_EXPIRATION_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_JWT_EXPIRATION_SECS,
        };
        if validity_secs <= 0 {
            return Err(ConfigError::Invalid {
                name: JWT_EXPIRATION_ENV,
                reason: "must be positive".to_string(),
            });
        }

        let seed_admin = match (get(SEED_ADMIN_EMAIL_ENV), get(SEED_ADMIN_PASSWORD_ENV)) {
            (Some(email), Some(password)) => Some(SeedAdmin { email, password }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteSeedAdmin),
        };

        Ok(Self {
            bind_addr,
            data_dir: get(DATA_DIR_ENV).map(PathBuf::from),
            jwt_secret,
            jwt_secret_generated,
            token_validity: chrono::Duration::seconds(validity_secs),
            seed_admin,
            log_format: LogFormat::parse(get(LOG_FORMAT_ENV).as_deref()),
        })
    }
}

fn random_secret() -> Result<Vec<u8>, ConfigError> {
    let mut secret = vec![0u8; 64];
    getrandom::getrandom(&mut secret).map_err(|e| ConfigError::Entropy(e.to_string()))?;
    Ok(secret)
}
