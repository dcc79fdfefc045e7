//! Runtime configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub search_url: String,
    pub generate_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub server: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    pub ai: AiConfig,
    /// `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());

        let bind_addr = parse("BIND_ADDR", get("BIND_ADDR", DEFAULT_BIND_ADDR))?;
        let timeout = match lookup("AI_TIMEOUT_SECS") {
            Some(secs) => match parse("AI_TIMEOUT_SECS", secs.clone())? {
                0 => {
                    return Err(ConfigError::Invalid {
                        var: "AI_TIMEOUT_SECS",
                        value: secs,
                    })
                }
                secs => Duration::from_secs(secs),
            },
            None => DEFAULT_AI_TIMEOUT,
        };

        let ai = AiConfig {
            search_url: base_url(get("SEARCH_URL", DEFAULT_SEARCH_URL)),
            generate_url: base_url(get("GENERATE_URL", DEFAULT_GENERATE_URL)),
            model: get("AI_MODEL", DEFAULT_MODEL),
            timeout,
        };

        let database = match lookup("DB_SERVER") {
            Some(server) => {
                let required = |var: &'static str| lookup(var).ok_or(ConfigError::Missing(var));
                let port = match lookup("DB_PORT") {
                    Some(port) => parse("DB_PORT", port)?,
                    None => DEFAULT_DB_PORT,
                };
                Some(DatabaseConfig {
                    server,
                    port,
                    name: required("DB_NAME")?,
                    user: required("DB_USER")?,
                    password: required("DB_PASSWORD")?,
                })
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            cors_origin: get("CORS_ORIGIN", DEFAULT_CORS_ORIGIN),
            ai,
            database,
        })
    }
}

fn parse<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

fn base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
