//! Environment configuration for the second brain service.
//!
//! The hosted store endpoint and its service key are required; startup is
//! aborted when either is missing.

use std::env;

pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_SERVICE_KEY_ENV: &str = "SUPABASE_SERVICE_KEY";
pub const PORT_ENV: &str = "SECOND_BRAIN_PORT";
pub const TABLE_ENV: &str = "SECOND_BRAIN_TABLE";

pub const DEFAULT_PORT: u16 = 9103;
pub const DEFAULT_TABLE: &str = "memories";

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("SECOND_BRAIN_PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),
}

#[derive(Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub port: u16,
    pub table: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let supabase_url = required(SUPABASE_URL_ENV)?;
        let supabase_service_key = required(SUPABASE_SERVICE_KEY_ENV)?;

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let table = lookup(TABLE_ENV)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        Ok(Self {
            supabase_url,
            supabase_service_key,
            port,
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_requires_store_url() {
        let result = Config::from_lookup(lookup(&[(SUPABASE_SERVICE_KEY_ENV, "key")]));
        assert_eq!(result.err(), Some(ConfigError::Missing(SUPABASE_URL_ENV)));
    }

    #[test]
    fn test_requires_service_key() {
        let result = Config::from_lookup(lookup(&[
            (SUPABASE_URL_ENV, "https://abc.supabase.co"),
            (SUPABASE_SERVICE_KEY_ENV, "   "),
        ]));
        assert_eq!(result.err(), Some(ConfigError::Missing(SUPABASE_SERVICE_KEY_ENV)));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[
            (SUPABASE_URL_ENV, "https://abc.supabase.co"),
            (SUPABASE_SERVICE_KEY_ENV, "service-key"),
        ]))
        .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.table, DEFAULT_TABLE);
        assert_eq!(config.supabase_service_key, "service-key");
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup(&[
            (SUPABASE_URL_ENV, "https://abc.supabase.co"),
            (SUPABASE_SERVICE_KEY_ENV, "service-key"),
            (PORT_ENV, "eighty"),
        ]));
        assert_eq!(result.err(), Some(ConfigError::InvalidPort("eighty".into())));
    }
}
