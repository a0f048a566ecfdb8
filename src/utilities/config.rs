//! Service configuration loaded from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `BIND_HOST` | `0.0.0.0` | listen address |
//! | `PORT` | `8080` | listen port |
//! | `CHAT_API_ENDPOINT` | Gemini `generateContent` URL | remote endpoint |
//! | `CHAT_API_KEY` / `GEMINI_API_KEY` | unset | bearer credential (also `?key=` for the Generative Language host); remote disabled when unset |
//! | `CHAT_API_TIMEOUT_SECS` | `8` | per-call timeout |
//! | `CHAT_KEYWORDS_FILE` | unset | YAML keyword table; built-in table when unset |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::chat::keyword_table::KeywordTable;
use crate::chat::remote::{RemoteCallConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::utilities::errors::ConfigError;

/// Everything the server binary needs at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub remote: RemoteCallConfig,
    pub keywords_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("BIND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", get("PORT"), 8080u16)?;

        let endpoint = get("CHAT_API_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let credential = get("CHAT_API_KEY").or_else(|| get("GEMINI_API_KEY"));
        let timeout = match get("CHAT_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = parse_or("CHAT_API_TIMEOUT_SECS", Some(raw.clone()), 0)?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "CHAT_API_TIMEOUT_SECS".into(),
                        value: raw,
                    });
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            host,
            port,
            remote: RemoteCallConfig::new(endpoint, credential).with_timeout(timeout),
            keywords_file: get("CHAT_KEYWORDS_FILE").map(PathBuf::from),
        })
    }

    /// `host:port` for the listener; IPv6 hosts are bracketed.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// The configured keyword table, or the built-in one.
    pub fn keyword_table(&self) -> Result<KeywordTable, ConfigError> {
        match &self.keywords_file {
            Some(path) => KeywordTable::load(path),
            None => Ok(KeywordTable::builtin()),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.remote.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.remote.timeout, DEFAULT_TIMEOUT);
        assert!(!config.remote.enabled());
        assert!(config.keywords_file.is_none());
        assert_eq!(config.keyword_table().unwrap(), KeywordTable::builtin());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BIND_HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("CHAT_API_ENDPOINT", "http://localhost:9999/generate"),
            ("CHAT_API_KEY", "sk-123"),
            ("CHAT_API_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.remote.endpoint, "http://localhost:9999/generate");
        assert_eq!(config.remote.credential.as_deref(), Some("sk-123"));
        assert_eq!(config.remote.timeout, Duration::from_secs(3));
        assert!(config.remote.enabled());
    }

    #[test]
    fn test_bind_addr_brackets_ipv6() {
        let config = load(&[("BIND_HOST", "::"), ("PORT", "9000")]).unwrap();
        assert_eq!(config.bind_addr(), "[::]:9000");
        assert!(config.bind_addr().parse::<std::net::SocketAddr>().is_ok());

        let config = load(&[("BIND_HOST", "[::1]")]).unwrap();
        assert_eq!(config.bind_addr(), "[::1]:8080");

        let config = load(&[("BIND_HOST", "localhost")]).unwrap();
        assert_eq!(config.bind_addr(), "localhost:8080");
    }

    #[test]
    fn test_gemini_key_fallback() {
        let config = load(&[("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.remote.credential.as_deref(), Some("g-key"));

        let config = load(&[("CHAT_API_KEY", "  "), ("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.remote.credential.as_deref(), Some("g-key"));
    }

    #[test]
    fn test_blank_key_disables_remote() {
        let config = load(&[("CHAT_API_KEY", "   ")]).unwrap();
        assert!(config.remote.credential.is_none());
        assert!(!config.remote.enabled());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[("CHAT_API_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[("CHAT_API_TIMEOUT_SECS", "-1")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_keywords_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kw.yaml");
        std::fs::write(&path, "keywords:\n  - keyword: r\n    answer: Try tidyverse.\n").unwrap();

        let config = load(&[("CHAT_KEYWORDS_FILE", path.to_str().unwrap())]).unwrap();
        let table = config.keyword_table().unwrap();
        assert_eq!(table.len(), 1);
    }
}
