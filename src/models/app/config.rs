use crate::services::site_audit_service::lighthouse::PAGESPEED_ENDPOINT;
use dotenv::dotenv;
use log::warn;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_path: String,
    pub pagespeed_api_key: Option<String>,
    pub pagespeed_endpoint: String,
    pub cache_ttl: Duration,
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0:3043".to_string(),
            database_path: "data.sqlite".to_string(),
            pagespeed_api_key: None,
            pagespeed_endpoint: PAGESPEED_ENDPOINT.to_string(),
            cache_ttl: Duration::from_secs(10 * 60),
            history_limit: 20,
        }
    }
}

impl Config {
    /// Reads `.env` (when present) and the process environment.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let ttl_minutes = parse_or(var("CACHE_TTL_MINUTES"), "CACHE_TTL_MINUTES", 10u64);

        Config {
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_path: var("DATABASE_PATH").unwrap_or(defaults.database_path),
            pagespeed_api_key: var("PAGESPEED_API_KEY"),
            pagespeed_endpoint: var("PAGESPEED_ENDPOINT").unwrap_or(defaults.pagespeed_endpoint),
            cache_ttl: Duration::from_secs(ttl_minutes * 60),
            history_limit: parse_or(var("HISTORY_LIMIT"), "HISTORY_LIMIT", defaults.history_limit),
        }
    }
}

fn parse_or<T: FromStr + Copy>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value {:?}, using the default", key, raw);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_addr, "0.0.0.0:3043");
        assert_eq!(cfg.cache_ttl, Duration::from_secs(600));
        assert_eq!(cfg.pagespeed_endpoint, PAGESPEED_ENDPOINT);
        assert!(cfg.pagespeed_api_key.is_none());
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let cfg = config(&[
            ("PAGESPEED_API_KEY", "abc"),
            ("CACHE_TTL_MINUTES", "2"),
            ("HISTORY_LIMIT", "lots"),
            ("DATABASE_PATH", "  "),
        ]);
        assert_eq!(cfg.pagespeed_api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.cache_ttl, Duration::from_secs(120));
        assert_eq!(cfg.history_limit, 20);
        assert_eq!(cfg.database_path, "data.sqlite");
    }
}
