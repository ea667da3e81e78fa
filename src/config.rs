use std::env;
use std::str::FromStr;

use crate::conflict::ConflictPolicy;
use crate::error::AppError;
use crate::scheduling::ConflictMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Mongo,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "mongo" | "mongodb" => Ok(Self::Mongo),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub frontend_origin: String,
    pub store_backend: StoreBackend,
    pub mongo_uri: Option<String>,
    pub database_name: String,
    pub seed_demo_data: bool,
    pub conflict_mode: ConflictMode,
    pub conflict_policy: ConflictPolicy,
    pub imminent_window_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 5000,
            frontend_origin: "http://localhost:3000".to_string(),
            store_backend: StoreBackend::Memory,
            mongo_uri: None,
            database_name: "manutenzioni".to_string(),
            seed_demo_data: true,
            conflict_mode: ConflictMode::Warn,
            conflict_policy: ConflictPolicy::default(),
            imminent_window_days: 3,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store_backend = parse_or(&parsed, "STORE_BACKEND", defaults.store_backend)?;
        let mongo_uri = parsed("MONGO_URI");
        if store_backend == StoreBackend::Mongo && mongo_uri.is_none() {
            return Err(AppError::Config(
                "MONGO_URI must be set when STORE_BACKEND=mongo".into(),
            ));
        }

        let imminent_window_days = parse_or(&parsed, "IMMINENT_WINDOW_DAYS", defaults.imminent_window_days)?;
        if imminent_window_days < 1 {
            return Err(AppError::Config(
                "IMMINENT_WINDOW_DAYS must be at least 1".into(),
            ));
        }

        Ok(Self {
            bind_addr: parsed("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: parse_or(&parsed, "PORT", defaults.port)?,
            frontend_origin: parsed("FRONTEND_ORIGIN").unwrap_or(defaults.frontend_origin),
            store_backend,
            mongo_uri,
            database_name: parsed("DATABASE_NAME").unwrap_or(defaults.database_name),
            seed_demo_data: parse_or(&parsed, "SEED_DEMO_DATA", defaults.seed_demo_data)?,
            conflict_mode: parse_or(&parsed, "CONFLICT_MODE", defaults.conflict_mode)?,
            conflict_policy: ConflictPolicy {
                ignore_completed_tasks: parse_or(
                    &parsed,
                    "CONFLICT_IGNORE_COMPLETED",
                    defaults.conflict_policy.ignore_completed_tasks,
                )?,
            },
            imminent_window_days,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{}: {}", key, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.conflict_mode, ConflictMode::Warn);
        assert!(config.conflict_policy.ignore_completed_tasks);
        assert_eq!(config.imminent_window_days, 3);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("CONFLICT_MODE", "block"),
            ("CONFLICT_IGNORE_COMPLETED", "false"),
            ("STORE_BACKEND", "mongo"),
            ("MONGO_URI", "mongodb://localhost:27017"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.conflict_mode, ConflictMode::Block);
        assert!(!config.conflict_policy.ignore_completed_tasks);
        assert_eq!(config.store_backend, StoreBackend::Mongo);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(config_from(&[("PORT", "http")]), Err(AppError::Config(_))));
        assert!(matches!(
            config_from(&[("STORE_BACKEND", "mongo")]),
            Err(AppError::Config(_))
        ));
        assert!(config_from(&[("CONFLICT_MODE", "maybe")]).is_err());
        assert!(config_from(&[("IMMINENT_WINDOW_DAYS", "0")]).is_err());
    }
}
