//! Server configuration (environment-driven, with dev defaults).

use std::path::PathBuf;

use anyhow::Context;
use cartsync_store::Seed;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub seed_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            seed_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            bind: non_empty("CARTSYNC_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            seed_path: non_empty("CARTSYNC_SEED").map(PathBuf::from),
        }
    }

    /// Load the configured seed file, or the built-in demo seed.
    pub fn load_seed(&self) -> anyhow::Result<Seed> {
        let Some(path) = &self.seed_path else {
            tracing::warn!("CARTSYNC_SEED not set; using built-in demo seed");
            return Ok(Seed::demo());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {:?}", path))?;
        Seed::from_json(&raw).with_context(|| format!("failed to parse seed file {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        assert_eq!(ServerConfig::from_lookup(|_| None), ServerConfig::default());
    }

    #[test]
    fn reads_bind_and_seed() {
        let cfg = ServerConfig::from_lookup(|key| match key {
            "CARTSYNC_BIND" => Some("127.0.0.1:4000".into()),
            "CARTSYNC_SEED" => Some("db.json".into()),
            _ => None,
        });
        assert_eq!(cfg.bind, "127.0.0.1:4000");
        assert_eq!(cfg.seed_path, Some(PathBuf::from("db.json")));
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let cfg = ServerConfig {
            seed_path: Some(PathBuf::from("/nonexistent/cartsync/db.json")),
            ..ServerConfig::default()
        };
        assert!(cfg.load_seed().is_err());
    }

    #[test]
    fn falls_back_to_demo_seed() {
        assert_eq!(ServerConfig::default().load_seed().unwrap(), Seed::demo());
    }
}
