use serde::Deserialize;

use collab_core::config::{Config, MissingVar, require};
use collab_core::tracing::LogFormat;

/// Which store adapter backs the repositories. Env var: `STORAGE_BACKEND`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local tables, lost on exit.
    Memory,
}

/// API service configuration loaded from environment variables.
///
/// Nothing here is required at startup. `DATABASE_URL` and `JWT_SECRET` are checked
/// when first needed and reported per request.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub storage_backend: StorageBackend,
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: Option<String>,
    /// HMAC secret for session tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: Option<String>,
    /// TCP port for the HTTP server (default 3110). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_api_port() -> u16 {
    3110
}

impl Config for ApiConfig {}

impl ApiConfig {
    pub fn database_url(&self) -> Result<&str, MissingVar> {
        require(self.database_url.as_deref(), "DATABASE_URL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn should_apply_defaults() {
        let cfg = ApiConfig::from_pairs(pairs(&[])).unwrap();
        assert_eq!(cfg.storage_backend, StorageBackend::Postgres);
        assert_eq!(cfg.api_port, 3110);
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert!(!cfg.run_migrations);
        assert_eq!(cfg.database_url(), Err(MissingVar("DATABASE_URL")));
    }

    #[test]
    fn should_read_every_variable() {
        let cfg = ApiConfig::from_pairs(pairs(&[
            ("STORAGE_BACKEND", "memory"),
            ("DATABASE_URL", "postgres://localhost/collab"),
            ("JWT_SECRET", "s3cret"),
            ("API_PORT", "8080"),
            ("LOG_FORMAT", "pretty"),
            ("RUN_MIGRATIONS", "true"),
        ]))
        .unwrap();
        assert_eq!(cfg.storage_backend, StorageBackend::Memory);
        assert_eq!(cfg.database_url(), Ok("postgres://localhost/collab"));
        assert_eq!(cfg.jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(cfg.api_port, 8080);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert!(cfg.run_migrations);
    }

    #[test]
    fn should_treat_blank_database_url_as_missing() {
        let cfg = ApiConfig::from_pairs(pairs(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(cfg.database_url().is_err());
    }

    #[test]
    fn should_reject_unknown_backend() {
        assert!(ApiConfig::from_pairs(pairs(&[("STORAGE_BACKEND", "sqlite")])).is_err());
    }
}
