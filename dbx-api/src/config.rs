use dbx_apps::WorkspaceConfig;
use thiserror::Error;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABRICKS_HOST environment variable is required")]
    MissingHost,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub databricks_host: String,
    pub databricks_client_id: Option<String>,
    pub allowed_origins: Vec<String>,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

/// `LOG_LEVEL`, readable before the rest of the config so logging comes up first
pub fn log_level() -> String {
    std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_host(raw: &str) -> String {
    let host = raw.trim().trim_end_matches('/');
    if host.is_empty() || host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            databricks_host: normalize_host(&lookup("DATABRICKS_HOST").unwrap_or_default()),
            databricks_client_id: lookup("DATABRICKS_CLIENT_ID").filter(|id| !id.is_empty()),
            allowed_origins: parse_origins(
                &lookup("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(8000),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.databricks_host.is_empty() {
            return Err(ConfigError::MissingHost);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn workspace(&self) -> WorkspaceConfig {
        WorkspaceConfig {
            host: self.databricks_host.clone(),
            client_id: self.databricks_client_id.clone(),
        }
    }
}
