use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

pub use satinalma_onay_common::ClientConfig;

use crate::error::ServerError;

const CONFIG_ENV: &str = "SATINALMA_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, e.g. "127.0.0.1:3000"
    pub addr: String,
    /// Directory holding the compiled front-end (`index.html` and assets)
    pub dist_dir: PathBuf,
    /// Where the session guard sends requests without a token cookie
    pub login_path: String,
    pub client: ClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            dist_dir: PathBuf::from("dist"),
            login_path: "/login".to_string(),
            client: ClientConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from `$SATINALMA_CONFIG` or the user config directory, then apply
    /// `SATINALMA_*` environment overrides. A missing file means defaults.
    pub fn load() -> Result<Self, ServerError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join("satinalma-onay").join("server.toml")));

        let mut config = match path {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            Some(path) => {
                warn!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(path).map_err(|source| ServerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ServerError> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("SATINALMA_ADDR") {
            self.addr = addr;
        }
        if let Some(dir) = lookup("SATINALMA_DIST_DIR") {
            self.dist_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("SATINALMA_API_BASE_URL") {
            self.client.api_base_url = url;
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        self.addr
            .parse()
            .map_err(|e| ServerError::Config(format!("Invalid listen address '{}': {}", self.addr, e)))
    }

    pub fn validate(&self) -> Result<(), ServerError> {
        self.socket_addr()?;

        let client = &self.client;
        let urls = [
            ("api_base_url", Some(&client.api_base_url)),
            ("order_approval_url", Some(&client.order_approval_url)),
            ("api_docs_url", Some(&client.api_docs_url)),
            ("sign_in_url", client.sign_in_url.as_ref()),
        ];
        for (name, value) in urls {
            if let Some(value) = value {
                Url::parse(value)
                    .map_err(|e| ServerError::Config(format!("Invalid {} '{}': {}", name, value, e)))?;
            }
        }

        let paths = std::iter::once(&self.login_path).chain(&client.protected_prefixes);
        for path in paths {
            if !path.starts_with('/') {
                return Err(ServerError::Config(format!(
                    "Path '{}' must start with '/'",
                    path
                )));
            }
        }

        if client.page_size == 0 {
            return Err(ServerError::Config("page_size must be at least 1".to_string()));
        }
        if client.token_key.is_empty() {
            return Err(ServerError::Config("token_key must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.client.page_size, 10);
        assert_eq!(config.login_path, "/login");
    }

    #[test]
    fn test_parse_toml_with_client_section() {
        let config = ServerConfig::from_toml_str(
            r#"
            addr = "0.0.0.0:8080"
            dist_dir = "/srv/onay"

            [client]
            api_base_url = "https://erp.example.com"
            sign_in_url = "https://sso.example.com/login"
            "#,
        )
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.dist_dir, PathBuf::from("/srv/onay"));
        assert_eq!(config.client.api_base_url, "https://erp.example.com");
        assert_eq!(config.client.token_key, "token");
        assert_eq!(config.login_path, "/login");
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = ServerConfig::from_toml_str("addr = [").unwrap_err();
        assert!(matches!(err, ServerError::Parse(_)));
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SATINALMA_ADDR", "0.0.0.0:9000"),
            ("SATINALMA_API_BASE_URL", "https://api.example.com"),
        ]);
        let mut config = ServerConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.addr, "0.0.0.0:9000");
        assert_eq!(config.client.api_base_url, "https://api.example.com");
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = ServerConfig::default();
        config.addr = "not an address".to_string();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.client.api_base_url = "localhost".to_string();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.client.protected_prefixes.push("success".to_string());
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.client.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ServerConfig::from_file(Path::new("/nonexistent/server.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/server.toml"));
    }
}
