use serde::{Deserialize, Serialize};

/// Runtime settings the host server publishes at `/config.json` and the
/// browser reads at start-up. Any field left out keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub page_size: u32,
    /// Local storage key and cookie name of the session token
    pub token_key: String,
    pub protected_prefixes: Vec<String>,
    pub order_approval_url: String,
    pub api_docs_url: String,
    pub sign_in_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8098".to_string(),
            page_size: 10,
            token_key: "token".to_string(),
            protected_prefixes: vec!["/success".to_string(), "/purchase-requests".to_string()],
            order_approval_url: "http://localhost:8098/purchase-orders".to_string(),
            api_docs_url: "http://localhost:8098/swagger-ui/index.html".to_string(),
            sign_in_url: None,
        }
    }
}

/// Look up `name` in a `a=1; b=2` cookie string. Values are percent-decoded
/// and an empty value counts as absent.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base_url": "https://erp.example.com", "page_size": 25}"#)
                .unwrap();
        assert_eq!(config.api_base_url, "https://erp.example.com");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.token_key, "token");
        assert_eq!(config.protected_prefixes, vec!["/success", "/purchase-requests"]);
        assert_eq!(config.sign_in_url, None);
    }

    #[test]
    fn test_published_config_reads_back_unchanged() {
        let mut config = ClientConfig::default();
        config.sign_in_url = Some("https://sso.example.com/login".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<ClientConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_cookie_value_lookup() {
        let cookies = "theme=dark; token=eyJ%2Babc; other=1";
        assert_eq!(cookie_value(cookies, "token").as_deref(), Some("eyJ+abc"));
        assert_eq!(cookie_value(cookies, "theme").as_deref(), Some("dark"));
        assert_eq!(cookie_value(cookies, "missing"), None);
        assert_eq!(cookie_value("tokens=abc", "token"), None);
        assert_eq!(cookie_value("token=", "token"), None);
        assert_eq!(cookie_value("", "token"), None);
    }
}
