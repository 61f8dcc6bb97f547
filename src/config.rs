use gloo_net::http::Request;
pub use satinalma_onay_common::ClientConfig;

/// Where the host server publishes the runtime configuration.
pub const CONFIG_URL: &str = "/config.json";

/// Fetch the configuration from the host, falling back to defaults.
pub async fn load() -> ClientConfig {
    match fetch().await {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            ClientConfig::default()
        }
    }
}

async fn fetch() -> Result<ClientConfig, String> {
    let response = Request::get(CONFIG_URL)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    response
        .json::<ClientConfig>()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
