use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use satinalma_onay_common::cookie_value;
use tracing::info;

use crate::config::ServerConfig;

/// Request-time protection: paths under a protected prefix need a non-empty
/// session cookie or they are redirected to the login page.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    login_path: String,
    cookie_name: String,
    protected_prefixes: Vec<String>,
}

impl SessionGuard {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            login_path: config.login_path.clone(),
            cookie_name: config.client.token_key.clone(),
            protected_prefixes: config.client.protected_prefixes.clone(),
        }
    }

    /// `/success` protects `/success` and `/success/...`, not `/successful`.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    pub fn has_session(&self, headers: &HeaderMap) -> bool {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|cookies| cookie_value(cookies, &self.cookie_name).is_some())
    }
}

pub async fn require_session(
    State(guard): State<Arc<SessionGuard>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path();
    if guard.is_protected(path) && !guard.has_session(req.headers()) {
        info!(path, "No session cookie, redirecting to {}", guard.login_path);
        return Redirect::temporary(&guard.login_path).into_response();
    }
    next.run(req).await
}
