//! Render-time route protection. The host server runs the same check against
//! the token cookie before any page is served; this covers client-side
//! navigation and tokens that only exist in local storage.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::LOGIN_PATH;
use crate::config::ClientConfig;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct RoutePolicy {
    login_path: String,
    protected_prefixes: Vec<String>,
}

impl RoutePolicy {
    pub fn new(login_path: impl Into<String>, protected_prefixes: Vec<String>) -> Self {
        Self {
            login_path: login_path.into(),
            protected_prefixes,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(LOGIN_PATH, config.protected_prefixes.clone())
    }

    /// A prefix matches itself and anything below it, but not `/prefixfoo`.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    pub fn decide(&self, path: &str, authenticated: bool) -> Access {
        if authenticated || !self.is_protected(path) {
            Access::Granted
        } else {
            Access::Redirect(self.login_path.clone())
        }
    }
}

/// Renders children only when the session allows the current path; otherwise
/// navigates to the login page.
#[component]
pub fn RequireSession(children: Children) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let session = expect_context::<Session>();
    let path = use_location().pathname.get_untracked();

    match RoutePolicy::from_config(&config).decide(&path, session.is_authenticated()) {
        Access::Granted => children().into_any(),
        Access::Redirect(login) => {
            log::info!("No session token for {}, redirecting to {}", path, login);
            let navigate = use_navigate();
            Effect::new(move |_| {
                navigate(&login, Default::default());
            });
            view! { <p class="redirect-notice">"Giriş sayfasına yönlendiriliyor..."</p> }.into_any()
        }
    }
}
