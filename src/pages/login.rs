use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::app::HUB_PATH;
use crate::components::theme_toggle::ThemeToggle;
use crate::config::ClientConfig;
use crate::session::Session;

/// Landing point for unauthenticated users. Tokens are issued elsewhere; the
/// external sign-in flow hands one over as `?token=...`.
#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let handed_over = use_query_map()
        .with_untracked(|q| q.get("token"))
        .filter(|t| !t.is_empty());
    let authenticated = match handed_over {
        Some(token) => {
            session.establish(&token);
            true
        }
        None => session.resync(),
    };

    if authenticated {
        Effect::new(move |_| {
            navigate(HUB_PATH, Default::default());
        });
    }

    let sign_in_url = config.sign_in_url.clone();

    view! {
        <div class="page login-page">
            <div class="hub-card">
                <div class="page-header">
                    <h2>"Oturum Açın"</h2>
                    <ThemeToggle />
                </div>
                <p class="page-description">
                    "Bu uygulamayı kullanmak için oturum açmanız gerekiyor."
                </p>
                {sign_in_url.map(|url| {
                    view! {
                        <a class="btn btn-primary" href=url rel="external">
                            "Giriş Yap"
                        </a>
                    }
                })}
            </div>
        </div>
    }
}
