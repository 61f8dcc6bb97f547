use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::config::ClientConfig;
use crate::guard::RequireSession;
use crate::pages::hub::HubPage;
use crate::pages::login::LoginPage;
use crate::pages::purchase_requests::PurchaseRequestsPage;
use crate::session::Session;
use crate::theme::{apply_theme, saved_theme, ThemeContext};

pub const LOGIN_PATH: &str = "/login";
pub const HUB_PATH: &str = "/success";
pub const REQUESTS_PATH: &str = "/purchase-requests";

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let (theme, set_theme) = signal(saved_theme());
    provide_context(ThemeContext { theme, set_theme });
    provide_context(Session::browser(&config.token_key));
    provide_context(config.clone());

    // Apply theme to DOM whenever the signal changes
    Effect::new(move |_| {
        apply_theme(theme.get());
    });

    view! {
        <Router>
            <main class="content">
                <Routes fallback=|| view! { <p class="not-found">"Sayfa bulunamadı"</p> }>
                    <Route path=path!("/") view=|| view! { <Redirect path=HUB_PATH /> } />
                    <Route path=path!("/login") view=LoginPage />
                    <Route
                        path=path!("/success")
                        view=|| view! { <RequireSession><HubPage /></RequireSession> }
                    />
                    <Route
                        path=path!("/purchase-requests")
                        view=|| view! { <RequireSession><PurchaseRequestsPage /></RequireSession> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
