use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::{LOGIN_PATH, REQUESTS_PATH};
use crate::components::theme_toggle::ThemeToggle;
use crate::config::ClientConfig;
use crate::session::Session;

fn open_in_new_window(url: &str) {
    if let Some(window) = web_sys::window() {
        if window.open_with_url_and_target(url, "_blank").is_err() {
            log::warn!("Failed to open {}", url);
        }
    }
}

#[component]
pub fn HubPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let go_to_requests = {
        let navigate = navigate.clone();
        move |_| navigate(REQUESTS_PATH, Default::default())
    };

    let logout = move |_| {
        session.clear();
        navigate(LOGIN_PATH, Default::default());
    };

    let order_approval_url = config.order_approval_url.clone();
    let api_docs_url = config.api_docs_url.clone();

    view! {
        <div class="page hub-page">
            <div class="hub-card">
                <div class="page-header">
                    <h2>"Hoş Geldiniz!"</h2>
                    <ThemeToggle />
                </div>
                <p class="page-description">"Lütfen yapmak istediğiniz işlemi seçin:"</p>

                <div class="hub-actions">
                    <button class="btn btn-primary" on:click=go_to_requests>
                        "Satınalma İstekleri Onayla"
                    </button>
                    <button
                        class="btn btn-approve"
                        on:click=move |_| open_in_new_window(&order_approval_url)
                    >
                        "Satınalma Siparişler Onayla"
                    </button>
                    <button class="btn btn-docs" on:click=move |_| open_in_new_window(&api_docs_url)>
                        "Swagger UI"
                    </button>
                </div>

                <button class="btn btn-reject" on:click=logout>"Çıkış Yap"</button>
            </div>
        </div>
    }
}
