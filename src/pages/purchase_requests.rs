use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::{HttpApprovalClient, RequestStatus};
use crate::app::{HUB_PATH, LOGIN_PATH};
use crate::components::confirm_dialog::{ConfirmDialog, ConfirmHandle};
use crate::components::pagination::Pagination;
use crate::components::request_row::RequestRowView;
use crate::components::status_filter::StatusFilter;
use crate::components::theme_toggle::ThemeToggle;
use crate::config::ClientConfig;
use crate::controller::ApprovalController;
use crate::listing::ListingState;
use crate::session::Session;

pub type PageController = ApprovalController<HttpApprovalClient, RwSignal<ListingState>>;

#[component]
pub fn PurchaseRequestsPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let state = RwSignal::new(ListingState::default());
    let confirm = ConfirmHandle::new();
    let login_required = RwSignal::new(false);
    let controller: PageController = ApprovalController::new(
        HttpApprovalClient::new(config.api_base_url.clone()),
        session,
        state,
        config.page_size,
    );

    // Any flow that finds the token gone sends the user to login
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if login_required.get() {
                navigate(LOGIN_PATH, Default::default());
            }
        });
    }

    // Load the first page on mount
    {
        let controller = controller.clone();
        Effect::new(move |_| {
            let controller = controller.clone();
            spawn_local(async move {
                if controller.load_page(0).await.needs_login() {
                    login_required.set(true);
                }
            });
        });
    }

    let go_to_page = {
        let controller = controller.clone();
        move |page: u32| {
            let controller = controller.clone();
            spawn_local(async move {
                if controller.load_page(page).await.needs_login() {
                    login_required.set(true);
                }
            });
        }
    };

    let select_status = {
        let controller = controller.clone();
        move |status: RequestStatus| {
            let controller = controller.clone();
            spawn_local(async move {
                if controller.select_status(status).await.needs_login() {
                    login_required.set(true);
                }
            });
        }
    };

    view! {
        <div class="page requests-page">
            <div class="page-header">
                <h2>"Satınalma İstek Onay Talepleri"</h2>
                <ThemeToggle />
            </div>

            {move || {
                state.with(|s| s.error.clone()).map(|e| {
                    view! { <div class="error-banner">{e}</div> }
                })
            }}

            <StatusFilter
                selected=Signal::derive(move || state.with(|s| s.status))
                on_change=select_status
            />

            <Show when=move || state.with(|s| s.loading)>
                <div class="loading">"Yükleniyor..."</div>
            </Show>

            <div class="table-wrapper">
                <table class="requests-table">
                    <thead>
                        <tr>
                            <th class="col-detail">"İstek Detayı"</th>
                            <th class="col-date">"Kayıt Tarihi"</th>
                            <th class="col-actions">"İşlemler"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || state.with(|s| s.rows.clone())
                            key=|row| row.id
                            let:row
                        >
                            <RequestRowView
                                row=row
                                controller=controller.clone()
                                confirm=confirm
                                login_required=login_required
                            />
                        </For>
                    </tbody>
                </table>
            </div>

            <Pagination state=state on_navigate=go_to_page />

            <button
                class="btn btn-secondary"
                on:click=move |_| navigate(HUB_PATH, Default::default())
            >
                "Ana Sayfaya Dön"
            </button>

            <ConfirmDialog handle=confirm />
        </div>
    }
}
