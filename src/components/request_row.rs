use chrono::{DateTime, NaiveDate, NaiveDateTime};
use leptos::ev::{Event, MouseEvent};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::RequestRow;
use crate::components::confirm_dialog::ConfirmHandle;
use crate::pages::purchase_requests::PageController;

/// Short Turkish date (`dd.MM.yyyy`) of the timestamp as sent. Values that do
/// not parse are shown unchanged.
pub fn format_registration_date(raw: &str) -> String {
    const DATE: &str = "%d.%m.%Y";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DATE).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DATE).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(DATE).to_string();
    }
    raw.to_string()
}

#[component]
pub fn RequestRowView(
    row: RequestRow,
    controller: PageController,
    confirm: ConfirmHandle,
    /// Set when an action finds the session gone
    login_required: RwSignal<bool>,
) -> impl IntoView {
    let id = row.id;
    let state = *controller.state();
    let actionable = move || state.with(|s| s.status.allows_actions());

    let approve = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                if controller.approve(id, &confirm).await.needs_login() {
                    login_required.set(true);
                }
            });
        }
    };

    let reject = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                if controller.reject(id, &confirm).await.needs_login() {
                    login_required.set(true);
                }
            });
        }
    };

    let edit_draft = move |ev: Event| controller.edit_draft(id, event_target_value(&ev));

    view! {
        <tr class="request-row">
            <td class="request-text">{row.text}</td>
            <td class="request-date">{format_registration_date(&row.registered_at)}</td>
            <td class="request-actions">
                <Show
                    when=actionable
                    fallback=|| view! {
                        <p class="status-text status-error">
                            "Sadece bekleme statüsündeki kayıtlarda işlem yapabilirsiniz."
                        </p>
                    }
                >
                    <div class="row-actions">
                        <button class="btn btn-approve" on:click=approve.clone()>
                            "Kabul Et"
                        </button>
                        <div class="reject-row">
                            <input
                                type="text"
                                class="input"
                                placeholder="Red Gerekçesi"
                                prop:value=move || state.with(|s| s.drafts.get(id).to_string())
                                on:input=edit_draft.clone()
                            />
                            <button class="btn btn-reject" on:click=reject.clone()>
                                "Reddet"
                            </button>
                        </div>
                    </div>
                </Show>
            </td>
        </tr>
    }
}
