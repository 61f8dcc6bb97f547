use leptos::prelude::*;

use crate::api::RequestStatus;

#[component]
pub fn StatusFilter(
    /// Currently active filter
    #[prop(into)]
    selected: Signal<RequestStatus>,
    /// Called with the newly chosen filter
    on_change: impl Fn(RequestStatus) + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for="istekDurum">"İstek Durumu:"</label>
            <select
                id="istekDurum"
                class="input"
                prop:value=move || selected.get().code()
                on:change=move |ev| {
                    if let Some(status) = RequestStatus::from_code(&event_target_value(&ev)) {
                        on_change(status);
                    }
                }
            >
                {RequestStatus::ALL
                    .into_iter()
                    .map(|status| view! { <option value=status.code()>{status.label()}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}
