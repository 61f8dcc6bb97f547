use leptos::prelude::*;

use crate::listing::ListingState;

#[component]
pub fn Pagination(
    state: RwSignal<ListingState>,
    /// Called with the page index to fetch
    on_navigate: impl Fn(u32) + Clone + Send + Sync + 'static,
) -> impl IntoView {
    let on_previous = on_navigate.clone();

    view! {
        <div class="pagination">
            <div>{move || format!("Sayfa: {}", state.with(|s| s.page_label()))}</div>
            <div class="pagination-buttons">
                <Show when=move || state.with(|s| s.has_previous())>
                    <button
                        class="btn btn-primary"
                        on:click={
                            let on_previous = on_previous.clone();
                            move |_| on_previous(state.with_untracked(|s| s.previous_page()))
                        }
                    >
                        "Önceki"
                    </button>
                </Show>
                <Show when=move || state.with(|s| s.has_next())>
                    <button
                        class="btn btn-primary"
                        on:click={
                            let on_navigate = on_navigate.clone();
                            move |_| on_navigate(state.with_untracked(|s| s.next_page()))
                        }
                    >
                        "Sonraki"
                    </button>
                </Show>
            </div>
        </div>
    }
}
