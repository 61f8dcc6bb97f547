use leptos::prelude::*;

use crate::theme::{Theme, ThemeContext};

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = expect_context::<ThemeContext>();

    view! {
        <button
            class="theme-toggle"
            aria-label="Toggle theme"
            on:click=move |_| ctx.toggle()
        >
            {move || match ctx.theme.get() {
                Theme::Light => "\u{263E}",
                Theme::Dark => "\u{2600}",
            }}
        </button>
    }
}
