mod api;
mod app;
mod components;
mod config;
mod controller;
mod guard;
mod listing;
mod pages;
mod session;
mod theme;

use app::App;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    spawn_local(async {
        let config = config::load().await;
        log::info!("Approval service at {}", config.api_base_url);
        leptos::mount::mount_to_body(move || view! { <App config=config /> });
    });
}
