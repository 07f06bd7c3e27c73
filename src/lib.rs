pub mod app;
pub mod config;
pub mod error;
pub mod models {
    pub mod document;
    pub mod search;
    pub mod slide;
}
pub mod rendering;
pub mod search;
pub mod slides;
pub mod storage {
    pub mod client;
    pub mod loader;
}
pub mod theme;
pub mod views;
pub mod components {
    pub mod data;
    pub mod dom;
    pub mod page_view;
    pub mod search_panel;
    pub mod slide_view;
    pub mod toolbar;
}
pub mod api {
    pub mod documents;
    #[cfg(feature = "ssr")]
    pub mod errors;
    #[cfg(feature = "ssr")]
    pub mod routes;
    pub mod search;
    pub mod theme;
}
#[cfg(feature = "ssr")]
pub mod state;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
