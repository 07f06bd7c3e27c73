use leptos::prelude::*;

use crate::theme::theme_class;
use crate::views::ViewMode;

use super::data::save_theme_preference;

/// Theme buttons. Selecting one applies it at once and stores the
/// preference in the background.
#[component]
pub fn ThemeSwitcher(themes: Vec<String>, theme: RwSignal<String>) -> impl IntoView {
    let save = Action::new(|name: &String| {
        let name = name.clone();
        async move { save_theme_preference(name).await }
    });

    Effect::new(move |_| {
        if let Some(Err(e)) = save.value().get() {
            leptos::logging::warn!("failed to store theme preference: {e}");
        }
    });

    view! {
        <div class="themes">
            {themes
                .into_iter()
                .map(|name| {
                    let label = name.clone();
                    let selected = name.clone();
                    let class = format!("theme-btn {}", theme_class(&name));
                    view! {
                        <button
                            class=class
                            class:active=move || theme.get() == selected
                            title=label.clone()
                            on:click=move |_| {
                                theme.set(name.clone());
                                save.dispatch(name.clone());
                            }
                        >
                            {label.clone()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// The always-visible button that shows or hides the rest of the toolbar.
#[component]
pub fn MenuToggle(#[prop(into)] menu_visible: Signal<bool>, on_toggle: Callback<()>) -> impl IntoView {
    view! {
        <button
            class="menu-toggle-btn"
            title=move || if menu_visible.get() { "Hide menu" } else { "Show menu" }
            on:click=move |_| on_toggle.run(())
        >
            "☰"
        </button>
    }
}

/// Link to the same document in the other view, keeping the theme.
#[component]
pub fn ModeSwitch(mode: ViewMode, file: String, theme: RwSignal<String>) -> impl IntoView {
    let target = mode.other();
    let label = match target {
        ViewMode::Page => "Page view",
        ViewMode::Slides => "Slide view",
    };
    view! {
        <a
            class="tool-btn mode-switch"
            href=move || target.url_for(&file, Some(&theme.get()))
        >
            {label}
        </a>
    }
}
