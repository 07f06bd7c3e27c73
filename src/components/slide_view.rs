use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::models::document::DocumentId;
use crate::search::SearchQuery;
use crate::theme::{mermaid_theme, theme_class};
use crate::views::keys::SlideAction;
use crate::views::{SlideView, ViewMode};

use super::data::{load_deck, DeckData};
use super::dom;
use super::search_panel::SearchPanel;
use super::toolbar::{MenuToggle, ModeSwitch, ThemeSwitcher};

/// Route component for `/slides?file=..&theme=..`.
#[component]
pub fn SlideViewer() -> impl IntoView {
    let query = use_query_map();
    let params = move || {
        let q = query.read();
        (q.get("file"), q.get("theme"))
    };
    let data = Resource::new(params, |(file, theme)| load_deck(file, theme));

    view! {
        <Suspense fallback=|| view! { <p class="loading">"Loading slides..."</p> }>
            {move || data.get().map(|res| match res {
                Ok(data) => match build_view(data) {
                    Ok((view, shell)) => view! { <SlideScreen deck=view shell=shell /> }.into_any(),
                    Err(e) => view! { <p class="error">"Error: " {e}</p> }.into_any(),
                },
                Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}

fn build_view(data: DeckData) -> Result<(SlideView, super::data::ViewShell), String> {
    let document = DocumentId::parse(&data.shell.file).ok();
    let view = SlideView::from_rendered(document, data.error, data.slides, data.rendered)
        .map_err(|e| e.to_string())?
        .with_context_radius(data.shell.context_radius)
        .with_preview_length(data.preview_length);
    Ok((view, data.shell))
}

#[component]
fn SlideScreen(deck: SlideView, shell: super::data::ViewShell) -> impl IntoView {
    let deck = RwSignal::new(deck);
    let theme = RwSignal::new(shell.theme.clone());

    Effect::new(move |_| {
        let theme = theme.get();
        deck.with(|d| d.current_index());
        dom::render_extras(mermaid_theme(&theme));
    });

    let toggle_fullscreen = move || {
        deck.update(|d| {
            d.set_fullscreen(dom::is_fullscreen());
            d.toggle_fullscreen();
        });
        dom::set_fullscreen(deck.with_untracked(|d| d.panels().fullscreen));
    };

    let handle = window_event_listener(leptos::ev::keydown, move |ev| {
        let ctrl = ev.ctrl_key() || ev.meta_key();
        if !ctrl && ev.key() != "Escape" && dom::is_editing() {
            return;
        }
        if ev.key() == "Escape" {
            deck.update(|d| d.set_fullscreen(dom::is_fullscreen()));
        }
        let action = deck.try_update(|d| d.handle_key(&ev.key(), ctrl)).flatten();
        let Some(action) = action else {
            return;
        };
        if action.prevents_default() {
            ev.prevent_default();
        }
        match action {
            SlideAction::ToggleFullscreen => {
                // The key handler already flipped the flag.
                dom::set_fullscreen(deck.with_untracked(|d| d.panels().fullscreen));
            }
            SlideAction::ToggleSearch if deck.with_untracked(|d| d.panels().search_open) => {
                dom::focus_search();
            }
            _ => {}
        }
    });
    on_cleanup(move || handle.remove());

    let panels = Memo::new(move |_| deck.with(|d| d.panels()));
    let nav = Memo::new(move |_| deck.with(|d| d.nav_state()));
    let menu_visible = Signal::derive(move || panels.get().menu_visible);
    let file = shell.file.clone();

    view! {
        <div
            class=move || format!("viewer slide-view {}", theme_class(&theme.get()))
            class:fullscreen=move || panels.get().fullscreen
        >
            <div class="progress-bar">
                <div class="progress" style=move || format!("width: {}%", nav.get().progress_percent)></div>
            </div>

            <section id="slide-content" class="slide" inner_html=move || deck.with(|d| d.render_current())></section>

            <div class="slide-controls" class:menu-open=menu_visible>
                <MenuToggle
                    menu_visible=menu_visible
                    on_toggle=Callback::new(move |_| deck.update(|d| d.toggle_menu()))
                />
                <Show when=move || menu_visible.get()>
                    <button
                        class="control-btn"
                        prop:disabled=move || !nav.get().prev_enabled
                        on:click=move |_| {
                            deck.update(|d| {
                                d.previous();
                            });
                        }
                    >
                        "◀"
                    </button>
                    <span class="slide-counter">
                        {move || format!("{} / {}", nav.get().position, nav.get().total)}
                    </span>
                    <button
                        class="control-btn"
                        prop:disabled=move || !nav.get().next_enabled
                        on:click=move |_| {
                            deck.update(|d| {
                                d.next();
                            });
                        }
                    >
                        "▶"
                    </button>
                    <button class="control-btn" on:click=move |_| deck.update(|d| d.toggle_overview())>
                        "Overview"
                    </button>
                    <button class="control-btn" on:click=move |_| deck.update(|d| d.toggle_search())>
                        "Search"
                    </button>
                    <button class="control-btn" on:click=move |_| toggle_fullscreen()>
                        "Fullscreen"
                    </button>
                    <ModeSwitch mode=ViewMode::Slides file=file.clone() theme=theme />
                    <ThemeSwitcher themes=shell.themes.clone() theme=theme />
                </Show>
            </div>

            <div id="slide-overview" class="slide-overview" class:active=move || panels.get().overview_open>
                <For
                    each=move || deck.with(|d| d.overview())
                    key=|entry| (entry.index, entry.active)
                    children=move |entry| {
                        let index = entry.index;
                        view! {
                            <div
                                class="overview-slide"
                                class:active=entry.active
                                on:click=move |_| {
                                    deck.update(|d| {
                                        d.jump(index);
                                        d.toggle_overview();
                                    });
                                }
                            >
                                <h4>{format!("{}. {}", entry.index + 1, entry.title)}</h4>
                                <p>{entry.preview}</p>
                            </div>
                        }
                    }
                />
            </div>

            <SearchPanel
                open=Signal::derive(move || panels.get().search_open)
                summary=Signal::derive(move || deck.with(|d| d.outcome().summary()))
                entries=Signal::derive(move || deck.with(|d| d.outcome().entries()))
                failed=Signal::derive(move || deck.with(|d| d.outcome().error().is_some()))
                on_search=Callback::new(move |query: SearchQuery| {
                    deck.update(|d| {
                        d.search(&query);
                    });
                })
                on_select=Callback::new(move |index: usize| {
                    deck.update(|d| {
                        d.jump_to_result(index);
                    });
                })
                on_close=Callback::new(move |_| deck.update(|d| d.close_overlays()))
                placeholder="Search in slides..."
            />
        </div>
    }
}
