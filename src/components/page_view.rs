use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::models::document::DocumentId;
use crate::rendering::toc::EMPTY_TOC_MESSAGE;
use crate::search::SearchQuery;
use crate::theme::{mermaid_theme, theme_class};
use crate::views::keys::PageAction;
use crate::views::{PageView, ViewMode};

use super::data::{load_page, PageData};
use super::dom;
use super::search_panel::SearchPanel;
use super::toolbar::{MenuToggle, ModeSwitch, ThemeSwitcher};

/// Route component for `/?file=..&theme=..`.
#[component]
pub fn PageViewer() -> impl IntoView {
    let query = use_query_map();
    let params = move || {
        let q = query.read();
        (q.get("file"), q.get("theme"))
    };
    let data = Resource::new(params, |(file, theme)| load_page(file, theme));

    view! {
        <Suspense fallback=|| view! { <p class="loading">"Loading..."</p> }>
            {move || data.get().map(|res| match res {
                Ok(data) => view! { <PageScreen data=data /> }.into_any(),
                Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn PageScreen(data: PageData) -> impl IntoView {
    let PageData {
        shell,
        content_html,
        error,
    } = data;

    let document = DocumentId::parse(&shell.file).ok();
    let page = RwSignal::new(
        PageView::from_rendered(document, error, &content_html)
            .with_context_radius(shell.context_radius),
    );
    let theme = RwSignal::new(shell.theme.clone());

    Effect::new(move |_| {
        let theme = theme.get();
        page.with(|_| ());
        dom::render_extras(mermaid_theme(&theme));
    });

    let handle = window_event_listener(leptos::ev::keydown, move |ev| {
        let ctrl = ev.ctrl_key() || ev.meta_key();
        if !ctrl && ev.key() != "Escape" && dom::is_editing() {
            return;
        }
        let action = page.try_update(|v| v.handle_key(&ev.key(), ctrl)).flatten();
        if let Some(action) = action {
            ev.prevent_default();
            if action == PageAction::ToggleSearch && page.with_untracked(|v| v.panels().search_open) {
                dom::focus_search();
            }
        }
    });
    on_cleanup(move || handle.remove());

    let panels = Memo::new(move |_| page.with(|v| v.panels()));
    let menu_visible = Signal::derive(move || panels.get().menu_visible);
    let file = shell.file.clone();

    view! {
        <div class=move || format!("viewer page-view {}", theme_class(&theme.get()))>
            <div class="toolbar" class:menu-open=menu_visible>
                <MenuToggle
                    menu_visible=menu_visible
                    on_toggle=Callback::new(move |_| page.update(|v| v.toggle_menu()))
                />
                <Show when=move || menu_visible.get()>
                    <button class="tool-btn" on:click=move |_| page.update(|v| v.toggle_toc())>
                        "Contents"
                    </button>
                    <button
                        class="tool-btn"
                        on:click=move |_| {
                            page.update(|v| v.toggle_search());
                            dom::focus_search();
                        }
                    >
                        "Search"
                    </button>
                    <ModeSwitch mode=ViewMode::Page file=file.clone() theme=theme />
                    <ThemeSwitcher themes=shell.themes.clone() theme=theme />
                </Show>
            </div>

            <nav id="toc-container" class="toc-container" class:active=move || panels.get().toc_open>
                <h3>"Table of Contents"</h3>
                {move || page.with(|v| {
                    let toc = v.toc().to_vec();
                    if toc.is_empty() {
                        view! { <p>{EMPTY_TOC_MESSAGE}</p> }.into_any()
                    } else {
                        view! {
                            <ul>
                                {toc.into_iter().map(|entry| {
                                    let id = entry.id.clone();
                                    view! {
                                        <li>
                                            <a
                                                href=format!("#{}", entry.id)
                                                class=format!("toc-h{}", entry.level)
                                                on:click=move |ev| {
                                                    ev.prevent_default();
                                                    dom::scroll_to_heading(&id);
                                                }
                                            >
                                                {entry.text}
                                            </a>
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>
                        }.into_any()
                    }
                })}
            </nav>

            <SearchPanel
                open=Signal::derive(move || panels.get().search_open)
                summary=Signal::derive(move || page.with(|v| v.outcome().summary()))
                entries=Signal::derive(move || page.with(|v| v.outcome().entries()))
                failed=Signal::derive(move || page.with(|v| v.outcome().error().is_some()))
                on_search=Callback::new(move |query: SearchQuery| {
                    page.update(|v| {
                        v.search(&query);
                    });
                })
                on_select=Callback::new(move |index: usize| {
                    let found = page.try_update(|v| v.jump_to_result(index)).flatten();
                    if found.is_some() {
                        dom::scroll_to_current_match();
                    }
                })
                on_close=Callback::new(move |_| page.update(|v| v.close_overlays()))
                placeholder="Search in document..."
            />

            <main id="content" class="content" inner_html=move || page.with(|v| v.html())></main>
        </div>
    }
}
