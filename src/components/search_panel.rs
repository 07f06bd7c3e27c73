use leptos::prelude::*;

use crate::search::SearchQuery;
use crate::views::results::ResultEntry;

/// Search box with case/regex toggles and the clickable result list.
#[component]
pub fn SearchPanel(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] summary: Signal<Option<String>>,
    #[prop(into)] entries: Signal<Vec<ResultEntry>>,
    #[prop(into)] failed: Signal<bool>,
    on_search: Callback<SearchQuery>,
    on_select: Callback<usize>,
    on_close: Callback<()>,
    #[prop(default = "Search...")] placeholder: &'static str,
) -> impl IntoView {
    let text = RwSignal::new(String::new());
    let case_sensitive = RwSignal::new(false);
    let regex = RwSignal::new(false);

    let submit = move || {
        let query = SearchQuery::new(text.get_untracked())
            .case_sensitive(case_sensitive.get_untracked())
            .regex(regex.get_untracked());
        on_search.run(query);
    };

    view! {
        <div id="search-container" class="search-container" class:active=move || open.get()>
            <div class="search-header">
                <input
                    type="text"
                    id="search-input"
                    placeholder=placeholder
                    prop:value=text
                    on:input=move |ev| text.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            submit();
                        }
                    }
                />
                <button class="search-btn" on:click=move |_| submit()>"Search"</button>
                <button class="close-btn" on:click=move |_| on_close.run(())>"×"</button>
            </div>
            <div class="search-options">
                <label>
                    <input
                        type="checkbox"
                        id="case-sensitive"
                        prop:checked=case_sensitive
                        on:change=move |ev| case_sensitive.set(event_target_checked(&ev))
                    />
                    " Case sensitive"
                </label>
                <label>
                    <input
                        type="checkbox"
                        id="regex-search"
                        prop:checked=regex
                        on:change=move |ev| regex.set(event_target_checked(&ev))
                    />
                    " Regex"
                </label>
            </div>
            <div id="search-results" class="search-results">
                {move || summary.get().map(|line| {
                    let class = if failed.get() {
                        "search-error"
                    } else if entries.with(Vec::is_empty) {
                        "no-results"
                    } else {
                        "search-summary"
                    };
                    view! { <div class=class>{line}</div> }
                })}
                <For
                    each=move || entries.get()
                    key=|entry| entry.index
                    children=move |entry| {
                        let index = entry.index;
                        view! {
                            <div class="search-result" on:click=move |_| on_select.run(index)>
                                {entry.label.map(|label| view! {
                                    <div class="search-result-label">{label}</div>
                                })}
                                <div class="search-result-preview" inner_html=entry.preview_html></div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
