use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::path;

use crate::components::page_view::PageViewer;
use crate::components::slide_view::SlideViewer;

/// HTML document wrapping the application.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <link rel="stylesheet" id="syntax-css" href="/syntax.css"/>
                <script src="/folio.js"></script>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/folio.css"/>
        <Title text="Folio"/>

        <Router>
            <Routes fallback=|| view! { "Page not found." }.into_view()>
                <Route path=path!("/") view=PageViewer/>
                <Route path=path!("/slides") view=SlideViewer/>
            </Routes>
        </Router>
    }
}
