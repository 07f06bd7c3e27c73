#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use folio::api::routes::api_routes;
    use folio::app::{shell, App};
    use folio::config::Loader;
    use folio::state::AppState;
    use folio::storage::client::{DocumentSource, FsDocumentSource};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use std::sync::Arc;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting Folio server...");

    let config = Loader::standard()
        .build()
        .context("Failed to load configuration")?;

    // Load Leptos options from Cargo.toml metadata
    let conf = get_configuration(None).context("Failed to read Leptos configuration")?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();

    let docs_root = config.server.docs_root.clone();
    if !docs_root.is_dir() {
        tracing::warn!(docs_root = %docs_root.display(), "docs root is not a directory");
    }
    let source: Arc<dyn DocumentSource> = Arc::new(FsDocumentSource::new(&docs_root));
    tracing::info!(docs_root = %docs_root.display(), "serving documents");

    let app_state = AppState::new(source, config, leptos_options.clone());

    // Generate the Leptos route list for SSR
    let routes = generate_route_list(App);

    let context_state = app_state.clone();
    let app = api_routes()
        .leptos_routes_with_context(
            &app_state,
            routes,
            move || provide_context(context_state.clone()),
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        // Static files (folio.js, the WASM bundle and the stylesheet)
        .fallback_service(ServeDir::new(&site_root))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}

// When compiled for WASM (client-side), there's no main function.
// The hydrate() function in lib.rs handles client-side initialization.
#[cfg(not(feature = "ssr"))]
fn main() {}
