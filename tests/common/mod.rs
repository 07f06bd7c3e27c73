use std::sync::Arc;

use axum::Router;

use folio::api::routes::api_routes;
use folio::config::ViewerConfig;
use folio::models::document::DocumentId;
use folio::state::AppState;
use folio::storage::client::{DocumentSource, MemoryDocumentSource};

pub const INDEX: &str = "# Welcome\n\nStart with the [guide](docs/guide.md).\n";

pub const GUIDE: &str = "# Guide\n\nThe quick brown fox.\n\n## Setup\n\nA quick install.\n\n```rust\nfn main() {}\n```\n";

pub const DECK: &str = "# A\nfoo\n# B\nbar\n# C\nbaz";

/// In-memory document store and the API router wired to it.
pub struct TestEnv {
    pub router: Router,
    pub source: Arc<MemoryDocumentSource>,
}

impl TestEnv {
    /// Seed a few documents and build the router with default configuration.
    pub fn start() -> Self {
        Self::with_config(ViewerConfig::default())
    }

    pub fn with_config(config: ViewerConfig) -> Self {
        let source = Arc::new(
            MemoryDocumentSource::new()
                .with_document(&id("index.md"), INDEX)
                .with_document(&id("docs/guide.md"), GUIDE)
                .with_document(&id("deck.md"), DECK),
        );

        let leptos_options = leptos::prelude::LeptosOptions::builder()
            .output_name("folio")
            .build();

        let dyn_source: Arc<dyn DocumentSource> = source.clone();
        let app_state = AppState::new(dyn_source, config, leptos_options);

        // API routes only, no Leptos SSR
        let router = api_routes().with_state(app_state);

        Self { router, source }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
            .expect("Failed to build TestServer")
    }
}

pub fn id(raw: &str) -> DocumentId {
    DocumentId::parse(raw).expect("valid document id")
}
