use std::sync::Arc;

use crate::config::ViewerConfig;
use crate::error::AppError;
use crate::models::document::DocumentId;
use crate::rendering::Renderer;
use crate::storage::client::DocumentSource;

/// Shared application state available to Axum handlers and server functions.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DocumentSource>,
    pub config: Arc<ViewerConfig>,
    pub renderer: Renderer,
    pub leptos_options: leptos::prelude::LeptosOptions,
}

impl axum::extract::FromRef<AppState> for leptos::prelude::LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

impl AppState {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        config: ViewerConfig,
        leptos_options: leptos::prelude::LeptosOptions,
    ) -> Self {
        let renderer = Renderer::from_config(&config.render);
        Self {
            source,
            config: Arc::new(config),
            renderer,
            leptos_options,
        }
    }

    /// Identifier for the `file` parameter, defaulting to the configured
    /// default document.
    pub fn document_id(&self, file: Option<&str>) -> Result<DocumentId, AppError> {
        match file.map(str::trim).filter(|f| !f.is_empty()) {
            Some(file) => DocumentId::parse(file),
            None => DocumentId::parse(&self.config.server.default_file),
        }
    }
}
