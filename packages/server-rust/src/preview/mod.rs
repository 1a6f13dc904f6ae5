//! Mail preview HTTP surface: routing, rendering, and the axum handler.

pub mod handler;
pub mod render;
pub mod route;

pub use handler::preview_handler;
pub use render::{not_found, render, RenderError, X_CASCADE};
pub use route::{Preview, PreviewRouter, RouteRequest};

use std::sync::Arc;

use axum::Router;
use mailview_core::{ActionRegistry, Interceptors};

use crate::network::PreviewConfig;
use crate::templates::{MiniJinjaEngine, TemplateEngine};

/// Shared state passed to the preview handler via `State` extraction.
///
/// Holds `Arc` references so cloning per request is cheap. Nothing in it
/// mutates after construction.
#[derive(Clone)]
pub struct PreviewState {
    pub router: Arc<PreviewRouter>,
    pub templates: Arc<dyn TemplateEngine>,
}

impl PreviewState {
    /// Builds state with the embedded minijinja templates.
    #[must_use]
    pub fn new(
        config: &PreviewConfig,
        registry: Arc<ActionRegistry>,
        interceptors: Interceptors,
    ) -> Self {
        Self::with_templates(config, registry, interceptors, Arc::new(MiniJinjaEngine::new()))
    }

    #[must_use]
    pub fn with_templates(
        config: &PreviewConfig,
        registry: Arc<ActionRegistry>,
        interceptors: Interceptors,
        templates: Arc<dyn TemplateEngine>,
    ) -> Self {
        Self {
            router: Arc::new(PreviewRouter::new(
                registry,
                interceptors,
                config.normalized_mount(),
            )),
            templates,
        }
    }

    #[must_use]
    pub fn mount(&self) -> &str {
        self.router.mount()
    }

    #[must_use]
    pub fn action_count(&self) -> usize {
        self.router.registry().len()
    }
}

/// Router sending every path to [`preview_handler`].
pub fn preview_router(state: PreviewState) -> Router {
    Router::new().fallback(preview_handler).with_state(state)
}
