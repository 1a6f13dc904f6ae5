//! Turns routing outcomes into HTTP responses.

use axum::http::header::{HeaderName, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use mailview_core::PreviewError;
use minijinja::context;
use tracing::error;

use super::route::Preview;
use crate::templates::{TemplateEngine, EMAIL_TEMPLATE, INDEX_TEMPLATE};

/// Header telling an enclosing router to try its other handlers.
pub const X_CASCADE: HeaderName = HeaderName::from_static("x-cascade");

/// Content type used when a raw part declares none.
const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Failure to produce a preview response.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        match self {
            Self::Preview(err) => not_found(err.is_pass()),
            Self::Template(err) => {
                error!(error = %err, "preview template failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

/// Renders a routing outcome with the given template engine.
///
/// # Errors
///
/// Returns [`RenderError::Template`] if a page template fails to render.
pub fn render(preview: Preview, templates: &dyn TemplateEngine) -> Result<Response, RenderError> {
    match preview {
        Preview::Index(links) => {
            let html = templates.render(INDEX_TEMPLATE, context! { links => links })?;
            Ok(Html(html).into_response())
        }
        Preview::Framed(page) => {
            let html = templates.render(EMAIL_TEMPLATE, minijinja::Value::from_serialize(&page))?;
            Ok(Html(html).into_response())
        }
        Preview::Raw { content_type, body } => {
            let header = content_type
                .and_then(|ct| HeaderValue::from_str(ct.as_str()).ok())
                .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
            Ok(([(CONTENT_TYPE, header)], body).into_response())
        }
    }
}

/// A 404 with the literal body `Not Found`, optionally marked pass-through.
#[must_use]
pub fn not_found(pass: bool) -> Response {
    let mut response = (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE))],
        "Not Found",
    )
        .into_response();
    if pass {
        response
            .headers_mut()
            .insert(X_CASCADE, HeaderValue::from_static("pass"));
    }
    response
}
