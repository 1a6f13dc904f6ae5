//! Axum entry point for every preview request.

use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::render::render;
use super::route::RouteRequest;
use super::PreviewState;

/// Query key naming the requested content type.
const PART_KEY: &str = "part";

/// Returns the last `part` value in the query, if any.
///
/// A present-but-empty value still selects raw mode.
fn last_part(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .rev()
        .find(|(key, _)| key == PART_KEY)
        .map(|(_, value)| value.as_str())
}

/// Routes the request path and renders the outcome.
pub async fn preview_handler(
    State(state): State<PreviewState>,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let request = RouteRequest {
        path: uri.path(),
        part: last_part(&params),
    };

    state
        .router
        .route(&request)
        .inspect_err(|err| debug!(error = %err, pass = err.is_pass(), "no preview"))
        .map_err(Into::into)
        .and_then(|preview| render(preview, state.templates.as_ref()))
        .into_response()
}
