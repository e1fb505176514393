//! Public menu pages

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{debug, warn};

use menu_core::repositories::CacheLookup;

use crate::error::ApiError;
use crate::render::views::{CategoryView, HomeView};
use crate::render::{CATEGORY, HOME};
use crate::state::AppState;

/// Home page - GET /
///
/// Served from the page cache while it is fresh, otherwise rendered and
/// written back. A failed cache write still serves the rendered page.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let sources_as_of = match state.cache.lookup().await {
        CacheLookup::Fresh(html) => {
            debug!("Serving cached home page");
            return Ok(Html(html));
        }
        CacheLookup::Stale { sources_as_of } => sources_as_of,
    };

    let page = state.catalog.home().await;
    let view = HomeView::build(&page, &state.config.site)?;
    let html = state.renderer.render(HOME, &view)?;

    if let Err(e) = state.cache.store(&html, sources_as_of).await {
        warn!("Failed to cache home page: {}", e);
    }

    Ok(Html(html))
}

/// Category page - GET /category?id=...
///
/// A repeated `id` keeps the last value. A missing, unknown or unparsable id
/// redirects to the home page.
pub async fn category(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            debug!("Unusable category query: {}", e);
            return Ok(Redirect::to("/").into_response());
        }
    };
    let id = pairs
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "id").then_some(value));

    let Some(id) = id.filter(|id| !id.trim().is_empty()) else {
        return Ok(Redirect::to("/").into_response());
    };
    let Some(page) = state.catalog.category(id.trim()).await else {
        return Ok(Redirect::to("/").into_response());
    };

    let view = CategoryView::build(&page, &state.config.site)?;
    let html = state.renderer.render(CATEGORY, &view)?;
    Ok(Html(html).into_response())
}
