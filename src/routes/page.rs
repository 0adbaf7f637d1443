use axum::{extract::State, response::Html};

use crate::{
    error::AppResult,
    routes::params::{DashboardQuery, QueryParams},
    services::{dashboard_service, filter_service::resolve_selection},
    state::AppState,
};

/// Reversed ranges are read low to high here; the JSON API rejects them instead.
#[utoipa::path(
    get,
    path = "/",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html", body = String),
        (status = 400, description = "Malformed query or category outside the top five"),
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_page(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<DashboardQuery>,
) -> AppResult<Html<String>> {
    let (selection, _) = resolve_selection(&state.context, &query.ordered())?;
    let view = dashboard_service::render(&state.context, &selection)?;
    Ok(Html(state.pages.render(&view)?))
}
