use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::dashboard::{FilterBounds, RenderedView},
    error::AppResult,
    response::ApiResponse,
    routes::params::{BoundsQuery, DashboardQuery, QueryParams},
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/filters", get(get_filters))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Metrics and chart data for the selection", body = ApiResponse<RenderedView>),
        (status = 400, description = "Malformed query or selection outside the available filters"),
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<DashboardQuery>,
) -> AppResult<Json<ApiResponse<RenderedView>>> {
    let resp = dashboard_service::render_dashboard(&state.context, &query)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/filters",
    params(BoundsQuery),
    responses(
        (status = 200, description = "Selectable years, dates and categories", body = ApiResponse<FilterBounds>),
        (status = 400, description = "Malformed query or reversed year range"),
    ),
    tag = "Dashboard"
)]
pub async fn get_filters(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<BoundsQuery>,
) -> AppResult<Json<ApiResponse<FilterBounds>>> {
    let resp = dashboard_service::filter_options(&state.context, query)?;
    Ok(Json(resp))
}
