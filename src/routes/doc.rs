use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::dashboard::{
        CategoryCount, DateRange, DensityPoint, FilterBounds, FilterSelection, HistogramBin,
        MonthlyOrders, RenderedView, YearRange,
    },
    response::{ApiResponse, Meta},
    routes::{dashboard, health, page, params},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        page::dashboard_page,
        dashboard::get_dashboard,
        dashboard::get_filters
    ),
    components(
        schemas(
            YearRange,
            DateRange,
            FilterBounds,
            FilterSelection,
            MonthlyOrders,
            CategoryCount,
            HistogramBin,
            DensityPoint,
            RenderedView,
            health::HealthData,
            params::DashboardQuery,
            params::BoundsQuery,
            Meta,
            ApiResponse<RenderedView>,
            ApiResponse<FilterBounds>,
            ApiResponse<health::HealthData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Dashboard", description = "Category dashboard page and data"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
