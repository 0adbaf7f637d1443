use crate::{
    context::DataContext,
    dto::dashboard::{FilterBounds, FilterSelection, RenderedView},
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::params::{BoundsQuery, DashboardQuery},
    services::{
        filter_service::{FilteredView, apply_filters, filter_bounds, resolve_selection},
        metrics_service::{
            city_distribution, delivery_time_distribution, format_currency, monthly_orders,
            payment_distribution, review_distribution, total_orders, total_revenue,
        },
    },
};

pub const DASHBOARD_TITLE: &str = "5 Top Brazil E-Commerce Category Product Dashboard";

/// Run the filter and metrics stages for one selection.
pub fn render(context: &DataContext, selection: &FilterSelection) -> AppResult<RenderedView> {
    let view = apply_filters(context, selection)?;
    build_view(context, selection, &view)
}

pub fn render_dashboard(
    context: &DataContext,
    query: &DashboardQuery,
) -> AppResult<ApiResponse<RenderedView>> {
    let (selection, _) = resolve_selection(context, query)?;
    let view = apply_filters(context, &selection)?;
    let meta = Meta::new(view.orders.height(), view.items.height());
    let rendered = build_view(context, &selection, &view)?;

    tracing::debug!(
        category = ?selection.category,
        total_orders = rendered.total_orders,
        "rendered dashboard"
    );
    Ok(ApiResponse::success("Dashboard", rendered, Some(meta)))
}

pub fn filter_options(
    context: &DataContext,
    query: BoundsQuery,
) -> AppResult<ApiResponse<FilterBounds>> {
    let (_, bounds) = resolve_selection(context, &DashboardQuery::from(query))?;
    Ok(ApiResponse::success("Filters", bounds, Some(Meta::empty())))
}

fn build_view(
    context: &DataContext,
    selection: &FilterSelection,
    view: &FilteredView,
) -> AppResult<RenderedView> {
    let total_orders = total_orders(&view.items)?;
    let total_revenue = total_revenue(&view.items)?;
    let category = selection.category.as_deref().unwrap_or("-");

    let review_distribution = if context.has_review_score() {
        Some(review_distribution(context.source_items(), &view.items)?)
    } else {
        None
    };
    let (delivery_time_distribution, delivery_time_density) =
        if context.has_shipping_limit_date() {
            let (bins, density) = delivery_time_distribution(&view.items)?;
            (Some(bins), Some(density))
        } else {
            (None, None)
        };

    Ok(RenderedView {
        title: DASHBOARD_TITLE.to_string(),
        selection: selection.clone(),
        bounds: filter_bounds(context, selection.years)?,
        total_orders,
        total_revenue,
        metric_lines: vec![
            format!("Total Orders (Category: {category}): {total_orders}"),
            format!("Total Revenue: {}", format_currency(total_revenue)),
        ],
        monthly_orders: monthly_orders(&view.items)?,
        payment_distribution: payment_distribution(context.payments(), &view.orders)?,
        review_distribution,
        delivery_time_distribution,
        delivery_time_density,
        city_distribution: city_distribution(&view.orders)?,
    })
}
