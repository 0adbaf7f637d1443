use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

use crate::{
    context::DataContext,
    dto::dashboard::{DateRange, FilterBounds, FilterSelection, YearRange},
    error::{AppError, AppResult},
    frame::ints,
    routes::params::DashboardQuery,
    schema::{CATEGORY, PURCHASE_DAY, YEAR},
};

/// Orders and items left after applying a [`FilterSelection`].
#[derive(Debug, Clone)]
pub struct FilteredView {
    pub orders: DataFrame,
    pub items: DataFrame,
}

pub fn year_bounds(orders: &DataFrame) -> AppResult<Option<YearRange>> {
    let years = ints(orders, YEAR)?;
    Ok(years
        .min()
        .zip(years.max())
        .map(|(min, max)| YearRange { min, max }))
}

/// Purchase-date bounds of the orders inside `years`.
pub fn date_bounds(orders: &DataFrame, years: YearRange) -> AppResult<Option<DateRange>> {
    let subset = orders
        .clone()
        .lazy()
        .filter(within_years(years))
        .select([col(PURCHASE_DAY)])
        .collect()?;
    let days = ints(&subset, PURCHASE_DAY)?;
    match (days.min(), days.max()) {
        (Some(first), Some(last)) => Ok(Some(DateRange {
            from: day_to_date(first)?,
            to: day_to_date(last)?,
        })),
        _ => Ok(None),
    }
}

/// Bounds for the inputs given the selected years (global bounds when none are selected).
pub fn filter_bounds(context: &DataContext, years: Option<YearRange>) -> AppResult<FilterBounds> {
    let global = year_bounds(context.orders())?;
    let dates = match years.or(global) {
        Some(years) => date_bounds(context.orders(), years)?,
        None => None,
    };
    Ok(FilterBounds {
        years: global,
        dates,
        categories: context.top_categories().to_vec(),
    })
}

/// Validate `query` against the current bounds, filling in defaults for anything unset.
pub fn resolve_selection(
    context: &DataContext,
    query: &DashboardQuery,
) -> AppResult<(FilterSelection, FilterBounds)> {
    let years = year_bounds(context.orders())?
        .map(|global| resolve_years(global, query.year_min, query.year_max))
        .transpose()?;
    let bounds = filter_bounds(context, years)?;
    let dates = bounds
        .dates
        .map(|dates| resolve_dates(dates, query))
        .transpose()?;
    let category = resolve_category(context.top_categories(), query.category.as_deref())?;

    let selection = FilterSelection {
        years,
        dates,
        category,
    };
    tracing::debug!(?selection, "resolved filter selection");
    Ok((selection, bounds))
}

fn resolve_years(global: YearRange, min: Option<i32>, max: Option<i32>) -> AppResult<YearRange> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(AppError::BadRequest(format!(
                "year_min {min} is after year_max {max}"
            )));
        }
    }
    Ok(YearRange {
        min: min.unwrap_or(global.min).clamp(global.min, global.max),
        max: max.unwrap_or(global.max).clamp(global.min, global.max),
    })
}

fn resolve_dates(bounds: DateRange, query: &DashboardQuery) -> AppResult<DateRange> {
    if let (Some(from), Some(to)) = (query.date_from, query.date_to) {
        if from > to {
            return Err(AppError::BadRequest(format!(
                "date_from {from} is after date_to {to}"
            )));
        }
    }
    Ok(DateRange {
        from: query
            .date_from
            .unwrap_or(bounds.from)
            .clamp(bounds.from, bounds.to),
        to: query
            .date_to
            .unwrap_or(bounds.to)
            .clamp(bounds.from, bounds.to),
    })
}

fn resolve_category(options: &[String], requested: Option<&str>) -> AppResult<Option<String>> {
    match requested.filter(|c| !c.is_empty()) {
        None => Ok(options.first().cloned()),
        Some(category) if options.iter().any(|o| o == category) => Ok(Some(category.to_string())),
        Some(category) => Err(AppError::BadRequest(format!(
            "category '{category}' is not one of the top categories"
        ))),
    }
}

/// Apply the selection. Orders follow years and dates; items follow the category only.
pub fn apply_filters(
    context: &DataContext,
    selection: &FilterSelection,
) -> AppResult<FilteredView> {
    let orders = match (selection.years, selection.dates) {
        (Some(years), Some(dates)) => context
            .orders()
            .clone()
            .lazy()
            .filter(within_years(years).and(within_dates(dates)))
            .collect()?,
        _ => context.orders().head(Some(0)),
    };

    // Deliberately not restricted by years/dates.
    let items = match selection.category.as_deref() {
        Some(category) => context
            .items()
            .clone()
            .lazy()
            .filter(col(CATEGORY).eq(lit(category)))
            .collect()?,
        None => context.items().head(Some(0)),
    };

    Ok(FilteredView { orders, items })
}

fn within_years(years: YearRange) -> Expr {
    col(YEAR)
        .gt_eq(lit(years.min))
        .and(col(YEAR).lt_eq(lit(years.max)))
}

fn within_dates(dates: DateRange) -> Expr {
    col(PURCHASE_DAY)
        .gt_eq(lit(dates.from.num_days_from_ce()))
        .and(col(PURCHASE_DAY).lt_eq(lit(dates.to.num_days_from_ce())))
}

fn day_to_date(day: i32) -> AppResult<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(day)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("day {day} is outside the calendar")))
}
