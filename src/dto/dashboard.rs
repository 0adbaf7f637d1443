use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }
}

/// What the three inputs may currently select. `dates` follows the selected years.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FilterBounds {
    pub years: Option<YearRange>,
    pub dates: Option<DateRange>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FilterSelection {
    pub years: Option<YearRange>,
    pub dates: Option<DateRange>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyOrders {
    pub month: u32,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// One point of the smoothed delivery-time curve, in histogram count units.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DensityPoint {
    pub x: f64,
    pub y: f64,
}

/// Everything the dashboard page shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RenderedView {
    pub title: String,
    pub selection: FilterSelection,
    pub bounds: FilterBounds,
    pub total_orders: usize,
    pub total_revenue: f64,
    pub metric_lines: Vec<String>,
    pub monthly_orders: Vec<MonthlyOrders>,
    pub payment_distribution: Vec<CategoryCount>,
    /// Absent when the item table has no `review_score` column.
    pub review_distribution: Option<Vec<HistogramBin>>,
    /// Absent when the item table has no `shipping_limit_date` column.
    pub delivery_time_distribution: Option<Vec<HistogramBin>>,
    /// Kernel density over the same delivery days; empty when they do not spread.
    pub delivery_time_density: Option<Vec<DensityPoint>>,
    pub city_distribution: Vec<CategoryCount>,
}
