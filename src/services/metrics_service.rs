use std::f64::consts::TAU;

use polars::prelude::*;

use crate::{
    dto::dashboard::{CategoryCount, DensityPoint, HistogramBin, MonthlyOrders},
    error::AppResult,
    frame::{floats, n_unique, timestamps, values_of},
    schema::{
        CUSTOMER_CITY, ORDER_ID, PAYMENT_TYPE, PRICE, PRODUCT_ID, PURCHASE_MONTH, PURCHASE_TS,
        REVIEW_SCORE, SHIPPING_LIMIT_TS,
    },
    services::ranking::value_counts,
};

pub const CITY_LIMIT: usize = 10;
pub const REVIEW_BINS: usize = 5;
pub const DELIVERY_BINS: usize = 10;
pub const DENSITY_POINTS: usize = 200;

const SECONDS_PER_DAY: i64 = 86_400;
const ORDERS: &str = "orders";

pub fn total_orders(items: &DataFrame) -> AppResult<usize> {
    n_unique(items, ORDER_ID)
}

pub fn total_revenue(items: &DataFrame) -> AppResult<f64> {
    // -0.0 + 0.0 is +0.0
    Ok(floats(items, PRICE)?.sum().unwrap_or_default() + 0.0)
}

/// Distinct orders per calendar month of purchase, months ascending.
pub fn monthly_orders(items: &DataFrame) -> AppResult<Vec<MonthlyOrders>> {
    let monthly = items
        .clone()
        .lazy()
        .filter(col(PURCHASE_MONTH).is_not_null())
        .group_by([col(PURCHASE_MONTH)])
        .agg([col(ORDER_ID).n_unique().cast(DataType::UInt64).alias(ORDERS)])
        .sort_by_exprs([col(PURCHASE_MONTH)], SortMultipleOptions::default())
        .collect()?;

    let months = monthly.column(PURCHASE_MONTH)?.as_materialized_series().u32()?;
    let orders = monthly.column(ORDERS)?.as_materialized_series().u64()?;
    Ok(months
        .into_iter()
        .zip(orders)
        .filter_map(|(month, orders)| {
            Some(MonthlyOrders {
                month: month?,
                orders: orders? as usize,
            })
        })
        .collect())
}

pub fn payment_distribution(
    payments: &DataFrame,
    orders: &DataFrame,
) -> AppResult<Vec<CategoryCount>> {
    let matched = payments
        .clone()
        .lazy()
        .filter(col(ORDER_ID).is_in(values_of(orders, ORDER_ID)?));
    Ok(to_counts(value_counts(matched, PAYMENT_TYPE)?))
}

/// Review scores of every source item sharing a product with the filtered items.
pub fn review_distribution(
    source_items: &DataFrame,
    items: &DataFrame,
) -> AppResult<Vec<HistogramBin>> {
    let reviewed = source_items
        .clone()
        .lazy()
        .filter(col(PRODUCT_ID).is_in(values_of(items, PRODUCT_ID)?))
        .select([col(REVIEW_SCORE)])
        .collect()?;
    let scores: Vec<f64> = floats(&reviewed, REVIEW_SCORE)?.into_iter().flatten().collect();
    Ok(histogram(&scores, REVIEW_BINS))
}

/// Whole days between purchase and shipping limit, rounded toward negative infinity.
/// Items missing either instant are skipped.
pub fn delivery_days(items: &DataFrame) -> AppResult<Vec<i64>> {
    let shipping = timestamps(items, SHIPPING_LIMIT_TS)?;
    let purchase = timestamps(items, PURCHASE_TS)?;
    Ok(shipping
        .into_iter()
        .zip(purchase)
        .filter_map(|(shipping, purchase)| {
            Some((shipping? - purchase?).div_euclid(SECONDS_PER_DAY))
        })
        .collect())
}

/// The delivery histogram plus its smoothed density, scaled to the histogram's counts.
pub fn delivery_time_distribution(
    items: &DataFrame,
) -> AppResult<(Vec<HistogramBin>, Vec<DensityPoint>)> {
    let days: Vec<f64> = delivery_days(items)?.into_iter().map(|d| d as f64).collect();
    let bins = histogram(&days, DELIVERY_BINS);
    let density = bins
        .first()
        .map(|bin| density_curve(&days, bin.end - bin.start))
        .unwrap_or_default();
    Ok((bins, density))
}

pub fn city_distribution(orders: &DataFrame) -> AppResult<Vec<CategoryCount>> {
    let mut counts = value_counts(orders.clone().lazy(), CUSTOMER_CITY)?;
    counts.truncate(CITY_LIMIT);
    Ok(to_counts(counts))
}

/// Equal-width histogram over `[min, max]`; the last bin is closed on the right.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for value in &values {
        let slot = (((value - lo) / width).floor() as usize).min(bins - 1);
        counts[slot] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + width * i as f64,
            end: if i + 1 == bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Gaussian kernel density over `[min, max]` with Scott's bandwidth, multiplied by
/// `n * bin_width` so it overlays a count histogram. Empty when the values do not spread.
pub fn density_curve(values: &[f64], bin_width: f64) -> Vec<DensityPoint> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = values.len() as f64;
    if values.len() < 2 {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let bandwidth = variance.sqrt() * n.powf(-0.2);
    if bandwidth <= 0.0 || !bandwidth.is_finite() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (max - min) / (DENSITY_POINTS - 1) as f64;
    let scale = bin_width / (bandwidth * TAU.sqrt());

    (0..DENSITY_POINTS)
        .map(|i| {
            let x = min + step * i as f64;
            let kernel_sum: f64 = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum();
            DensityPoint {
                x,
                y: kernel_sum * scale,
            }
        })
        .collect()
}

/// `1234.5` -> `$1,234.50`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn to_counts(counts: Vec<(String, usize)>) -> Vec<CategoryCount> {
    counts
        .into_iter()
        .map(|(label, count)| CategoryCount { label, count })
        .collect()
}
