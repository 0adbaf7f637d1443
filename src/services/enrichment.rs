use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

use crate::{
    error::{AppError, AppResult},
    frame::strings,
    schema::{
        CATEGORY, CUSTOMER_CITY, CUSTOMER_ID, MONTH, ORDER_ID, PRICE, PRODUCT_ID, PURCHASE_DAY,
        PURCHASE_MONTH, PURCHASE_TIMESTAMP, PURCHASE_TS, REVIEW_SCORE, SHIPPING_LIMIT_DATE,
        SHIPPING_LIMIT_TS, YEAR,
    },
};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const ROW_INDEX: &str = "__row";

/// Parse a purchase or shipping timestamp. Date-only values land at midnight.
pub fn parse_timestamp(value: &str) -> AppResult<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| AppError::DateParse {
            value: value.to_string(),
        })
}

/// Left join orders to customers on `customer_id` and derive purchase instant, day, year and month.
pub fn enrich_orders(orders: &DataFrame, customers: &DataFrame) -> AppResult<DataFrame> {
    let mut instants = Vec::with_capacity(orders.height());
    let mut days = Vec::with_capacity(orders.height());
    let mut years = Vec::with_capacity(orders.height());
    let mut months = Vec::with_capacity(orders.height());
    for raw in strings(orders, PURCHASE_TIMESTAMP)? {
        let purchase = parse_timestamp(raw.unwrap_or_default())?;
        instants.push(purchase.and_utc().timestamp());
        days.push(purchase.date().num_days_from_ce());
        years.push(purchase.year());
        months.push(purchase.month());
    }
    let dated = orders.hstack(&[
        Series::new(PURCHASE_TS.into(), instants).into(),
        Series::new(PURCHASE_DAY.into(), days).into(),
        Series::new(YEAR.into(), years).into(),
        Series::new(MONTH.into(), months).into(),
    ])?;

    let cities = first_by_key(customers, CUSTOMER_ID, &[CUSTOMER_CITY]);
    let enriched = in_source_order(
        dated
            .lazy()
            .with_row_index(ROW_INDEX, None)
            .left_join(cities, col(CUSTOMER_ID), col(CUSTOMER_ID)),
        [
            col(ORDER_ID),
            col(CUSTOMER_ID),
            col(PURCHASE_TIMESTAMP),
            col(CUSTOMER_CITY),
            col(PURCHASE_TS),
            col(PURCHASE_DAY),
            col(YEAR),
            col(MONTH),
        ],
    )?;

    tracing::debug!(
        rows = enriched.height(),
        without_city = enriched.column(CUSTOMER_CITY)?.null_count(),
        "enriched orders"
    );
    Ok(enriched)
}

/// Left join order items to products on `product_id`, then to enriched orders on `order_id`.
pub fn enrich_items(
    order_items: &DataFrame,
    products: &DataFrame,
    enriched_orders: &DataFrame,
) -> AppResult<DataFrame> {
    let mut shipping = Vec::with_capacity(order_items.height());
    for raw in strings(order_items, SHIPPING_LIMIT_DATE)? {
        shipping.push(match raw {
            Some(raw) if !raw.trim().is_empty() => {
                Some(parse_timestamp(raw)?.and_utc().timestamp())
            }
            _ => None,
        });
    }
    let dated = order_items.hstack(&[Series::new(SHIPPING_LIMIT_TS.into(), shipping).into()])?;

    let categories = first_by_key(products, PRODUCT_ID, &[CATEGORY]);
    let purchases = enriched_orders
        .clone()
        .lazy()
        .select([
            col(ORDER_ID),
            col(PURCHASE_TS),
            col(MONTH).alias(PURCHASE_MONTH),
        ])
        .filter(col(ORDER_ID).is_first_distinct());

    let enriched = in_source_order(
        dated
            .lazy()
            .with_row_index(ROW_INDEX, None)
            .left_join(categories, col(PRODUCT_ID), col(PRODUCT_ID))
            .left_join(purchases, col(ORDER_ID), col(ORDER_ID)),
        [
            col(ORDER_ID),
            col(PRODUCT_ID),
            col(PRICE),
            col(REVIEW_SCORE),
            col(CATEGORY),
            col(SHIPPING_LIMIT_TS),
            col(PURCHASE_TS),
            col(PURCHASE_MONTH),
        ],
    )?;

    tracing::debug!(
        rows = enriched.height(),
        without_category = enriched.column(CATEGORY)?.null_count(),
        without_order = enriched.column(PURCHASE_TS)?.null_count(),
        "enriched order items"
    );
    Ok(enriched)
}

// Duplicate keys on the right side keep the first row so joins never fan out.
fn first_by_key(frame: &DataFrame, key: &str, values: &[&str]) -> LazyFrame {
    let columns: Vec<Expr> = std::iter::once(key)
        .chain(values.iter().copied())
        .map(col)
        .collect();
    frame
        .clone()
        .lazy()
        .select(columns)
        .filter(col(key).is_first_distinct())
}

fn in_source_order<E: AsRef<[Expr]>>(joined: LazyFrame, columns: E) -> AppResult<DataFrame> {
    Ok(joined
        .sort_by_exprs([col(ROW_INDEX)], SortMultipleOptions::default())
        .select(columns)
        .collect()?)
}
