use polars::prelude::*;

use crate::{
    error::AppResult,
    schema::{CATEGORY, COUNT},
};

pub const TOP_CATEGORY_COUNT: usize = 5;

/// Count the non-null values of `column`, most frequent first. Ties keep first-seen order.
pub fn value_counts(frame: LazyFrame, column: &str) -> AppResult<Vec<(String, usize)>> {
    let counts = frame
        .filter(col(column).is_not_null())
        .group_by_stable([col(column)])
        .agg([len().cast(DataType::UInt64).alias(COUNT)])
        .sort_by_exprs(
            [col(COUNT)],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let labels = counts.column(column)?.as_materialized_series().str()?;
    let totals = counts.column(COUNT)?.as_materialized_series().u64()?;
    Ok(labels
        .into_iter()
        .zip(totals)
        .filter_map(|(label, count)| Some((label?.to_string(), count? as usize)))
        .collect())
}

/// The `n` most frequent non-null product categories across `items`.
pub fn top_categories(items: &DataFrame, n: usize) -> AppResult<Vec<String>> {
    let mut counts = value_counts(items.clone().lazy(), CATEGORY)?;
    counts.truncate(n);
    Ok(counts.into_iter().map(|(category, _)| category).collect())
}
