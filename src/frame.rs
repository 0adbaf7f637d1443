use polars::prelude::*;

use crate::error::AppResult;

pub fn strings<'a>(frame: &'a DataFrame, name: &str) -> AppResult<&'a StringChunked> {
    Ok(frame.column(name)?.as_materialized_series().str()?)
}

pub fn floats<'a>(frame: &'a DataFrame, name: &str) -> AppResult<&'a Float64Chunked> {
    Ok(frame.column(name)?.as_materialized_series().f64()?)
}

pub fn ints<'a>(frame: &'a DataFrame, name: &str) -> AppResult<&'a Int32Chunked> {
    Ok(frame.column(name)?.as_materialized_series().i32()?)
}

pub fn timestamps<'a>(frame: &'a DataFrame, name: &str) -> AppResult<&'a Int64Chunked> {
    Ok(frame.column(name)?.as_materialized_series().i64()?)
}

/// Distinct values of `name`, nulls included.
pub fn n_unique(frame: &DataFrame, name: &str) -> AppResult<usize> {
    Ok(frame.column(name)?.as_materialized_series().n_unique()?)
}

/// The values of `name` as a literal, for `is_in` lookups against another frame.
pub fn values_of(frame: &DataFrame, name: &str) -> AppResult<Expr> {
    Ok(lit(frame.column(name)?.as_materialized_series().clone()))
}
