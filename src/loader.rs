use std::{fs::File, path::Path};

use polars::prelude::*;

use crate::{
    error::{AppError, AppResult},
    schema::{
        CATEGORY, CUSTOMER_CITY, CUSTOMER_ID, ORDER_ID, PAYMENT_TYPE, PRICE, PRODUCT_ID,
        PURCHASE_TIMESTAMP, REVIEW_SCORE, SHIPPING_LIMIT_DATE,
    },
};

pub const ORDERS_FILE: &str = "order_df.csv";
pub const ORDER_ITEMS_FILE: &str = "order_items_df.csv";
pub const PRODUCTS_FILE: &str = "product_df.csv";
pub const PAYMENTS_FILE: &str = "order_payments_df.csv";
pub const CUSTOMERS_FILE: &str = "customer_df.csv";

/// The five source frames, projected to the columns the dashboard reads.
///
/// The item frame always carries `review_score` and `shipping_limit_date`;
/// the two flags record whether the source header actually had them.
#[derive(Debug, Clone)]
pub struct DataTables {
    pub orders: DataFrame,
    pub order_items: DataFrame,
    pub products: DataFrame,
    pub payments: DataFrame,
    pub customers: DataFrame,
    pub has_review_score: bool,
    pub has_shipping_limit_date: bool,
}

/// Load all five source tables from `data_dir`. Any missing or malformed file fails the whole load.
pub fn load_tables(data_dir: &Path) -> AppResult<DataTables> {
    let path = data_dir.join(ORDERS_FILE);
    let required = [ORDER_ID, CUSTOMER_ID, PURCHASE_TIMESTAMP];
    let orders = project(&path, read_frame(&path, &required)?, columns(&required))?;

    let path = data_dir.join(ORDER_ITEMS_FILE);
    let mut items = read_frame(&path, &[ORDER_ID, PRODUCT_ID, PRICE])?;
    let has_review_score = items.column(REVIEW_SCORE).is_ok();
    let has_shipping_limit_date = items.column(SHIPPING_LIMIT_DATE).is_ok();
    let height = items.height();
    for (present, name) in [
        (has_review_score, REVIEW_SCORE),
        (has_shipping_limit_date, SHIPPING_LIMIT_DATE),
    ] {
        if !present {
            items.with_column(Series::full_null(name.into(), height, &DataType::String))?;
        }
    }
    let order_items = project(
        &path,
        items,
        [
            col(ORDER_ID),
            col(PRODUCT_ID),
            col(PRICE).strict_cast(DataType::Float64),
            col(SHIPPING_LIMIT_DATE),
            col(REVIEW_SCORE).strict_cast(DataType::Float64),
        ],
    )?;

    let path = data_dir.join(PRODUCTS_FILE);
    let required = [PRODUCT_ID, CATEGORY];
    let products = project(&path, read_frame(&path, &required)?, columns(&required))?;

    let path = data_dir.join(PAYMENTS_FILE);
    let required = [ORDER_ID, PAYMENT_TYPE];
    let payments = project(&path, read_frame(&path, &required)?, columns(&required))?;

    let path = data_dir.join(CUSTOMERS_FILE);
    let required = [CUSTOMER_ID, CUSTOMER_CITY];
    let customers = project(&path, read_frame(&path, &required)?, columns(&required))?;

    Ok(DataTables {
        orders,
        order_items,
        products,
        payments,
        customers,
        has_review_score,
        has_shipping_limit_date,
    })
}

fn read_frame(path: &Path, required: &[&str]) -> AppResult<DataFrame> {
    let file = File::open(path).map_err(|source| AppError::MissingDataFile {
        path: path.to_path_buf(),
        source,
    })?;
    // Every column comes in as a string; numeric columns are cast when projected.
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| malformed(path, e))?;

    if let Some(column) = required.iter().find(|column| frame.column(column).is_err()) {
        return Err(AppError::MalformedData {
            path: path.to_path_buf(),
            reason: format!("missing column '{column}'"),
        });
    }

    tracing::info!(path = %path.display(), rows = frame.height(), "loaded table");
    Ok(frame)
}

fn project<E: AsRef<[Expr]>>(path: &Path, frame: DataFrame, columns: E) -> AppResult<DataFrame> {
    frame
        .lazy()
        .select(columns)
        .collect()
        .map_err(|e| malformed(path, e))
}

fn columns(names: &[&str]) -> Vec<Expr> {
    names.iter().map(|name| col(*name)).collect()
}

fn malformed(path: &Path, err: PolarsError) -> AppError {
    AppError::MalformedData {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
