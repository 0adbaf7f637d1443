#![allow(dead_code)]

use std::path::Path;

use axum_ecommerce_dashboard::{
    context::DataContext,
    loader::{
        CUSTOMERS_FILE, DataTables, ORDER_ITEMS_FILE, ORDERS_FILE, PAYMENTS_FILE, PRODUCTS_FILE,
        load_tables,
    },
};
use polars::prelude::*;

pub const ORDERS_CSV: &str = "\
order_id,customer_id,order_status,order_purchase_timestamp
o1,c1,delivered,2017-01-05 10:00:00
o2,c2,delivered,2018-02-10 09:30:00
";

pub const ORDER_ITEMS_CSV: &str = "\
order_id,order_item_id,product_id,seller_id,shipping_limit_date,price,freight_value
o1,1,p1,s1,2017-01-11 10:00:00,49.90,8.72
o2,1,p2,s1,2018-02-12 09:30:00,19.90,4.10
o2,2,p9,s2,,,
";

pub const PRODUCTS_CSV: &str = "\
product_id,product_category_name,product_weight_g
p1,toys,300
p2,,120
";

pub const PAYMENTS_CSV: &str = "\
order_id,payment_sequential,payment_type,payment_value
o1,1,credit_card,58.62
o2,1,boleto,24.00
";

pub const CUSTOMERS_CSV: &str = "\
customer_id,customer_unique_id,customer_zip_code_prefix,customer_city,customer_state
c1,u1,01001,sao paulo,SP
c2,u2,20010,rio de janeiro,RJ
";

/// Three 2017 orders carrying every "toys" item, two 2018 orders carrying the other four categories.
pub const TOYS_ORDERS_CSV: &str = "\
order_id,customer_id,order_purchase_timestamp
o1,c1,2017-01-05 10:00:00
o2,c2,2017-02-10 09:30:00
o3,c3,2017-03-15 18:45:00
o4,c4,2018-04-01 08:00:00
o5,c5,2018-06-20 12:00:00
";

pub const TOYS_ITEMS_CSV: &str = "\
order_id,product_id,price,shipping_limit_date,review_score
o1,p_toy1,49.90,2017-01-11 10:00:00,5
o1,p_toy2,19.90,2017-01-05 09:00:00,4
o2,p_toy1,49.90,2017-02-17 09:30:00,3
o3,p_toy3,100.00,2017-03-20 18:45:00,5
o3,p_toy3,100.00,2017-03-20 18:45:00,1
o4,p_book1,30.00,2018-04-08 08:00:00,4
o4,p_book2,25.00,2018-04-08 08:00:00,2
o5,p_garden,15.00,2018-06-25 12:00:00,3
o5,p_health,12.00,2018-06-25 12:00:00,5
o5,p_sports,60.00,2018-06-25 12:00:00,4
";

pub const TOYS_PRODUCTS_CSV: &str = "\
product_id,product_category_name
p_toy1,toys
p_toy2,toys
p_toy3,toys
p_book1,books
p_book2,books
p_garden,garden
p_health,health
p_sports,sports
";

pub const TOYS_PAYMENTS_CSV: &str = "\
order_id,payment_type
o1,credit_card
o1,voucher
o2,boleto
o3,credit_card
o4,debit_card
o5,credit_card
";

// c5 has no customer row, so o5 has no city
pub const TOYS_CUSTOMERS_CSV: &str = "\
customer_id,customer_city
c1,sao paulo
c2,sao paulo
c3,rio de janeiro
c4,curitiba
";

pub const TOYS_FILES: [(&str, &str); 5] = [
    (ORDERS_FILE, TOYS_ORDERS_CSV),
    (ORDER_ITEMS_FILE, TOYS_ITEMS_CSV),
    (PRODUCTS_FILE, TOYS_PRODUCTS_CSV),
    (PAYMENTS_FILE, TOYS_PAYMENTS_CSV),
    (CUSTOMERS_FILE, TOYS_CUSTOMERS_CSV),
];

/// Write the five CSV fixtures into `dir`, replacing any file named in `overrides`.
pub fn write_dataset(dir: &Path, overrides: &[(&str, &str)]) {
    let files = [
        (ORDERS_FILE, ORDERS_CSV),
        (ORDER_ITEMS_FILE, ORDER_ITEMS_CSV),
        (PRODUCTS_FILE, PRODUCTS_CSV),
        (PAYMENTS_FILE, PAYMENTS_CSV),
        (CUSTOMERS_FILE, CUSTOMERS_CSV),
    ];
    for (name, default) in files {
        let contents = overrides
            .iter()
            .find(|(file, _)| *file == name)
            .map(|(_, contents)| *contents)
            .unwrap_or(default);
        std::fs::write(dir.join(name), contents).expect("write fixture");
    }
}

/// The toys dataset with some of its files replaced.
pub fn toys_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, String)> {
    TOYS_FILES
        .iter()
        .map(|(name, default)| {
            let contents = overrides
                .iter()
                .find(|(file, _)| file == name)
                .map(|(_, contents)| *contents)
                .unwrap_or(*default);
            (*name, contents.to_string())
        })
        .collect()
}

pub fn tables_from(files: &[(&str, String)]) -> DataTables {
    let dir = tempfile::tempdir().expect("tempdir");
    let overrides: Vec<(&str, &str)> = files.iter().map(|(n, c)| (*n, c.as_str())).collect();
    write_dataset(dir.path(), &overrides);
    load_tables(dir.path()).expect("dataset loads")
}

pub fn context_from(files: &[(&str, String)]) -> DataContext {
    DataContext::build(tables_from(files)).expect("dataset builds")
}

pub fn toys_tables() -> DataTables {
    tables_from(&toys_with(&[]))
}

pub fn toys_context() -> DataContext {
    context_from(&toys_with(&[]))
}

pub fn strings_of(frame: &DataFrame, column: &str) -> Vec<Option<String>> {
    frame
        .column(column)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect()
}

pub fn floats_of(frame: &DataFrame, column: &str) -> Vec<Option<f64>> {
    frame
        .column(column)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn ints_of(frame: &DataFrame, column: &str) -> Vec<Option<i32>> {
    frame
        .column(column)
        .unwrap()
        .as_materialized_series()
        .i32()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn timestamps_of(frame: &DataFrame, column: &str) -> Vec<Option<i64>> {
    frame
        .column(column)
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn orders_frame(rows: &[(&str, &str, &str)]) -> DataFrame {
    df!(
        "order_id" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        "customer_id" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        "order_purchase_timestamp" => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
    )
    .unwrap()
}

pub fn customers_frame(rows: &[(&str, &str)]) -> DataFrame {
    df!(
        "customer_id" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        "customer_city" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
    )
    .unwrap()
}

pub fn products_frame(rows: &[(&str, &str)]) -> DataFrame {
    df!(
        "product_id" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        "product_category_name" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
    )
    .unwrap()
}

/// Items with a shipping limit (or none) and no review scores.
pub fn items_frame(rows: &[(&str, &str, f64, Option<&str>)]) -> DataFrame {
    df!(
        "order_id" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        "product_id" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        "price" => rows.iter().map(|r| Some(r.2)).collect::<Vec<_>>(),
        "shipping_limit_date" => rows.iter().map(|r| r.3).collect::<Vec<_>>(),
        "review_score" => rows.iter().map(|_| None::<f64>).collect::<Vec<_>>(),
    )
    .unwrap()
}
