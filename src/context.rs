use std::path::Path;

use polars::prelude::DataFrame;

use crate::{
    error::AppResult,
    loader::{DataTables, load_tables},
    services::{
        enrichment::{enrich_items, enrich_orders},
        ranking::{TOP_CATEGORY_COUNT, top_categories},
    },
};

/// Source tables plus the filter-independent derived views, built once at startup.
#[derive(Debug, Clone)]
pub struct DataContext {
    tables: DataTables,
    orders: DataFrame,
    items: DataFrame,
    top_categories: Vec<String>,
}

impl DataContext {
    pub fn load(data_dir: &Path) -> AppResult<Self> {
        let tables = load_tables(data_dir)?;
        Self::build(tables)
    }

    pub fn build(tables: DataTables) -> AppResult<Self> {
        let orders = enrich_orders(&tables.orders, &tables.customers)?;
        let items = enrich_items(&tables.order_items, &tables.products, &orders)?;
        let top_categories = top_categories(&items, TOP_CATEGORY_COUNT)?;
        tracing::info!(
            orders = orders.height(),
            items = items.height(),
            categories = ?top_categories,
            "data context ready"
        );
        Ok(Self {
            tables,
            orders,
            items,
            top_categories,
        })
    }

    /// Orders joined with their customer's city, one row per source order.
    pub fn orders(&self) -> &DataFrame {
        &self.orders
    }

    /// Order items joined with category and purchase date, one row per source item.
    pub fn items(&self) -> &DataFrame {
        &self.items
    }

    pub fn top_categories(&self) -> &[String] {
        &self.top_categories
    }

    pub fn payments(&self) -> &DataFrame {
        &self.tables.payments
    }

    pub fn source_items(&self) -> &DataFrame {
        &self.tables.order_items
    }

    pub fn has_review_score(&self) -> bool {
        self.tables.has_review_score
    }

    pub fn has_shipping_limit_date(&self) -> bool {
        self.tables.has_shipping_limit_date
    }
}
