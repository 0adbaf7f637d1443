//! Column names of the loaded source frames and of the enriched views built from them.

pub const ORDER_ID: &str = "order_id";
pub const CUSTOMER_ID: &str = "customer_id";
pub const PURCHASE_TIMESTAMP: &str = "order_purchase_timestamp";
pub const PRODUCT_ID: &str = "product_id";
pub const PRICE: &str = "price";
pub const SHIPPING_LIMIT_DATE: &str = "shipping_limit_date";
pub const REVIEW_SCORE: &str = "review_score";
pub const CATEGORY: &str = "product_category_name";
pub const PAYMENT_TYPE: &str = "payment_type";
pub const CUSTOMER_CITY: &str = "customer_city";

/// Purchase instant in seconds since the Unix epoch.
pub const PURCHASE_TS: &str = "purchase_ts";
/// Purchase date as days from the common era, for date-range filtering.
pub const PURCHASE_DAY: &str = "purchase_day";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";

/// Month of the item's order, copied over by the order join.
pub const PURCHASE_MONTH: &str = "purchase_month";
pub const SHIPPING_LIMIT_TS: &str = "shipping_limit_ts";

pub const COUNT: &str = "count";
