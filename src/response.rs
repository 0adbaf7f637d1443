use serde::Serialize;
use utoipa::ToSchema;

/// Row counts behind a dashboard payload.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub filtered_orders: Option<usize>,
    pub filtered_items: Option<usize>,
}

impl Meta {
    pub fn new(filtered_orders: usize, filtered_items: usize) -> Self {
        Self {
            filtered_orders: Some(filtered_orders),
            filtered_items: Some(filtered_items),
        }
    }

    pub fn empty() -> Self {
        Self {
            filtered_orders: None,
            filtered_items: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
