use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use chrono::NaiveDate;
use serde::{Deserialize, de::DeserializeOwned};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;

/// Query-string extractor that rejects with the JSON error envelope instead of plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::try_from_uri(&parts.uri)?;
        Ok(Self(params))
    }
}

#[derive(Debug, Default, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// First selected year, defaults to the earliest year in the data.
    pub year_min: Option<i32>,
    /// Last selected year, defaults to the latest year in the data.
    pub year_max: Option<i32>,
    /// Inclusive start date (`YYYY-MM-DD`).
    pub date_from: Option<NaiveDate>,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub date_to: Option<NaiveDate>,
    /// One of the top categories, defaults to the most frequent.
    pub category: Option<String>,
}

impl DashboardQuery {
    /// Swap reversed year and date pairs so each range reads low to high.
    pub fn ordered(mut self) -> Self {
        if let (Some(min), Some(max)) = (self.year_min, self.year_max) {
            if min > max {
                self.year_min = Some(max);
                self.year_max = Some(min);
            }
        }
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                self.date_from = Some(to);
                self.date_to = Some(from);
            }
        }
        self
    }
}

#[derive(Debug, Default, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BoundsQuery {
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}

impl From<BoundsQuery> for DashboardQuery {
    fn from(query: BoundsQuery) -> Self {
        Self {
            year_min: query.year_min,
            year_max: query.year_max,
            ..Self::default()
        }
    }
}
