use minijinja::{Environment, context};
use serde::Serialize;

use crate::{dto::dashboard::RenderedView, error::AppResult};

pub mod chart;

const DASHBOARD_TEMPLATE: &str = "dashboard.html";

#[derive(Debug, Serialize)]
struct YearOption {
    value: i32,
    is_min: bool,
    is_max: bool,
}

#[derive(Debug, Serialize)]
struct CategoryOption {
    value: String,
    selected: bool,
}

/// Values for the three sidebar inputs, flattened for the template.
#[derive(Debug, Serialize)]
struct FormState {
    years: Vec<YearOption>,
    date_min: Option<String>,
    date_max: Option<String>,
    date_from: Option<String>,
    date_to: Option<String>,
    categories: Vec<CategoryOption>,
}

impl FormState {
    fn from_view(view: &RenderedView) -> Self {
        let selected = view.selection.years;
        let years = view
            .bounds
            .years
            .map(|bounds| {
                (bounds.min..=bounds.max)
                    .map(|year| YearOption {
                        value: year,
                        is_min: selected.is_some_and(|s| s.min == year),
                        is_max: selected.is_some_and(|s| s.max == year),
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Self {
            years,
            date_min: view.bounds.dates.map(|d| d.from.to_string()),
            date_max: view.bounds.dates.map(|d| d.to.to_string()),
            date_from: view.selection.dates.map(|d| d.from.to_string()),
            date_to: view.selection.dates.map(|d| d.to.to_string()),
            categories: view
                .bounds
                .categories
                .iter()
                .map(|c| CategoryOption {
                    value: c.clone(),
                    selected: view.selection.category.as_deref() == Some(c.as_str()),
                })
                .collect(),
        }
    }
}

/// Renders a [`RenderedView`] into the single dashboard page.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> anyhow::Result<Self> {
        let mut env = Environment::new();
        env.add_template(
            DASHBOARD_TEMPLATE,
            include_str!("../../templates/dashboard.html"),
        )?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &RenderedView) -> AppResult<String> {
        let template = self
            .env
            .get_template(DASHBOARD_TEMPLATE)
            .map_err(anyhow::Error::from)?;
        let charts = chart::charts_for(view)?;
        let html = template
            .render(context! {
                view => view,
                form => FormState::from_view(view),
                charts => charts,
            })
            .map_err(anyhow::Error::from)?;
        Ok(html)
    }
}
