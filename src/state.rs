use std::sync::Arc;

use crate::{context::DataContext, ui::PageRenderer};

#[derive(Clone)]
pub struct AppState {
    pub context: Arc<DataContext>,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(context: DataContext) -> anyhow::Result<Self> {
        Ok(Self {
            context: Arc::new(context),
            pages: Arc::new(PageRenderer::new()?),
        })
    }
}
