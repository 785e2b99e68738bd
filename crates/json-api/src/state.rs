//! State

use std::sync::Arc;

use storefront_app::context::AppContext;

use crate::config::pagination::PaginationConfig;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) pagination: PaginationConfig,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, pagination: PaginationConfig) -> Self {
        Self { app, pagination }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, pagination: PaginationConfig) -> Arc<Self> {
        Arc::new(Self::new(app, pagination))
    }
}
