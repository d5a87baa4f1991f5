use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, service::Service, templates::Templates};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn Service>,
    pub templates: Templates,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn Service> {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}

impl FromRef<AppState> for Templates {
    fn from_ref(state: &AppState) -> Self {
        state.templates.clone()
    }
}
