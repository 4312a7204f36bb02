// src/state.rs

use crate::config::Config;
use crate::sanitizer::Sanitizer;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub sanitizer: Sanitizer,
    pub config: Config,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let sanitizer = Sanitizer::new(config.allow_list()).with_limits(config.limits());
        Self { sanitizer, config }
    }
}

impl FromRef<AppState> for Sanitizer {
    fn from_ref(state: &AppState) -> Self {
        state.sanitizer.clone()
    }
}
