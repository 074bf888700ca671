//! Application state.

use std::sync::Arc;
use std::time::Instant;

use crate::service::PostService;
use crate::settings::{ApiSettings, Environment};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    service: PostService,
    api: Arc<ApiSettings>,
    environment: Environment,
    started_at: Instant,
}

impl AppState {
    /// Creates a new AppState around the post service.
    pub fn new(service: PostService, api: ApiSettings, environment: Environment) -> Self {
        Self {
            service,
            api: Arc::new(api),
            environment,
            started_at: Instant::now(),
        }
    }

    /// Returns the post service.
    pub fn service(&self) -> &PostService {
        &self.service
    }

    /// Returns the route layout.
    pub fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Seconds elapsed since the state was built.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
