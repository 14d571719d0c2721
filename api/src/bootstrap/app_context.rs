use std::sync::Arc;

use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

/// Shared state handed to every route group.
#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

/// Every adapter the application runs with, chosen once at startup.
#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
}

impl AppServices {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }
}
