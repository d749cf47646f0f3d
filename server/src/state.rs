//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Handlers are stateless apart from the database pool, the parsed config,
//! and the in-memory access-code throttle.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::rate_limit::CodeRequestLimiter;
use crate::services::mailer::{self, Mailer};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub code_limiter: CodeRequestLimiter,
    /// Access-code delivery. `None` when no email provider is configured.
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let code_limiter = CodeRequestLimiter::new(config.code_request_limit, config.code_request_window);
        let mailer = config.resend.clone().map(mailer::resend);
        Self { pool, config: Arc::new(config), code_limiter, mailer }
    }

    #[must_use]
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    use crate::config::test_helpers::test_config;

    /// Create a test `AppState` with a dummy `PgPool` (connect_lazy, no live DB).
    #[must_use]
    pub fn test_app_state() -> AppState {
        let config = test_config();
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("connect_lazy should not fail");
        AppState::new(pool, config)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
