//! Shared application state.

use std::sync::Arc;

use daybook_auth::{AuthConfig, AuthService};
use daybook_db::repository::{
    SurrealCalendarRepository, SurrealEventRepository, SurrealEventTemplateRepository,
    SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Connection type used by the server — remote `ws://` in production,
/// `mem://` in tests.
pub type Db = Any;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<SurrealUserRepository<Db>>>,
    pub calendars: SurrealCalendarRepository<Db>,
    pub events: SurrealEventRepository<Db>,
    pub templates: SurrealEventTemplateRepository<Db>,
    /// Shared with the auth service; the middleware verifies access
    /// tokens against it without going through the service.
    pub auth_config: AuthConfig,
}

impl AppState {
    pub fn new(db: Surreal<Db>, auth_config: AuthConfig) -> Self {
        Self {
            auth: Arc::new(AuthService::new(
                SurrealUserRepository::new(db.clone()),
                auth_config.clone(),
            )),
            calendars: SurrealCalendarRepository::new(db.clone()),
            events: SurrealEventRepository::new(db.clone()),
            templates: SurrealEventTemplateRepository::new(db),
            auth_config,
        }
    }
}
