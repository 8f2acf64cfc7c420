//! Application state - shared across all handlers.

use std::sync::Arc;

use sea_orm::{DbConn, DbErr};

use blog_core::ports::{CommentRepository, PostRepository, SessionService};
use blog_core::services::AuthService;
use blog_infra::database::{self, DatabaseConfig};
use blog_infra::{
    Argon2PasswordService, JwtSessionService, SeaOrmCommentRepository, SeaOrmPostRepository,
    SeaOrmUserRepository, SessionConfig,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    /// Mark cookies `Secure` (HTTPS deployments).
    pub cookie_secure: bool,
}

impl AppState {
    /// Connect to the configured database, make sure the tables exist and wire the services.
    pub async fn new(config: &AppConfig) -> Result<Self, DbErr> {
        let db = database::connect(&config.database).await?;
        database::create_schema(&db).await?;

        let sessions = Arc::new(JwtSessionService::new(config.session.clone()));
        let state = Self::from_connection(db, sessions, config.cookie_secure);

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Wire the services over an already prepared connection.
    pub fn from_connection(
        db: DbConn,
        sessions: Arc<dyn SessionService>,
        cookie_secure: bool,
    ) -> Self {
        let db = Arc::new(db);
        let users = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let auth = AuthService::new(users, Arc::new(Argon2PasswordService::new()), sessions);

        Self {
            auth: Arc::new(auth),
            posts: Arc::new(SeaOrmPostRepository::new(db.clone())),
            comments: Arc::new(SeaOrmCommentRepository::new(db)),
            cookie_secure,
        }
    }

    /// A throwaway state over a private in-memory SQLite database.
    pub async fn in_memory() -> Result<Self, DbErr> {
        let db = database::connect(&DatabaseConfig::in_memory()).await?;
        database::create_schema(&db).await?;

        let sessions = Arc::new(JwtSessionService::new(SessionConfig::default()));
        Ok(Self::from_connection(db, sessions, false))
    }
}
