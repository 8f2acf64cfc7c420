//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! SeaORM persistence (SQLite or PostgreSQL), Argon2 password hashing
//! and JWT-signed session tokens.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtSessionService, SessionConfig};
pub use database::{
    DatabaseConfig, SeaOrmCommentRepository, SeaOrmPostRepository, SeaOrmUserRepository,
};
