//! Database connection, schema and repositories.

mod base_repo;
mod connections;
pub mod entity;
mod repos;
mod schema;

pub use base_repo::SeaOrmRepository;
pub use connections::{DatabaseConfig, connect};
pub use repos::{SeaOrmCommentRepository, SeaOrmPostRepository, SeaOrmUserRepository};
pub use schema::create_schema;
