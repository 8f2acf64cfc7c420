//! # Blog Server
//!
//! Actix-web application for the blog: route handlers, session cookies,
//! flash notices, error mapping and telemetry. `main.rs` only wires it up;
//! integration tests build the same `App` over an in-memory database.

pub mod config;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod render;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use handlers::configure_routes;
pub use state::AppState;
