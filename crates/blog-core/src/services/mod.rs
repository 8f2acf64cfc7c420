//! Application services built on top of the ports.

mod auth;

pub use auth::AuthService;
