//! # Blog Core
//!
//! The domain layer of the blog.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the error taxonomy, the ports infrastructure must implement,
//! the authentication service and the authorization policy.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod services;

pub use error::DomainError;
