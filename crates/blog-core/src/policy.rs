//! Authorization policy.
//!
//! Handlers call these guards before any effect and short-circuit on failure.

use crate::domain::{CurrentUser, User};
use crate::error::DomainError;

/// Only administrators may author, edit or delete posts.
pub fn is_administrator(user: &User) -> bool {
    user.is_admin()
}

/// Resolve the current user as an administrator or fail with `Forbidden`.
///
/// Anonymous visitors are forbidden as well.
pub fn require_admin(current: &CurrentUser) -> Result<&User, DomainError> {
    match current.user() {
        Some(user) if is_administrator(user) => Ok(user),
        _ => Err(DomainError::Forbidden),
    }
}
