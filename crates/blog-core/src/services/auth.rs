//! Authentication service - registration, login, logout and session resolution.

use std::sync::Arc;

use crate::domain::{CurrentUser, NewAccount, NewUser, User};
use crate::error::{ConstraintViolation, DomainError};
use crate::ports::{AuthError, PasswordService, Session, SessionService, UserRepository};

/// Verifies credentials and establishes sessions.
///
/// Handlers receive the resolved identity through [`AuthService::current_user`];
/// nothing here is global.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    sessions: Arc<dyn SessionService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        sessions: Arc<dyn SessionService>,
    ) -> Self {
        Self {
            users,
            passwords,
            sessions,
        }
    }

    /// Create an account and log it in.
    pub async fn register(&self, account: NewAccount) -> Result<(User, Session), DomainError> {
        if self.users.find_by_email(&account.email).await?.is_some() {
            return Err(DomainError::Constraint(ConstraintViolation::EmailTaken));
        }

        let password_hash = self.passwords.hash(&account.password)?;

        // A concurrent registration with the same email loses at the unique index.
        let user = self
            .users
            .create(NewUser {
                email: account.email,
                password_hash,
                name: account.name,
            })
            .await?;

        let session = self.sessions.issue(user.id)?;
        Ok((user, session))
    }

    /// Check credentials and open a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, Session), DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            return Err(AuthError::WrongPassword.into());
        }

        let session = self.sessions.issue(user.id)?;
        Ok((user, session))
    }

    /// End a session. Returns the user whose session ended, if the token was still valid.
    ///
    /// Logging out without a session is not an error.
    pub fn logout(&self, token: Option<&str>) -> Option<i32> {
        token
            .and_then(|token| self.sessions.verify(token).ok())
            .map(|claims| claims.user_id)
    }

    /// Resolve a session token back to a user.
    ///
    /// Missing, invalid or expired tokens and tokens for deleted users are anonymous.
    pub async fn current_user(&self, token: Option<&str>) -> Result<CurrentUser, DomainError> {
        let Some(token) = token else {
            return Ok(CurrentUser::Anonymous);
        };

        let claims = match self.sessions.verify(token) {
            Ok(claims) => claims,
            Err(_) => return Ok(CurrentUser::Anonymous),
        };

        Ok(self
            .users
            .find_by_id(claims.user_id)
            .await?
            .map(CurrentUser::User)
            .unwrap_or_default())
    }
}
