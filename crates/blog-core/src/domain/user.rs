use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May author, edit and delete posts.
    Admin,
    /// May read and comment.
    Reader,
}

impl Role {
    /// Role for a freshly registered account, given how many accounts already exist.
    ///
    /// The very first account administers the blog.
    pub fn for_new_account(existing_users: u64) -> Self {
        if existing_users == 0 {
            Role::Admin
        } else {
            Role::Reader
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Reader => "reader",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "reader" => Ok(Role::Reader),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// User entity - a registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Public projection used wherever the user is shown as an author.
    pub fn as_author(&self) -> Author {
        Author {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// The public face of a user: what readers see next to posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

/// Registration input as typed by the visitor (plaintext password).
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// A user row ready to be inserted. The role is assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// Mask an email for logging, e.g. `alice@example.com` -> `a***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            match local.chars().next() {
                Some(first) if local.len() > 1 => format!("{first}***{domain}"),
                _ => format!("***{domain}"),
            }
        }
        None => "***".to_string(),
    }
}

/// Identity resolved for the current request.
#[derive(Debug, Clone, Default)]
pub enum CurrentUser {
    User(User),
    #[default]
    Anonymous,
}

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        match self {
            CurrentUser::User(user) => Some(user),
            CurrentUser::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, CurrentUser::User(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_account_is_admin() {
        assert_eq!(Role::for_new_account(0), Role::Admin);
        assert_eq!(Role::for_new_account(1), Role::Reader);
        assert_eq!(Role::for_new_account(42), Role::Reader);
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_role_round_trips_through_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Reader.to_string().parse::<Role>().unwrap(), Role::Reader);
        assert!("root".parse::<Role>().is_err());
    }
}
