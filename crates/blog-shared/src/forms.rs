//! Submitted forms and their structural validation.
//!
//! Every field defaults to empty so a missing field is reported as a
//! validation error rather than rejected by the extractor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Field name -> messages, ready to show next to the inputs.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// A form as posted by the browser.
pub trait SubmittedForm: Validate + Sized {
    /// Trim free-text fields. Passwords are left alone.
    fn normalized(self) -> Self;

    /// Run the validation rules.
    fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|errors| field_errors(&errors))
    }
}

pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "Email is required (at most 100 characters)."),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 1000, message = "Name is required."))]
    pub name: String,
}

impl SubmittedForm for RegisterForm {
    fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

/// What the registration page echoes back. Never the password.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterEcho {
    pub email: String,
    pub name: String,
}

impl From<&RegisterForm> for RegisterEcho {
    fn from(form: &RegisterForm) -> Self {
        Self {
            email: form.email.clone(),
            name: form.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required."),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

impl SubmittedForm for LoginForm {
    fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginEcho {
    pub email: String,
}

impl From<&LoginForm> for LoginEcho {
    fn from(form: &LoginForm) -> Self {
        Self {
            email: form.email.clone(),
        }
    }
}

/// Create and edit share one form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 250, message = "Blog post title is required."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 250, message = "Subtitle is required."))]
    pub subtitle: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 250, message = "Blog image URL is required."),
        url(message = "Enter a valid URL.")
    )]
    pub img_url: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Blog content is required."))]
    pub body: String,
}

impl SubmittedForm for PostForm {
    fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            subtitle: self.subtitle.trim().to_string(),
            img_url: self.img_url.trim().to_string(),
            body: self.body.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment can't be empty."))]
    pub comment_text: String,
}

impl SubmittedForm for CommentForm {
    fn normalized(self) -> Self {
        Self {
            comment_text: self.comment_text.trim().to_string(),
        }
    }
}
