//! Page view models.
//!
//! The server produces these instead of HTML; a template receives one
//! as its whole context.

use serde::{Deserialize, Serialize};

use crate::forms::{CommentForm, FieldErrors};

/// Who is looking at the page. Drives which links and buttons are shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerView {
    pub logged_in: bool,
    pub is_admin: bool,
    pub user: Option<AuthorView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummaryView {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub author: Option<AuthorView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub body: String,
    pub img_url: String,
    pub author: Option<AuthorView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: i32,
    pub text: String,
    pub author: Option<AuthorView>,
}

/// `GET /posts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListPage {
    pub viewer: ViewerView,
    pub posts: Vec<PostSummaryView>,
}

/// `GET /post/{id}`, and the re-render of a rejected comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    pub viewer: ViewerView,
    pub post: PostView,
    pub comments: Vec<CommentView>,
    pub form: CommentForm,
    #[serde(default)]
    pub errors: FieldErrors,
}

/// Any form page: register, login, new post, edit post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPage<F> {
    pub viewer: ViewerView,
    pub heading: String,
    pub form: F,
    #[serde(default)]
    pub errors: FieldErrors,
    /// One-line notice shown above the form (flash or failure reason).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<F> FormPage<F> {
    pub fn new(viewer: ViewerView, heading: impl Into<String>, form: F) -> Self {
        Self {
            viewer,
            heading: heading.into(),
            form,
            errors: FieldErrors::new(),
            message: None,
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// `GET /about`, `GET /contact`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPage {
    pub viewer: ViewerView,
    pub title: String,
    pub body: String,
}
