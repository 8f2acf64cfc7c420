use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Author;

/// Post entity - a blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub subtitle: String,
    /// Human-readable publication date, e.g. "October 19, 2026".
    pub date: String,
    pub body: String,
    pub img_url: String,
}

/// The editable fields of a post, shared by create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
}

/// A post row ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i32,
    pub date: String,
    pub draft: PostDraft,
}

impl NewPost {
    /// Create a new post authored by `author_id`, dated today by the server clock.
    pub fn new(author_id: i32, draft: PostDraft) -> Self {
        Self::dated(author_id, draft, Local::now().date_naive())
    }

    pub fn dated(author_id: i32, draft: PostDraft, date: NaiveDate) -> Self {
        Self {
            author_id,
            date: date.format("%B %d, %Y").to_string(),
            draft,
        }
    }
}

/// A post together with its resolved author.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<Author>,
}
