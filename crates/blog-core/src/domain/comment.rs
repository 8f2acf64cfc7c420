use serde::{Deserialize, Serialize};

use super::Author;

/// Comment entity - immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub author_id: i32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i32,
    pub author_id: i32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: Option<Author>,
}
