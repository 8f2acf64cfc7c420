//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::{Comment, CommentWithAuthor, NewComment};
pub use post::{NewPost, Post, PostDraft, PostWithAuthor};
pub use user::{Author, CurrentUser, NewAccount, NewUser, Role, User, mask_email};
