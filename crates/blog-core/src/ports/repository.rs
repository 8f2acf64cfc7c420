use async_trait::async_trait;

use crate::domain::{
    Comment, CommentWithAuthor, NewComment, NewPost, NewUser, Post, PostDraft, PostWithAuthor,
    User,
};
use crate::error::RepoError;

/// Generic repository trait for lookups by primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID. A missing row is `Ok(None)`.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a user, assigning the role from the current account count.
    ///
    /// Fails with `ConstraintViolation::EmailTaken` if the email is present.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// All posts with their authors, oldest first.
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError>;

    /// Fails with `ConstraintViolation::TitleTaken` on a duplicate title.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite the editable fields of an existing post.
    async fn update(&self, id: i32, draft: PostDraft) -> Result<Post, RepoError>;

    /// Delete a post and every comment under it.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fails with `ConstraintViolation::MissingReference` if the post or author is gone.
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    /// Comments under a post with their authors, oldest first.
    async fn list_for_post(&self, post_id: i32) -> Result<Vec<CommentWithAuthor>, RepoError>;
}
