//! SeaORM repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use blog_core::domain::{
    Comment, CommentWithAuthor, NewComment, NewPost, NewUser, Post, PostDraft, PostWithAuthor,
    Role, User, mask_email,
};
use blog_core::error::{ConstraintViolation, RepoError};
use blog_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::base_repo::{SeaOrmRepository, query_err, write_err};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

/// SeaORM user repository.
pub type SeaOrmUserRepository = SeaOrmRepository<UserEntity>;

/// SeaORM post repository.
pub type SeaOrmPostRepository = SeaOrmRepository<PostEntity>;

/// SeaORM comment repository.
pub type SeaOrmCommentRepository = SeaOrmRepository<CommentEntity>;

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        // Insert before reading so the transaction holds the write lock
        // from its first statement.
        let model = user::ActiveModel {
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            name: Set(new_user.name),
            role: Set(Role::Reader.as_str().to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| write_err(e, ConstraintViolation::EmailTaken))?;

        let others = UserEntity::find()
            .filter(user::Column::Id.ne(model.id))
            .count(&txn)
            .await
            .map_err(query_err)?;

        let role = Role::for_new_account(others);
        let model = if role == Role::Reader {
            model
        } else {
            let mut active: user::ActiveModel = model.into();
            active.role = Set(role.as_str().to_string());
            active.update(&txn).await.map_err(query_err)?
        };

        txn.commit().await.map_err(query_err)?;

        tracing::debug!(user_id = model.id, %role, "User created");
        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .find_also_related(UserEntity)
            .all(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(rows
            .into_iter()
            .map(|(post, author)| PostWithAuthor {
                post: post.into(),
                author: author.map(Into::into),
            })
            .collect())
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(row.map(|(post, author)| PostWithAuthor {
            post: post.into(),
            author: author.map(Into::into),
        }))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let NewPost {
            author_id,
            date,
            draft,
        } = new_post;

        let model = post::ActiveModel {
            title: Set(draft.title),
            subtitle: Set(draft.subtitle),
            date: Set(date),
            body: Set(draft.body),
            img_url: Set(draft.img_url),
            author_id: Set(author_id),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| write_err(e, ConstraintViolation::TitleTaken))?;

        tracing::debug!(post_id = model.id, author_id, "Post created");
        Ok(model.into())
    }

    async fn update(&self, id: i32, draft: PostDraft) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        // Write first, then read back inside the same transaction.
        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(draft.title))
            .col_expr(post::Column::Subtitle, Expr::value(draft.subtitle))
            .col_expr(post::Column::Body, Expr::value(draft.body))
            .col_expr(post::Column::ImgUrl, Expr::value(draft.img_url))
            .filter(post::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| write_err(e, ConstraintViolation::TitleTaken))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        let model = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        txn.commit().await.map_err(query_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        // Comments go first; the foreign key does not cascade.
        let comments = CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(query_err)?;

        let result = PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            // Dropping the transaction rolls the comment delete back.
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(query_err)?;

        tracing::debug!(
            post_id = id,
            comments = comments.rows_affected,
            "Post deleted with its comments"
        );
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel {
            text: Set(new_comment.text),
            author_id: Set(new_comment.author_id),
            post_id: Set(new_comment.post_id),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| write_err(e, ConstraintViolation::MissingReference))?;

        Ok(model.into())
    }

    async fn list_for_post(&self, post_id: i32) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .find_also_related(UserEntity)
            .all(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| CommentWithAuthor {
                comment: comment.into(),
                author: author.map(Into::into),
            })
            .collect())
    }
}
