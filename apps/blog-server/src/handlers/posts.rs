//! Post and comment handlers.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};

use blog_core::domain::{NewComment, NewPost, PostWithAuthor};
use blog_core::error::{ConstraintViolation, DomainError, RepoError};
use blog_core::policy;
use blog_core::ports::BaseRepository;
use blog_shared::forms::{CommentForm, FieldErrors, PostForm};
use blog_shared::views::{FormPage, PostListPage, PostPage};
use blog_shared::SubmittedForm;

use super::{page, see_other};
use crate::flash::Flash;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::render;
use crate::state::AppState;

const TITLE_TAKEN: &str = "A post with that title already exists.";

fn post_not_found(id: i32) -> AppError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
    .into()
}

async fn load_post(state: &AppState, id: i32) -> AppResult<PostWithAuthor> {
    state
        .posts
        .find_with_author(id)
        .await?
        .ok_or_else(|| post_not_found(id))
}

async fn post_page(
    state: &AppState,
    identity: &Identity,
    entry: PostWithAuthor,
    form: CommentForm,
    errors: FieldErrors,
) -> AppResult<PostPage> {
    let comments = state.comments.list_for_post(entry.post.id).await?;

    Ok(PostPage {
        viewer: render::viewer(identity),
        post: render::post(entry),
        comments: comments.into_iter().map(render::comment).collect(),
        form,
        errors,
    })
}

/// GET /posts
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_with_authors().await?;

    Ok(HttpResponse::Ok().json(PostListPage {
        viewer: render::viewer(&identity),
        posts: posts.into_iter().map(render::post_summary).collect(),
    }))
}

/// GET /post/{id}
pub async fn show_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let entry = load_post(&state, path.into_inner()).await?;
    let view = post_page(
        &state,
        &identity,
        entry,
        CommentForm::default(),
        FieldErrors::new(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

/// POST /post/{id}
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let entry = load_post(&state, post_id).await?;

    let Some(user) = identity.user() else {
        return Ok(see_other("/login")
            .cookie(Flash::LoginRequired.cookie())
            .finish());
    };
    let author_id = user.id;

    let form = form.into_inner().normalized();
    if let Err(errors) = form.check() {
        let view = post_page(&state, &identity, entry, form, errors).await?;
        return Ok(page(StatusCode::UNPROCESSABLE_ENTITY, &view));
    }

    let comment = NewComment {
        post_id,
        author_id,
        text: form.comment_text,
    };

    match state.comments.create(comment).await {
        Ok(comment) => {
            tracing::info!(comment_id = comment.id, post_id, author_id, "Comment added");
            Ok(see_other(&format!("/post/{post_id}")).finish())
        }
        // The post was deleted between the lookup and the insert.
        Err(RepoError::Constraint(ConstraintViolation::MissingReference)) => {
            Err(post_not_found(post_id))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /new-post
pub async fn new_post_page(identity: Identity) -> AppResult<HttpResponse> {
    policy::require_admin(&identity)?;

    Ok(HttpResponse::Ok().json(FormPage::new(
        render::viewer(&identity),
        "New Post",
        PostForm::default(),
    )))
}

/// POST /new-post
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let admin_id = policy::require_admin(&identity)?.id;

    let form = form.into_inner().normalized();
    let view = FormPage::new(render::viewer(&identity), "New Post", form.clone());

    if let Err(errors) = form.check() {
        return Ok(page(
            StatusCode::UNPROCESSABLE_ENTITY,
            &view.with_errors(errors),
        ));
    }

    match state
        .posts
        .create(NewPost::new(admin_id, render::post_draft(form)))
        .await
    {
        Ok(post) => {
            tracing::info!(post_id = post.id, title = %post.title, "Post created");
            Ok(see_other("/posts").finish())
        }
        Err(RepoError::Constraint(ConstraintViolation::TitleTaken)) => {
            Ok(page(StatusCode::CONFLICT, &view.with_message(TITLE_TAKEN)))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /edit-post/{id}
pub async fn edit_post_page(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    policy::require_admin(&identity)?;

    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| post_not_found(post_id))?;

    Ok(HttpResponse::Ok().json(FormPage::new(
        render::viewer(&identity),
        "Edit Post",
        render::post_form(post),
    )))
}

/// POST /edit-post/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    policy::require_admin(&identity)?;

    let post_id = path.into_inner();
    if state.posts.find_by_id(post_id).await?.is_none() {
        return Err(post_not_found(post_id));
    }

    let form = form.into_inner().normalized();
    let view = FormPage::new(render::viewer(&identity), "Edit Post", form.clone());

    if let Err(errors) = form.check() {
        return Ok(page(
            StatusCode::UNPROCESSABLE_ENTITY,
            &view.with_errors(errors),
        ));
    }

    match state.posts.update(post_id, render::post_draft(form)).await {
        Ok(post) => {
            tracing::info!(post_id = post.id, "Post updated");
            Ok(see_other(&format!("/post/{}", post.id)).finish())
        }
        Err(RepoError::Constraint(ConstraintViolation::TitleTaken)) => {
            Ok(page(StatusCode::CONFLICT, &view.with_message(TITLE_TAKEN)))
        }
        Err(RepoError::NotFound) => Err(post_not_found(post_id)),
        Err(e) => Err(e.into()),
    }
}

/// GET /delete/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let admin_id = policy::require_admin(&identity)?.id;

    let post_id = path.into_inner();
    match state.posts.delete(post_id).await {
        Ok(()) => {
            tracing::info!(post_id, admin_id, "Post deleted");
            Ok(see_other("/posts").finish())
        }
        Err(RepoError::NotFound) => Err(post_not_found(post_id)),
        Err(e) => Err(e.into()),
    }
}
